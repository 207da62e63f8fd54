use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::Note;
use crate::tree::ZettelTree;
use crate::zettel_id::ZettelId;
use serde::Serialize;

/// One row of the flattened tree, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeEntry {
    pub zettel_id: ZettelId,
    /// Top-level identifiers have depth 1.
    pub depth: usize,
    /// Notes carrying exactly this identifier. Empty for path nodes.
    pub notes: Vec<Note>,
    pub child_count: usize,
}

impl TreeEntry {
    pub fn is_path_node(&self) -> bool {
        self.notes.is_empty()
    }
}

pub fn entries(tree: &ZettelTree<Note>) -> Vec<TreeEntry> {
    tree.iter()
        .map(|node| TreeEntry {
            zettel_id: node.zettel_id().clone(),
            depth: tree.depth(node),
            notes: node.documents().to_vec(),
            child_count: node.child_count(),
        })
        .collect()
}

pub fn run(tree: &ZettelTree<Note>) -> Result<CmdResult> {
    Ok(CmdResult::default().with_entries(entries(tree)))
}
