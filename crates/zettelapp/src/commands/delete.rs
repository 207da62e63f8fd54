use crate::commands::helpers::{fmt_count, resolve_node};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Note;
use crate::store::NoteStore;
use crate::tree::ZettelTree;
use tracing::info;

/// Deletes every note carrying `source` or one of its descendants' identifiers.
///
/// Notes are removed in display order. A failing delete stops the run; notes already
/// removed stay removed.
pub fn run<S: NoteStore>(
    store: &mut S,
    tree: &ZettelTree<Note>,
    source: &str,
    dry_run: bool,
) -> Result<CmdResult> {
    let node = resolve_node(tree, source)?;
    let targets: Vec<Note> = tree
        .subtree(node)
        .into_iter()
        .flat_map(|n| n.documents().iter().cloned())
        .collect();

    let mut result = CmdResult::default();
    if dry_run {
        result.add_message(CmdMessage::info(format!(
            "Would delete '{}' and its descendants ({})",
            node.zettel_id(),
            fmt_count(targets.len(), "note")
        )));
        return Ok(result.with_notes(targets));
    }

    for note in &targets {
        store.delete_note(&note.path)?;
    }
    info!(zettel_id = %node.zettel_id(), notes = targets.len(), "deleted subtree");
    result.add_message(CmdMessage::success(format!(
        "Deleted '{}' and its descendants ({})",
        node.zettel_id(),
        fmt_count(targets.len(), "note")
    )));
    Ok(result.with_notes(targets))
}
