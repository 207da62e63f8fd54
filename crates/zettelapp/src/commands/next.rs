use crate::allocator::{next_child, next_root};
use crate::commands::helpers::resolve_node;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::tree::ZettelTree;
use crate::zettel_id::ZettelId;

/// The identifier a new note would get. Nothing is written.
pub fn allocate<D>(tree: &ZettelTree<D>, parent: Option<&str>) -> Result<ZettelId> {
    match parent {
        Some(raw) => Ok(next_child(tree, resolve_node(tree, raw)?)),
        None => Ok(next_root(tree)),
    }
}

pub fn run<D>(tree: &ZettelTree<D>, parent: Option<&str>) -> Result<CmdResult> {
    Ok(CmdResult::default().with_zettel_id(allocate(tree, parent)?))
}
