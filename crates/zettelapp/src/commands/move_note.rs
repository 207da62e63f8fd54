use crate::commands::helpers::{apply_remap, fmt_count, fmt_parent, resolve_node, resolve_parent};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, ZettelError};
use crate::model::Note;
use crate::remap::Remapper;
use crate::store::NoteStore;
use crate::tree::ZettelTree;

/// Moves `source` and its subtree under `target` (`None` for the top level),
/// renumbering everything that moves.
pub fn run<S: NoteStore>(
    store: &mut S,
    tree: &ZettelTree<Note>,
    remapper: &Remapper,
    source: &str,
    target: Option<&str>,
    dry_run: bool,
) -> Result<CmdResult> {
    let source = resolve_node(tree, source)?;
    let target = resolve_parent(tree, target)?;

    if target.key() == source.key() {
        return Err(ZettelError::InvalidMove(format!(
            "cannot move '{}' under itself",
            source.zettel_id()
        )));
    }
    if target.zettel_id().is_descendant_of(source.zettel_id()) {
        return Err(ZettelError::InvalidMove(format!(
            "cannot move '{}' under its own descendant '{}'",
            source.zettel_id(),
            target.zettel_id()
        )));
    }

    // A node already under `target` still gets the lowest free slot there.
    let mut result = CmdResult::default();
    let remap = remapper.remap_under_parent(tree, source, target.zettel_id())?;
    let new_root = remap
        .root_entry()
        .map(|e| e.to.to_string())
        .unwrap_or_default();

    if remap.is_identity() {
        result.add_message(CmdMessage::info(format!(
            "'{}' already has the lowest free slot under {}",
            source.zettel_id(),
            fmt_parent(target.zettel_id())
        )));
        return Ok(result.with_remap(remap));
    }

    if dry_run {
        result.add_message(CmdMessage::info(format!(
            "Would move '{}' to '{}' ({})",
            source.zettel_id(),
            new_root,
            fmt_count(remap.len(), "identifier")
        )));
        return Ok(result.with_remap(remap));
    }

    let written = apply_remap(store, tree, &remap)?;
    result.add_message(CmdMessage::success(format!(
        "Moved '{}' to '{}' ({} updated)",
        source.zettel_id(),
        new_root,
        fmt_count(written.len(), "note")
    )));
    Ok(result.with_notes(written).with_remap(remap))
}
