use crate::commands::helpers::{apply_remap, fmt_count, parse_id, resolve_node};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, ZettelError};
use crate::model::Note;
use crate::remap::Remapper;
use crate::store::NoteStore;
use crate::tree::ZettelTree;

/// Gives `source` the explicit identifier `new_id` and renumbers its subtree below it.
pub fn run<S: NoteStore>(
    store: &mut S,
    tree: &ZettelTree<Note>,
    remapper: &Remapper,
    source: &str,
    new_id: &str,
    dry_run: bool,
) -> Result<CmdResult> {
    let source = resolve_node(tree, source)?;
    let desired = parse_id(new_id)?;

    let mut result = CmdResult::default();
    if &desired == source.zettel_id() {
        result.add_message(CmdMessage::info(format!(
            "'{}' already has that identifier",
            source.zettel_id()
        )));
        return Ok(result);
    }
    if desired.is_descendant_of(source.zettel_id()) {
        return Err(ZettelError::InvalidMove(format!(
            "'{}' lies inside the subtree of '{}'",
            desired,
            source.zettel_id()
        )));
    }

    let remap = remapper.remap_to_explicit_id(tree, source, &desired)?;

    if dry_run {
        result.add_message(CmdMessage::info(format!(
            "Would renumber '{}' to '{}' ({})",
            source.zettel_id(),
            desired,
            fmt_count(remap.len(), "identifier")
        )));
        return Ok(result.with_remap(remap));
    }

    let written = apply_remap(store, tree, &remap)?;
    result.add_message(CmdMessage::success(format!(
        "Renumbered '{}' to '{}' ({} updated)",
        source.zettel_id(),
        desired,
        fmt_count(written.len(), "note")
    )));
    Ok(result.with_notes(written).with_remap(remap))
}
