use crate::config::ZettelConfig;
use crate::error::{Result, ZettelError};
use crate::model::Note;
use crate::remap::Remap;
use crate::store::NoteStore;
use crate::tree::{Node, ZettelTree};
use crate::zettel_id::ZettelId;
use tracing::{debug, info};

/// Builds the tree from every note the path filter accepts.
pub fn build_tree<S: NoteStore>(store: &S, config: &ZettelConfig) -> Result<ZettelTree<Note>> {
    let filter = config.path_filter();
    let notes = store.list_notes()?;
    let entries = notes
        .into_iter()
        .filter(|note| filter.accepts(&note.path))
        .map(|note| (note.zettel_id.clone(), note));
    Ok(ZettelTree::build(entries, config.sort_order))
}

/// Parses user input into an identifier, rejecting input with no segments.
pub fn parse_id(raw: &str) -> Result<ZettelId> {
    let zettel_id = ZettelId::parse(raw);
    if zettel_id.is_root() {
        return Err(ZettelError::InvalidId(format!(
            "'{}' contains no identifier segments",
            raw.trim()
        )));
    }
    Ok(zettel_id)
}

/// Finds the node for user input `raw`. Path nodes without notes resolve too.
pub fn resolve_node<'a, D>(tree: &'a ZettelTree<D>, raw: &str) -> Result<&'a Node<D>> {
    let zettel_id = parse_id(raw)?;
    tree.get(&zettel_id)
        .ok_or_else(|| ZettelError::NodeNotFound(zettel_id.to_string()))
}

/// Like [`resolve_node`], but `None` stands for the root.
pub fn resolve_parent<'a, D>(tree: &'a ZettelTree<D>, raw: Option<&str>) -> Result<&'a Node<D>> {
    match raw {
        Some(raw) => resolve_node(tree, raw),
        None => Ok(tree.root()),
    }
}

/// Performs the writes for `remap` and returns the notes that changed.
///
/// Notes whose stored identifier already equals the target are left alone. Stops at
/// the first failing write; earlier writes stay applied.
pub fn apply_remap<S: NoteStore>(
    store: &mut S,
    tree: &ZettelTree<Note>,
    remap: &Remap,
) -> Result<Vec<Note>> {
    let mut written = Vec::new();
    for write in remap.writes(tree) {
        let target = write.to.to_string();
        if write.document.zettel_id.as_deref() == Some(target.as_str()) {
            debug!(path = %write.document.path.display(), "identifier unchanged");
            continue;
        }
        store.write_zettel_id(&write.document.path, &target)?;
        written.push(Note {
            zettel_id: Some(target),
            ..write.document.clone()
        });
    }
    info!(
        entries = remap.len(),
        writes = written.len(),
        "applied identifier remap"
    );
    Ok(written)
}

/// `1 note` / `3 notes`.
pub fn fmt_count(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

/// Display form of a parent for messages.
pub fn fmt_parent(zettel_id: &ZettelId) -> String {
    if zettel_id.is_root() {
        "the top level".to_string()
    } else {
        zettel_id.to_string()
    }
}
