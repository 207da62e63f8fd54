use crate::commands::helpers::parse_id;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Note;
use crate::store::NoteStore;
use crate::tree::ZettelTree;
use std::path::Path;

/// Writes `zettel_id` into the note at `path`. Descendants are not touched.
///
/// Sharing an identifier with another note is allowed but reported.
pub fn run<S: NoteStore>(
    store: &mut S,
    tree: &ZettelTree<Note>,
    path: &Path,
    zettel_id: &str,
) -> Result<CmdResult> {
    let zettel_id = parse_id(zettel_id)?;
    let rendered = zettel_id.to_string();

    let mut result = CmdResult::default();
    if let Some(node) = tree.get(&zettel_id) {
        let others = node.documents().iter().filter(|n| n.path != path).count();
        if others > 0 {
            result.add_message(CmdMessage::warning(format!(
                "'{}' is already used by {} other note(s)",
                rendered, others
            )));
        }
    }

    store.write_zettel_id(path, &rendered)?;
    result.add_message(CmdMessage::success(format!(
        "Set {} of {} to '{}'",
        store.id_property(),
        path.display(),
        rendered
    )));
    let note = Note::new(path, Some(rendered));
    Ok(result.with_zettel_id(zettel_id).with_notes(vec![note]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::helpers::build_tree;
    use crate::commands::MessageLevel;
    use crate::config::ZettelConfig;
    use crate::error::ZettelError;
    use crate::store::memory::InMemoryStore;

    fn set_id(store: &mut InMemoryStore, path: &str, id: &str) -> Result<CmdResult> {
        let tree = build_tree(&*store, &ZettelConfig::default())?;
        run(store, &tree, Path::new(path), id)
    }

    #[test]
    fn test_set_id_on_unfiled_note() {
        let mut store = InMemoryStore::new();
        store.insert("idea.md", "# Idea\n");
        let result = set_id(&mut store, "idea.md", " 3.b ").unwrap();
        assert_eq!(store.zettel_id_of("idea.md").as_deref(), Some("3.b"));
        assert_eq!(
            store.content("idea.md").unwrap(),
            "---\nzettel_id: \"3.b\"\n---\n# Idea\n"
        );
        assert_eq!(result.messages.len(), 1);
    }

    #[test]
    fn test_duplicate_warns() {
        let mut store = InMemoryStore::new();
        store.insert_note("a.md", "1");
        store.insert_note("b.md", "2");
        let result = set_id(&mut store, "b.md", "1").unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert_eq!(store.zettel_id_of("b.md").as_deref(), Some("1"));
    }

    #[test]
    fn test_missing_note_and_empty_id() {
        let mut store = InMemoryStore::new();
        store.insert_note("a.md", "1");
        assert!(matches!(
            set_id(&mut store, "nope.md", "2"),
            Err(ZettelError::NoteNotFound(_))
        ));
        assert!(matches!(
            set_id(&mut store, "a.md", " "),
            Err(ZettelError::InvalidId(_))
        ));
    }
}
