use crate::allocator::{next_child, next_root};
use crate::commands::helpers::{resolve_node, resolve_parent};
use crate::commands::{CmdMessage, CmdResult};
use crate::config::ZettelConfig;
use crate::error::{Result, ZettelError};
use crate::frontmatter::apply_template;
use crate::model::Note;
use crate::store::NoteStore;
use crate::tree::ZettelTree;
use crate::zettel_id::ZettelId;
use std::path::{Path, PathBuf};

/// Creates a note carrying the next free identifier under `parent` (or at the top
/// level).
///
/// The note goes to `new_note_root` when configured, otherwise next to the parent's
/// first note, otherwise to the vault root. Its name is `title` when given, else
/// `zettel <id>`.
pub fn run<S: NoteStore>(
    store: &mut S,
    tree: &ZettelTree<Note>,
    config: &ZettelConfig,
    parent: Option<&str>,
    title: Option<&str>,
) -> Result<CmdResult> {
    let parent = resolve_parent(tree, parent)?;
    let zettel_id = if parent.is_root() {
        next_root(tree)
    } else {
        next_child(tree, parent)
    };
    let folder = target_folder(config, parent.documents().first());
    create_with_id(store, config, zettel_id, &folder, title)
}

/// Creates the first note for `zettel_id`, which must be an existing path node: an
/// identifier implied by descendants but carried by no note yet.
///
/// The note is placed like a child of the node's nearest ancestor that has a note.
pub fn run_at<S: NoteStore>(
    store: &mut S,
    tree: &ZettelTree<Note>,
    config: &ZettelConfig,
    zettel_id: &str,
    title: Option<&str>,
) -> Result<CmdResult> {
    let node = resolve_node(tree, zettel_id)?;
    if !node.documents().is_empty() {
        return Err(ZettelError::InvalidId(format!(
            "'{}' already has a note; use `new {}` for a child",
            node.zettel_id(),
            node.zettel_id()
        )));
    }

    let mut anchor = tree.parent(node);
    while let Some(ancestor) = anchor {
        if !ancestor.documents().is_empty() {
            break;
        }
        anchor = tree.parent(ancestor);
    }
    let folder = target_folder(config, anchor.and_then(|a| a.documents().first()));
    create_with_id(store, config, node.zettel_id().clone(), &folder, title)
}

fn create_with_id<S: NoteStore>(
    store: &mut S,
    config: &ZettelConfig,
    zettel_id: ZettelId,
    folder: &Path,
    title: Option<&str>,
) -> Result<CmdResult> {
    let rendered = zettel_id.to_string();
    let mut result = CmdResult::default();

    let template = match &config.template_path {
        Some(path) => {
            let text = store.read_text(path)?;
            if text.is_none() {
                result.add_message(CmdMessage::warning(format!(
                    "Template {} not found, creating an empty note",
                    path.display()
                )));
            }
            text
        }
        None => None,
    };
    let content = apply_template(template.as_deref(), store.id_property(), &rendered);

    let base_name = match title.map(str::trim).filter(|t| !t.is_empty()) {
        Some(title) => title.to_string(),
        None => format!("zettel {}", rendered),
    };

    let note = store.create_note(folder, &base_name, &content)?;
    result.add_message(CmdMessage::success(format!(
        "Created {} ({})",
        note.path.display(),
        rendered
    )));
    Ok(result.with_zettel_id(zettel_id).with_notes(vec![note]))
}

/// Folder for a new note whose parent's first note is `parent_note`.
pub fn target_folder(config: &ZettelConfig, parent_note: Option<&Note>) -> PathBuf {
    config
        .new_note_root()
        .cloned()
        .or_else(|| parent_note.map(|n| n.folder().to_path_buf()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::helpers::build_tree;
    use crate::commands::MessageLevel;
    use crate::store::memory::InMemoryStore;

    fn setup() -> InMemoryStore {
        let store = InMemoryStore::new();
        store.insert_note("Zettels/one.md", "1");
        store.insert_note("Zettels/one-a.md", "1.a");
        store
    }

    fn create(
        store: &mut InMemoryStore,
        config: &ZettelConfig,
        parent: Option<&str>,
        title: Option<&str>,
    ) -> CmdResult {
        let tree = build_tree(&*store, config).unwrap();
        run(store, &tree, config, parent, title).unwrap()
    }

    #[test]
    fn test_create_child_next_to_parent() {
        let mut store = setup();
        let result = create(&mut store, &ZettelConfig::default(), Some("1"), None);

        let note = &result.notes[0];
        assert_eq!(note.path, PathBuf::from("Zettels/zettel 1.b.md"));
        assert_eq!(note.zettel_id.as_deref(), Some("1.b"));
        assert_eq!(
            store.content("Zettels/zettel 1.b.md").unwrap(),
            "---\nzettel_id: \"1.b\"\n---\n\n"
        );
        assert_eq!(result.messages[0].level, MessageLevel::Success);
    }

    #[test]
    fn test_create_root_uses_vault_root_and_title() {
        let mut store = setup();
        let result = create(
            &mut store,
            &ZettelConfig::default(),
            None,
            Some("Idea: what/why"),
        );
        assert_eq!(result.zettel_id.unwrap().to_string(), "2");
        assert_eq!(result.notes[0].path, PathBuf::from("Idea- what-why.md"));
    }

    #[test]
    fn test_create_uses_new_note_root_and_template() {
        let mut store = setup();
        store.insert(
            "Templates/zettel.md",
            "---\ntags: [draft]\nzettel_id: x\n---\n# New\n",
        );
        let config = ZettelConfig {
            template_path: Some(PathBuf::from("Templates/zettel.md")),
            new_note_root: Some(PathBuf::from("Inbox")),
            exclude_paths: vec!["Templates".to_string()],
            ..Default::default()
        };
        let result = create(&mut store, &config, Some("1.a"), None);

        let path = Path::new("Inbox/zettel 1.a.1.md");
        assert_eq!(result.notes[0].path, path);
        assert_eq!(
            store.content(path).unwrap(),
            "---\ntags: [draft]\nzettel_id: \"1.a.1\"\n---\n\n# New\n"
        );
    }

    #[test]
    fn test_missing_template_warns() {
        let mut store = setup();
        let config = ZettelConfig {
            template_path: Some(PathBuf::from("missing.md")),
            ..Default::default()
        };
        let result = create(&mut store, &config, None, None);
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert_eq!(result.notes.len(), 1);
    }

    #[test]
    fn test_create_under_path_node_goes_to_vault_root() {
        let mut store = InMemoryStore::new();
        store.insert_note("deep/x.md", "4.a.1");
        let result = create(&mut store, &ZettelConfig::default(), Some("4"), None);
        assert_eq!(result.notes[0].path, PathBuf::from("zettel 4.b.md"));
    }

    fn create_at(
        store: &mut InMemoryStore,
        zettel_id: &str,
        title: Option<&str>,
    ) -> Result<CmdResult> {
        let config = ZettelConfig::default();
        let tree = build_tree(&*store, &config)?;
        run_at(store, &tree, &config, zettel_id, title)
    }

    #[test]
    fn test_create_at_path_node() {
        let mut store = setup();
        store.insert_note("Deep/anchoring.md", "1.a.1.a");
        let result = create_at(&mut store, "1.a.1", None).unwrap();

        assert_eq!(result.zettel_id.unwrap().to_string(), "1.a.1");
        assert_eq!(result.notes[0].path, PathBuf::from("Zettels/zettel 1.a.1.md"));
        assert_eq!(
            store.zettel_id_of("Zettels/zettel 1.a.1.md").as_deref(),
            Some("1.a.1")
        );
        assert_eq!(store.zettel_id_of("Deep/anchoring.md").as_deref(), Some("1.a.1.a"));
    }

    #[test]
    fn test_create_at_top_level_path_node() {
        let mut store = InMemoryStore::new();
        store.insert_note("deep/x.md", "4.a.1");
        let result = create_at(&mut store, "4", Some("Four")).unwrap();
        assert_eq!(result.notes[0].path, PathBuf::from("Four.md"));
        assert_eq!(store.zettel_id_of("Four.md").as_deref(), Some("4"));
    }

    #[test]
    fn test_create_at_rejects_filed_or_unknown_ids() {
        let mut store = setup();
        assert!(matches!(
            create_at(&mut store, "1.a", None),
            Err(ZettelError::InvalidId(_))
        ));
        assert!(matches!(
            create_at(&mut store, "7", None),
            Err(ZettelError::NodeNotFound(_))
        ));
        assert_eq!(store.list_notes().unwrap().len(), 2);
    }

    #[test]
    fn test_target_folder() {
        let note = Note::new("Z/a.md", Some("1".into()));
        assert_eq!(
            target_folder(&ZettelConfig::default(), Some(&note)),
            PathBuf::from("Z")
        );
        assert_eq!(target_folder(&ZettelConfig::default(), None), PathBuf::new());
    }
}
