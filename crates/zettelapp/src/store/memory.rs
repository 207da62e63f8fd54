use super::{is_note_path, note_from_content, renamed_path, unique_note_path, NoteStore};
use crate::config::DEFAULT_ID_PROPERTY;
use crate::error::{Result, ZettelError};
use crate::frontmatter;
use crate::model::Note;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// In-memory vault for testing.
///
/// Uses `RefCell` so that tests can inspect contents and toggle failure simulation
/// through a shared reference.
pub struct InMemoryStore {
    files: RefCell<BTreeMap<PathBuf, String>>,
    id_property: String,
    simulate_write_error: RefCell<bool>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self {
            files: RefCell::new(BTreeMap::new()),
            id_property: DEFAULT_ID_PROPERTY.to_string(),
            simulate_write_error: RefCell::new(false),
        }
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id_property(mut self, prop: &str) -> Self {
        self.id_property = prop.to_string();
        self
    }

    /// Adds or replaces a file.
    pub fn insert(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files.borrow_mut().insert(path.into(), content.into());
    }

    /// Adds a note whose frontmatter carries `zettel_id`.
    pub fn insert_note(&self, path: impl Into<PathBuf>, zettel_id: &str) {
        let content = frontmatter::set_property("", &self.id_property, zettel_id);
        self.insert(path, content);
    }

    pub fn content(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.borrow().get(path.as_ref()).cloned()
    }

    /// Identifier currently stored in the note at `path`.
    pub fn zettel_id_of(&self, path: impl AsRef<Path>) -> Option<String> {
        let content = self.content(path)?;
        frontmatter::read_property(&content, &self.id_property)
            .ok()
            .flatten()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    fn check_writable(&self) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(ZettelError::Store("Simulated write error".to_string()));
        }
        Ok(())
    }
}

impl NoteStore for InMemoryStore {
    fn list_notes(&self) -> Result<Vec<Note>> {
        Ok(self
            .files
            .borrow()
            .iter()
            .filter(|(path, _)| is_note_path(path))
            .map(|(path, content)| note_from_content(path.clone(), content, &self.id_property))
            .collect())
    }

    fn write_zettel_id(&mut self, path: &Path, zettel_id: &str) -> Result<()> {
        self.check_writable()?;
        let mut files = self.files.borrow_mut();
        let content = files
            .get_mut(path)
            .ok_or_else(|| ZettelError::NoteNotFound(path.to_path_buf()))?;
        *content = frontmatter::set_property(content, &self.id_property, zettel_id);
        Ok(())
    }

    fn create_note(&mut self, folder: &Path, base_name: &str, content: &str) -> Result<Note> {
        self.check_writable()?;
        let path = {
            let files = self.files.borrow();
            unique_note_path(folder, base_name, |p| files.contains_key(p))
        };
        self.insert(path.clone(), content);
        Ok(note_from_content(path, content, &self.id_property))
    }

    fn delete_note(&mut self, path: &Path) -> Result<()> {
        self.check_writable()?;
        self.files
            .borrow_mut()
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| ZettelError::NoteNotFound(path.to_path_buf()))
    }

    fn rename_note(&mut self, path: &Path, base_name: &str) -> Result<Note> {
        self.check_writable()?;
        let mut files = self.files.borrow_mut();
        if !files.contains_key(path) {
            return Err(ZettelError::NoteNotFound(path.to_path_buf()));
        }
        let target = renamed_path(path, base_name);
        if target != path && files.contains_key(&target) {
            return Err(ZettelError::NoteExists(target));
        }
        let content = files.remove(path).unwrap_or_default();
        let note = note_from_content(target.clone(), &content, &self.id_property);
        files.insert(target, content);
        Ok(note)
    }

    fn read_text(&self, path: &Path) -> Result<Option<String>> {
        Ok(self.content(path))
    }

    fn id_property(&self) -> &str {
        &self.id_property
    }
}
