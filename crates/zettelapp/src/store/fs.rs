use super::{is_note_path, note_from_content, renamed_path, unique_note_path, NoteStore};
use crate::config::DEFAULT_ID_PROPERTY;
use crate::error::{Result, ZettelError};
use crate::frontmatter;
use crate::model::Note;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

/// A vault on disk: a directory tree of markdown notes.
pub struct VaultStore {
    root: PathBuf,
    id_property: String,
}

impl VaultStore {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            id_property: DEFAULT_ID_PROPERTY.to_string(),
        }
    }

    pub fn with_id_property(mut self, prop: &str) -> Self {
        self.id_property = prop.to_string();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(ZettelError::Io)?;
        }
        Ok(())
    }

    fn collect(&self, dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
        for entry in fs::read_dir(dir).map_err(ZettelError::Io)? {
            let entry = entry.map_err(ZettelError::Io)?;
            let path = entry.path();
            let hidden = entry.file_name().to_string_lossy().starts_with('.');
            let file_type = entry.file_type().map_err(ZettelError::Io)?;

            if file_type.is_dir() {
                if !hidden {
                    self.collect(&path, out)?;
                }
            } else if file_type.is_file() && is_note_path(&path) {
                out.push(path);
            }
        }
        Ok(())
    }

    fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }

    /// Write via a temp file in the same directory, then rename over the target.
    fn write_atomic(&self, path: &Path, content: &str) -> Result<()> {
        let dir = path.parent().unwrap_or(self.root.as_path());
        let tmp_file = dir.join(format!(".zettel-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(ZettelError::Io)?;
        if let Err(e) = fs::rename(&tmp_file, path) {
            let _ = fs::remove_file(&tmp_file);
            return Err(ZettelError::Io(e));
        }
        Ok(())
    }
}

impl NoteStore for VaultStore {
    fn list_notes(&self) -> Result<Vec<Note>> {
        let mut paths = Vec::new();
        self.collect(&self.root, &mut paths)?;
        paths.sort();

        let mut notes = Vec::with_capacity(paths.len());
        for path in paths {
            let content = fs::read_to_string(&path).map_err(ZettelError::Io)?;
            let relative = self.relative(&path).to_path_buf();
            notes.push(note_from_content(relative, &content, &self.id_property));
        }
        debug!(root = %self.root.display(), notes = notes.len(), "listed vault notes");
        Ok(notes)
    }

    fn write_zettel_id(&mut self, path: &Path, zettel_id: &str) -> Result<()> {
        let full = self.root.join(path);
        if !full.is_file() {
            return Err(ZettelError::NoteNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(&full).map_err(ZettelError::Io)?;
        let updated = frontmatter::set_property(&content, &self.id_property, zettel_id);
        self.write_atomic(&full, &updated)?;
        info!(path = %path.display(), zettel_id, "wrote identifier");
        Ok(())
    }

    fn create_note(&mut self, folder: &Path, base_name: &str, content: &str) -> Result<Note> {
        let dir = self.root.join(folder);
        self.ensure_dir(&dir)?;

        let relative = unique_note_path(folder, base_name, |p| self.root.join(p).exists());
        self.write_atomic(&self.root.join(&relative), content)?;
        info!(path = %relative.display(), "created note");
        Ok(note_from_content(relative, content, &self.id_property))
    }

    fn delete_note(&mut self, path: &Path) -> Result<()> {
        let full = self.root.join(path);
        if !full.is_file() {
            return Err(ZettelError::NoteNotFound(path.to_path_buf()));
        }
        fs::remove_file(&full).map_err(ZettelError::Io)?;
        info!(path = %path.display(), "deleted note");
        Ok(())
    }

    fn rename_note(&mut self, path: &Path, base_name: &str) -> Result<Note> {
        let full = self.root.join(path);
        if !full.is_file() {
            return Err(ZettelError::NoteNotFound(path.to_path_buf()));
        }
        let relative = renamed_path(path, base_name);
        let target = self.root.join(&relative);
        if relative != path && target.exists() {
            return Err(ZettelError::NoteExists(relative));
        }
        fs::rename(&full, &target).map_err(ZettelError::Io)?;
        info!(from = %path.display(), to = %relative.display(), "renamed note");

        let content = fs::read_to_string(&target).map_err(ZettelError::Io)?;
        Ok(note_from_content(relative, &content, &self.id_property))
    }

    fn read_text(&self, path: &Path) -> Result<Option<String>> {
        let full = self.root.join(path);
        if !full.is_file() {
            return Ok(None);
        }
        fs::read_to_string(&full).map(Some).map_err(ZettelError::Io)
    }

    fn id_property(&self) -> &str {
        &self.id_property
    }
}
