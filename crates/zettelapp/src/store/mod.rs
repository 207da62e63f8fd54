//! # Storage Layer
//!
//! This module defines the storage abstraction for zettel. The [`NoteStore`] trait is
//! the boundary between the identifier engine and wherever notes actually live.
//!
//! ## Philosophy
//!
//! - **Files are Truth**: There is no index or cache on disk. Every listing reads the
//!   frontmatter of every note, and the tree is rebuilt from that.
//! - **One write per document**: Renumbering rewrites the identifier property of each
//!   affected note individually. Nothing else in the file changes.
//!
//! ## Implementations
//!
//! - [`fs::VaultStore`]: A directory of markdown files (dot-directories skipped).
//! - [`memory::InMemoryStore`]: For testing logic without filesystem I/O.
//!
//! ## Note Names
//!
//! [`create_note`](NoteStore::create_note) replaces the characters `\ / : * ? " < > |`
//! in the requested base name with `-` and appends ` (1)`, ` (2)` … until the name is
//! free in the target folder. [`rename_note`](NoteStore::rename_note) sanitizes the
//! same way but refuses to overwrite an existing note.

use crate::error::Result;
use crate::frontmatter;
use crate::model::Note;
use std::path::{Path, PathBuf};
use tracing::warn;

pub mod fs;
pub mod memory;

pub const NOTE_EXT: &str = "md";

/// Abstract interface for note storage.
///
/// Paths passed in and returned are relative to the vault root.
pub trait NoteStore {
    /// All markdown notes, sorted by path.
    fn list_notes(&self) -> Result<Vec<Note>>;

    /// Rewrites the identifier property of the note at `path`.
    fn write_zettel_id(&mut self, path: &Path, zettel_id: &str) -> Result<()>;

    /// Creates a note named after `base_name` in `folder` and returns it.
    fn create_note(&mut self, folder: &Path, base_name: &str, content: &str) -> Result<Note>;

    /// Removes the note at `path`.
    fn delete_note(&mut self, path: &Path) -> Result<()>;

    /// Renames the note at `path` to `base_name` within its folder and returns it.
    fn rename_note(&mut self, path: &Path, base_name: &str) -> Result<Note>;

    /// Raw text of a vault file, `None` when it does not exist.
    fn read_text(&self, path: &Path) -> Result<Option<String>>;

    /// The frontmatter property this store reads identifiers from.
    fn id_property(&self) -> &str;
}

/// Replaces characters that are not allowed in note names.
pub fn sanitize_base_name(base_name: &str) -> String {
    let cleaned: String = base_name
        .trim()
        .chars()
        .map(|c| match c {
            '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c => c,
        })
        .collect();
    if cleaned.is_empty() {
        "untitled".to_string()
    } else {
        cleaned
    }
}

/// First free `<folder>/<base>[ (n)].md` according to `exists`.
pub(crate) fn unique_note_path<F>(folder: &Path, base_name: &str, exists: F) -> PathBuf
where
    F: Fn(&Path) -> bool,
{
    let base = sanitize_base_name(base_name);
    let mut path = folder.join(format!("{}.{}", base, NOTE_EXT));
    let mut counter = 1;
    while exists(&path) {
        path = folder.join(format!("{} ({}).{}", base, counter, NOTE_EXT));
        counter += 1;
    }
    path
}

/// `<folder of path>/<sanitized base>.md`.
pub(crate) fn renamed_path(path: &Path, base_name: &str) -> PathBuf {
    let folder = path.parent().unwrap_or_else(|| Path::new(""));
    folder.join(format!("{}.{}", sanitize_base_name(base_name), NOTE_EXT))
}

/// Builds a [`Note`] from its content. Broken frontmatter makes the note unfiled.
pub(crate) fn note_from_content(path: PathBuf, content: &str, id_property: &str) -> Note {
    let zettel_id = match frontmatter::read_property(content, id_property) {
        Ok(value) => value,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "unparsable frontmatter");
            None
        }
    };
    Note::new(path, zettel_id)
}

pub(crate) fn is_note_path(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(NOTE_EXT))
}
