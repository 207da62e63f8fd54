//! # Notes
//!
//! A [`Note`] is one markdown file in the vault as seen by the engine: its
//! vault-relative path, a display title (the file stem), and the raw identifier read
//! from its frontmatter. The raw text is kept as written; parsing into a
//! [`ZettelId`](crate::zettel_id::ZettelId) happens when the tree is built.
//!
//! Notes are the document handle stored in the tree (`ZettelTree<Note>`), so a node
//! knows exactly which files to rewrite when it moves.

use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    /// Path relative to the vault root, using the platform separator.
    pub path: PathBuf,
    pub title: String,
    /// Identifier text as found in the frontmatter. `None` means the note is unfiled.
    pub zettel_id: Option<String>,
}

impl Note {
    pub fn new(path: impl Into<PathBuf>, zettel_id: Option<String>) -> Self {
        let path = path.into();
        let title = title_from_path(&path);
        Self {
            path,
            title,
            zettel_id,
        }
    }

    pub fn is_filed(&self) -> bool {
        self.zettel_id.is_some()
    }

    /// Folder holding the note, relative to the vault root. Empty for top-level notes.
    pub fn folder(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }
}

/// File stem of `path`, or the whole file name when it has no stem.
pub fn title_from_path(path: &Path) -> String {
    path.file_stem()
        .or_else(|| path.file_name())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
