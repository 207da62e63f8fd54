use crate::remap::RemapError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ZettelError {
    #[error("Note not found: {}", .0.display())]
    NoteNotFound(PathBuf),

    #[error("Note already exists: {}", .0.display())]
    NoteExists(PathBuf),

    #[error("No note or path node with id '{0}'")]
    NodeNotFound(String),

    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    #[error("Invalid move: {0}")]
    InvalidMove(String),

    #[error(transparent)]
    Remap(#[from] RemapError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Frontmatter error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, ZettelError>;
