//! # Command Layer
//!
//! This module contains the **core business logic** of zettel. Each command lives in
//! its own submodule and implements plain Rust functions over a [`NoteStore`] and an
//! already-built [`ZettelTree`].
//!
//! ## Role and Responsibilities
//!
//! Commands are where the real work happens:
//! - Resolve identifiers given by the user to tree nodes
//! - Validate requests (no moving a note under itself)
//! - Ask the engine for ids and remaps, then perform the resulting writes
//! - Return structured [`CmdResult`] values with messages
//!
//! ## What Commands Do NOT Do
//!
//! - **Terminal I/O**: No stdout, stderr or formatting
//! - **Tree caching**: The API owns the cache and invalidates it after writes
//! - **Exit codes**: Return `Result`, let the caller decide
//!
//! ## Testing Strategy
//!
//! **This is where the lion's share of testing lives.** Command tests use
//! [`InMemoryStore`](crate::store::memory::InMemoryStore) and check both the returned
//! `CmdResult` and what ended up in the store.
//!
//! ## Command Modules
//!
//! - [`tree`]: Flattened tree listing
//! - [`unfiled`]: Notes without an identifier
//! - [`next`]: Preview the next free identifier
//! - [`create`]: Create a note with the next free identifier, or for a path node
//! - [`delete`]: Delete a note together with its subtree
//! - [`rename`]: Rename a note's file
//! - [`move_note`]: Move a subtree under another parent
//! - [`renumber`]: Move a subtree to an explicit identifier
//! - [`set_id`]: Edit one note's identifier directly
//! - [`init`]: Mark a directory as a vault
//! - [`helpers`]: Tree building, node resolution, applying remaps

use crate::model::Note;
use crate::remap::Remap;
use crate::zettel_id::ZettelId;
use serde::Serialize;

#[cfg(doc)]
use crate::{store::NoteStore, tree::ZettelTree};

pub mod create;
pub mod delete;
pub mod helpers;
pub mod init;
pub mod move_note;
pub mod next;
pub mod rename;
pub mod renumber;
pub mod set_id;
pub mod tree;
pub mod unfiled;

pub use tree::TreeEntry;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct CmdResult {
    /// Tree rows, for `tree`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub entries: Vec<TreeEntry>,
    /// Notes listed (`unfiled`), written (`create`, `move`, `renumber`, `set-id`,
    /// `rename`) or deleted.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<Note>,
    /// Computed renumbering, applied or not (dry run).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remap: Option<Remap>,
    /// Identifier allocated or previewed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zettel_id: Option<ZettelId>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_entries(mut self, entries: Vec<TreeEntry>) -> Self {
        self.entries = entries;
        self
    }

    pub fn with_notes(mut self, notes: Vec<Note>) -> Self {
        self.notes = notes;
        self
    }

    pub fn with_remap(mut self, remap: Remap) -> Self {
        self.remap = Some(remap);
        self
    }

    pub fn with_zettel_id(mut self, zettel_id: ZettelId) -> Self {
        self.zettel_id = Some(zettel_id);
        self
    }
}
