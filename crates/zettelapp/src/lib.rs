//! # Zettel Architecture
//!
//! Zettel is a **UI-agnostic library** for navigating and reorganizing a Zettelkasten:
//! a folder of markdown notes whose frontmatter carries hierarchical identifiers such as
//! `1`, `1.a`, `1.a.2`. The CLI is one client of this library.
//!
//! ## The Identifier Engine
//!
//! At the core sits a pure engine with no I/O at all:
//!
//! - [`zettel_id`]: parsing, ordering and incrementing identifiers
//! - [`tree`]: building the hierarchy, including implied path nodes
//! - [`allocator`]: the next free child or top-level identifier
//! - [`remap`]: renumbering a moved subtree without collisions
//! - [`snapshot`]: an owned, invalidatable cache of the built tree
//!
//! The engine is generic over the document type it stores in the tree, so it can be
//! reused by any host. This crate's host layers use [`model::Note`].
//!
//! ## The Host Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (crates/zettel)                                        │
//! │  - Parses arguments, renders output, exit codes             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, owns the tree cache           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Validation, engine calls, applying writes                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - NoteStore trait: VaultStore (disk), InMemoryStore (tests)│
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes regular Rust arguments and returns regular Rust
//! types. It never writes to stdout/stderr and never exits the process. Diagnostics go
//! through `tracing`; installing a subscriber is the client's business.
//!
//! ## Testing Strategy
//!
//! 1. **Engine** (`zettel_id`, `tree`, `allocator`, `remap`): unit tests plus
//!    `proptest` properties for the ordering and increment laws.
//! 2. **Commands**: the lion's share, against `InMemoryStore`.
//! 3. **API**: dispatch and cache invalidation.
//! 4. **Integration** (`tests/`): real vaults in temp directories.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: The `Note` type
//! - [`frontmatter`]: Reading and writing the identifier property
//! - [`filter`]: Include / exclude path rules
//! - [`config`]: Configuration
//! - [`init`]: Vault detection and context setup
//! - [`error`]: Error types

pub mod allocator;
pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod filter;
pub mod frontmatter;
pub mod init;
pub mod model;
pub mod remap;
pub mod snapshot;
pub mod store;
pub mod tree;
pub mod zettel_id;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
