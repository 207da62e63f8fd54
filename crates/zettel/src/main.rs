//! # Zettel CLI Architecture
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this file
//! only invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/zettelapp/` — the identifier engine and the UI-agnostic vault logic
//! - `crates/zettel/` — this CLI tool, a client of `zettelapp`
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/zettel/src/cli/)                         │
//! │  - clap argument parsing and tracing setup (setup.rs)       │
//! │  - Context wiring and dispatch (commands.rs)                │
//! │  - Terminal and JSON rendering (render.rs, styles.rs)       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/zettelapp/src/api.rs)                    │
//! │  - Owns the store and the cached tree                       │
//! │  - Returns structured `CmdResult` values                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Commands and Engine (crates/zettelapp/src/...)             │
//! │  - Identifier parsing, tree building, allocation, remapping │
//! │  - No knowledge of stdout/stderr or process exits           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The CLI layer is responsible for **all** user-facing concerns: argument parsing,
//! context initialization, dispatch, error reporting, and rendering.
//!
//! ## Testing Approach
//!
//! - Rendering is unit tested against canned `CmdResult` values (`render.rs`).
//! - `tests/cli_e2e.rs` runs the real binary against temporary vaults.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
