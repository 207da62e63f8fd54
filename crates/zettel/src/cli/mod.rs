//! # CLI Behavior
//!
//! This is **one possible UI client** for zettel, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and output formatting.
//!
//! ## Naked Execution (`zettel`)
//!
//! Running `zettel` with no arguments defaults to `zettel tree`.
//!
//! ## Vault Resolution
//!
//! The vault is the nearest ancestor of the current directory holding `.zettel/`,
//! or the current directory itself. `--vault DIR` skips the search.
//!
//! ## Output
//!
//! Text output is styled when stdout is a terminal. `--json` prints the command's
//! structured result instead. Logs go to stderr and are off unless `--verbose` is set.
//!
//! ## Module Structure
//!
//! - `setup`: Argument parsing via clap, version string, tracing
//! - `commands`: Context setup and dispatch to the API
//! - `render`: Output formatting
//! - `styles`: Terminal styling constants

mod commands;
mod render;
pub mod setup;
mod styles;

pub use commands::run;
