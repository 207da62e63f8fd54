//! Styles for the zettel CLI.
//!
//! Renderers never pick colors directly. They refer to a semantic style by what the
//! text *is* (an identifier, a path node, a warning) and this module decides how it
//! looks. All styles are built once through `once_cell::sync::Lazy`.
//!
//! `console` drops the escape codes when stdout is not a terminal, and `--no-color`
//! or `NO_COLOR` turn them off globally.
//!
//! The shared style tokens are:
//!
//!     * Identifier (the node's id in the tree)
//!     * Title (note titles next to an id)
//!     * Path node (an implied ancestor with no note, dimmed)
//!     * Muted (paths and other metadata)
//!     * Arrow (the `→` in remap listings)
//!     * Message levels: info, success, warning, error

use console::Style;
use once_cell::sync::Lazy;

pub static ID: Lazy<Style> = Lazy::new(|| Style::new().yellow().bold());
pub static TITLE: Lazy<Style> = Lazy::new(Style::new);
pub static PATH_NODE: Lazy<Style> = Lazy::new(|| Style::new().dim().italic());
pub static MUTED: Lazy<Style> = Lazy::new(|| Style::new().color256(245));
pub static ARROW: Lazy<Style> = Lazy::new(|| Style::new().cyan());

pub static INFO: Lazy<Style> = Lazy::new(|| Style::new().color256(245));
pub static SUCCESS: Lazy<Style> = Lazy::new(|| Style::new().green());
pub static WARNING: Lazy<Style> = Lazy::new(|| Style::new().yellow().bold());
pub static ERROR: Lazy<Style> = Lazy::new(|| Style::new().red().bold());
