//! # Rendering
//!
//! Turns [`CmdResult`] values into text. Every function returns a `String` and never
//! prints, so the output can be tested without a terminal.
//!
//! ## Tree Layout
//!
//! One line per node in display order, indented two spaces per level below the top:
//!
//! ```text
//! 1 Thinking
//!   1.a Fast and slow
//!     1.a.1 (no note)
//!       1.a.1.a Anchoring
//! 2 Writing
//! ```
//!
//! Path nodes (identifiers implied by a descendant but carried by no note) are shown
//! dimmed with a placeholder instead of a title.

use super::styles;
use zettelapp::commands::{CmdMessage, CmdResult, MessageLevel, TreeEntry};
use zettelapp::model::Note;
use zettelapp::remap::Remap;

pub const INDENT: &str = "  ";
pub const PATH_NODE_LABEL: &str = "(no note)";
pub const ARROW: &str = "→";

/// Which parts of a result the text output shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Tree,
    Notes,
    ZettelId,
    Remap,
    Messages,
}

/// Renders `result` for the terminal, or as pretty JSON when `json` is set.
pub fn render(result: &CmdResult, view: View, json: bool) -> serde_json::Result<String> {
    if json {
        return serde_json::to_string_pretty(result).map(|mut s| {
            s.push('\n');
            s
        });
    }

    let mut out = String::new();
    match view {
        View::Tree => out.push_str(&render_tree(&result.entries)),
        View::Notes => out.push_str(&render_notes(&result.notes)),
        View::ZettelId => {
            if let Some(id) = &result.zettel_id {
                out.push_str(&format!("{}\n", id));
            }
        }
        View::Remap | View::Messages => {}
    }
    out.push_str(&render_messages(&result.messages));
    if view == View::Remap {
        if let Some(remap) = &result.remap {
            out.push_str(&render_remap(remap));
        }
    }
    Ok(out)
}

pub fn render_tree(entries: &[TreeEntry]) -> String {
    if entries.is_empty() {
        return format!(
            "{}\n",
            styles::INFO.apply_to("No identified notes yet (see `zettel unfiled`).")
        );
    }

    let mut out = String::new();
    for entry in entries {
        let indent = INDENT.repeat(entry.depth.saturating_sub(1));
        let label = if entry.is_path_node() {
            styles::PATH_NODE.apply_to(PATH_NODE_LABEL).to_string()
        } else {
            entry
                .notes
                .iter()
                .map(|n| styles::TITLE.apply_to(&n.title).to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        out.push_str(&format!(
            "{}{} {}\n",
            indent,
            styles::ID.apply_to(&entry.zettel_id),
            label
        ));
    }
    out
}

pub fn render_notes(notes: &[Note]) -> String {
    if notes.is_empty() {
        return format!("{}\n", styles::INFO.apply_to("No unfiled notes."));
    }

    let mut out = String::new();
    for note in notes {
        out.push_str(&format!(
            "{} {}\n",
            styles::TITLE.apply_to(&note.title),
            styles::MUTED.apply_to(format!("({})", note.path.display()))
        ));
    }
    out
}

pub fn render_remap(remap: &Remap) -> String {
    let mut out = String::new();
    for entry in remap.iter() {
        out.push_str(&format!(
            "{}{} {} {}\n",
            INDENT,
            styles::MUTED.apply_to(&entry.from),
            styles::ARROW.apply_to(ARROW),
            styles::ID.apply_to(&entry.to)
        ));
    }
    out
}

pub fn render_messages(messages: &[CmdMessage]) -> String {
    let mut out = String::new();
    for message in messages {
        let style = match message.level {
            MessageLevel::Info => &*styles::INFO,
            MessageLevel::Success => &*styles::SUCCESS,
            MessageLevel::Warning => &*styles::WARNING,
            MessageLevel::Error => &*styles::ERROR,
        };
        out.push_str(&format!("{}\n", style.apply_to(&message.content)));
    }
    out
}
