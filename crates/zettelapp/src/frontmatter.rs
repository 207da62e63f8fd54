//! # Frontmatter: Where Identifiers Live
//!
//! A note's identifier is stored in its YAML frontmatter under a configurable property
//! (default `zettel_id`):
//!
//! ```text
//! ---
//! zettel_id: "1.a.2"
//! tags: [idea]
//! ---
//! Body…
//! ```
//!
//! ## Reading
//!
//! [`read_property`] parses the block with `serde_yaml`. String values are trimmed and
//! an empty string counts as absent. Integer and float scalars are accepted and
//! rendered back to text (`zettel_id: 12` reads as `"12"`). Anything else (lists,
//! maps, booleans) counts as absent.
//!
//! ## Writing
//!
//! Edits are line-based so that everything except the identifier line survives
//! byte-for-byte (comments, key order, body). The value is always written as a
//! double-quoted YAML string, which keeps `1.10` from turning into the float `1.1`.
//! Line endings are normalised to `\n` and a leading byte order mark is dropped.
//!
//! [`apply_template`] builds the content of a brand-new note from an optional template.

use crate::error::Result;
use serde_yaml::Value;

const FENCE: &str = "---";

fn normalize(content: &str) -> String {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    content.replace("\r\n", "\n")
}

/// Splits `content` into frontmatter lines and the body following the closing fence.
fn split(content: &str) -> Option<(Vec<&str>, &str)> {
    let (opening, rest) = content.split_once('\n')?;
    if opening.trim_end() != FENCE {
        return None;
    }
    let mut offset = 0;
    let mut lines = Vec::new();
    for line in rest.split_inclusive('\n') {
        let bare = line.trim_end_matches('\n');
        if bare.trim_end() == FENCE {
            return Some((lines, &rest[offset + line.len()..]));
        }
        lines.push(bare);
        offset += line.len();
    }
    None
}

fn is_property_line(line: &str, prop: &str) -> bool {
    line.trim_start()
        .strip_prefix(prop)
        .is_some_and(|rest| rest.trim_start().starts_with(':'))
}

fn property_line(prop: &str, value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("{}: \"{}\"", prop, escaped)
}

/// Reads a scalar property from the leading frontmatter block.
///
/// Returns `Ok(None)` when there is no block, no such property, or the value is not a
/// usable scalar. Returns an error only when the block is not valid YAML.
pub fn read_property(content: &str, prop: &str) -> Result<Option<String>> {
    let content = normalize(content);
    let Some((lines, _)) = split(&content) else {
        return Ok(None);
    };
    if lines.iter().all(|l| l.trim().is_empty()) {
        return Ok(None);
    }

    let value: Value = serde_yaml::from_str(&lines.join("\n"))?;
    let found = match value.get(prop) {
        Some(Value::String(s)) => Some(s.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };
    Ok(found.filter(|s| !s.is_empty()))
}

/// Sets `prop` to `value`, leaving every other line untouched.
///
/// A missing block is created at the top; a missing property is appended to the block.
pub fn set_property(content: &str, prop: &str, value: &str) -> String {
    let content = normalize(content);
    let line = property_line(prop, value);

    let Some((mut lines, body)) = split(&content) else {
        return format!("{FENCE}\n{line}\n{FENCE}\n{content}");
    };

    match lines.iter().position(|l| is_property_line(l, prop)) {
        Some(pos) => lines[pos] = line.as_str(),
        None => lines.push(line.as_str()),
    }
    format!("{FENCE}\n{}\n{FENCE}\n{body}", lines.join("\n"))
}

/// Content for a new note carrying `id`, merged into `template` when one is given.
pub fn apply_template(template: Option<&str>, prop: &str, id: &str) -> String {
    let line = property_line(prop, id);

    let template = template.map(normalize).unwrap_or_default();
    if template.trim().is_empty() {
        return format!("{FENCE}\n{line}\n{FENCE}\n\n");
    }

    let Some((mut lines, body)) = split(&template) else {
        return format!("{FENCE}\n{line}\n{FENCE}\n{template}");
    };
    match lines.iter().position(|l| is_property_line(l, prop)) {
        Some(pos) => lines[pos] = line.as_str(),
        None => lines.push(line.as_str()),
    }
    // One blank line between the block and a non-empty body.
    let sep = if !body.is_empty() && !body.starts_with('\n') {
        "\n"
    } else {
        ""
    };
    format!("{FENCE}\n{}\n{FENCE}\n{sep}{body}", lines.join("\n"))
}
