use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::NoteStore;
use std::path::Path;

/// Renames the note at `path` to `title` inside its current folder.
///
/// The identifier and content are untouched. Renaming onto an existing note fails.
pub fn run<S: NoteStore>(store: &mut S, path: &Path, title: &str) -> Result<CmdResult> {
    let note = store.rename_note(path, title)?;

    let mut result = CmdResult::default();
    if note.path == path {
        result.add_message(CmdMessage::info(format!(
            "{} already has that name",
            path.display()
        )));
    } else {
        result.add_message(CmdMessage::success(format!(
            "Renamed {} to {}",
            path.display(),
            note.path.display()
        )));
    }
    Ok(result.with_notes(vec![note]))
}
