use crate::commands::CmdResult;
use crate::config::ZettelConfig;
use crate::error::Result;
use crate::store::NoteStore;

/// Notes without an identifier, sorted by title.
pub fn run<S: NoteStore>(store: &S, config: &ZettelConfig) -> Result<CmdResult> {
    let filter = config.path_filter();
    let mut notes: Vec<_> = store
        .list_notes()?
        .into_iter()
        .filter(|note| !note.is_filed() && filter.accepts(&note.path))
        .collect();
    notes.sort_by(|a, b| {
        a.title
            .to_lowercase()
            .cmp(&b.title.to_lowercase())
            .then_with(|| a.title.cmp(&b.title))
            .then_with(|| a.path.cmp(&b.path))
    });
    Ok(CmdResult::default().with_notes(notes))
}
