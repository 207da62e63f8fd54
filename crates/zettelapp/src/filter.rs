//! Include / exclude rules for which notes take part in the tree.
//!
//! Paths are vault-relative and matched case-insensitively, with `\` treated as `/`.
//!
//! - **Exclude**: an entry ending in `.md` excludes exactly that file; any other entry
//!   excludes a folder and everything below it.
//! - **Include**: when empty, everything is included. Otherwise a note must lie under
//!   one of the listed folders.
//!
//! Exclusion wins over inclusion.

use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    exclude_files: HashSet<String>,
    exclude_folders: Vec<String>,
    include_folders: Vec<String>,
}

fn normalize(raw: &str) -> String {
    raw.trim().replace('\\', "/").to_lowercase()
}

fn as_folder_prefix(path: String) -> String {
    if path.ends_with('/') {
        path
    } else {
        format!("{}/", path)
    }
}

impl PathFilter {
    pub fn new<S: AsRef<str>>(include: &[S], exclude: &[S]) -> Self {
        let mut filter = Self::default();

        for raw in exclude {
            let path = normalize(raw.as_ref());
            if path.is_empty() {
                continue;
            }
            if path.ends_with(".md") {
                filter.exclude_files.insert(path);
            } else {
                filter.exclude_folders.push(as_folder_prefix(path));
            }
        }

        filter.include_folders = include
            .iter()
            .map(|raw| normalize(raw.as_ref()))
            .filter(|path| !path.is_empty())
            .map(as_folder_prefix)
            .collect();

        filter
    }

    pub fn is_excluded(&self, path: &str) -> bool {
        let path = normalize(path);
        self.exclude_files.contains(&path)
            || self.exclude_folders.iter().any(|pref| path.starts_with(pref))
    }

    pub fn is_included(&self, path: &str) -> bool {
        if self.include_folders.is_empty() {
            return true;
        }
        let path = normalize(path);
        self.include_folders.iter().any(|pref| path.starts_with(pref))
    }

    /// True when a note at `path` takes part in the tree and the unfiled list.
    pub fn accepts(&self, path: &Path) -> bool {
        let path = path.to_string_lossy();
        self.is_included(&path) && !self.is_excluded(&path)
    }
}
