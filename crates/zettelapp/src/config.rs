//! # Configuration
//!
//! Zettel configuration is managed by [`clapfig`], which handles layered loading
//! from TOML files, environment variables, and programmatic overrides.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `ZETTEL__ID_PROPERTY`, `ZETTEL__SORT_ORDER`, etc.
//! 2. **Vault Config**: `<vault>/.zettel/zettel.toml`, overrides everything for this vault.
//! 3. **Global Config**: OS-appropriate config directory (via `directories` crate).
//! 4. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `id_property` | `zettel_id` | Frontmatter property holding the identifier |
//! | `sort_order` | `asc` | Sibling order in the tree (`asc` or `desc`) |
//! | `template_path` | none | Vault-relative template for new notes |
//! | `new_note_root` | none | Folder for new notes (default: next to the parent) |
//! | `include_paths` | `[]` | Only notes under these folders take part |
//! | `exclude_paths` | `[]` | Folders, or exact `.md` files, to leave out |
//! | `max_remap_attempts` | `500` | Root candidates tried before a move gives up |

use crate::filter::PathFilter;
use crate::remap::{Remapper, DEFAULT_MAX_ATTEMPTS};
use crate::zettel_id::SortOrder;
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_ID_PROPERTY: &str = "zettel_id";

/// Configuration for zettel, stored in `zettel.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ZettelConfig {
    /// Frontmatter property that holds a note's identifier.
    #[config(default = "zettel_id")]
    pub id_property: String,

    /// Sibling order: "asc" or "desc".
    #[config(default = "asc")]
    pub sort_order: SortOrder,

    /// Template applied to new notes, relative to the vault root.
    pub template_path: Option<PathBuf>,

    /// Folder that receives new notes, relative to the vault root.
    pub new_note_root: Option<PathBuf>,

    #[config(default = [])]
    pub include_paths: Vec<String>,

    #[config(default = [])]
    pub exclude_paths: Vec<String>,

    /// Ceiling on root candidates tried when renumbering a moved subtree.
    #[config(default = 500)]
    pub max_remap_attempts: usize,
}

impl Default for ZettelConfig {
    fn default() -> Self {
        Self {
            id_property: DEFAULT_ID_PROPERTY.to_string(),
            sort_order: SortOrder::Ascending,
            template_path: None,
            new_note_root: None,
            include_paths: Vec::new(),
            exclude_paths: Vec::new(),
            max_remap_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl ZettelConfig {
    /// The identifier property, falling back to the default when blank.
    pub fn id_property(&self) -> &str {
        let prop = self.id_property.trim();
        if prop.is_empty() {
            DEFAULT_ID_PROPERTY
        } else {
            prop
        }
    }

    pub fn path_filter(&self) -> PathFilter {
        PathFilter::new(&self.include_paths, &self.exclude_paths)
    }

    pub fn remapper(&self) -> Remapper {
        Remapper::new(self.max_remap_attempts)
    }

    /// `new_note_root`, ignoring blank values.
    pub fn new_note_root(&self) -> Option<&PathBuf> {
        self.new_note_root
            .as_ref()
            .filter(|p| !p.as_os_str().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ZettelConfig::default();
        assert_eq!(config.id_property(), "zettel_id");
        assert_eq!(config.sort_order, SortOrder::Ascending);
        assert_eq!(config.remapper().max_attempts(), 500);
        assert!(config.new_note_root().is_none());
    }

    #[test]
    fn test_blank_id_property_falls_back() {
        let config = ZettelConfig {
            id_property: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(config.id_property(), "zettel_id");
    }

    #[test]
    fn test_blank_new_note_root_is_ignored() {
        let config = ZettelConfig {
            new_note_root: Some(PathBuf::new()),
            ..Default::default()
        };
        assert!(config.new_note_root().is_none());
    }

    #[test]
    fn test_deserialize_from_toml() {
        let config: ZettelConfig = toml::from_str(
            r#"
            id_property = "zid"
            sort_order = "desc"
            template_path = "Templates/zettel.md"
            new_note_root = "Zettels"
            include_paths = []
            exclude_paths = ["Templates"]
            max_remap_attempts = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.id_property(), "zid");
        assert_eq!(config.sort_order, SortOrder::Descending);
        assert_eq!(config.remapper().max_attempts(), 10);
        assert!(!config
            .path_filter()
            .accepts(std::path::Path::new("Templates/zettel.md")));
    }
}
