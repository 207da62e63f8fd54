//! # Vaults
//!
//! A vault is a directory tree of markdown notes. It is marked by a `.zettel/`
//! directory at its root, which also holds the vault's `zettel.toml`.
//!
//! ## Vault Detection Algorithm
//!
//! [`find_vault_root`]:
//!
//! 1. Start at `CWD` (Current Working Directory).
//! 2. Check: Does this directory contain `.zettel/`?
//! 3. **Match**: If yes, this is the vault root.
//! 4. **No Match**: Move to parent directory.
//! 5. **Stop**: If we reach `HOME` or filesystem root, return `None`.
//!
//! When nothing is found, the current directory is treated as the vault (and
//! `zettel init` can mark it). An explicit `--vault` path skips detection.
//!
//! ## Configuration Sources
//!
//! [`initialize`] loads [`ZettelConfig`] through clapfig, merging:
//! - the global config directory (`ZETTEL_CONFIG_DIR`, or the OS config dir),
//! - `<vault>/.zettel/zettel.toml`,
//! - `ZETTEL__*` environment variables.

use crate::api::ZettelApi;
use crate::config::ZettelConfig;
use crate::store::fs::VaultStore;
use clapfig::{Clapfig, SearchMode, SearchPath};
use directories::{BaseDirs, ProjectDirs};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const VAULT_DIR: &str = ".zettel";
pub const CONFIG_FILE: &str = "zettel.toml";

pub struct ZettelContext {
    pub api: ZettelApi<VaultStore>,
    pub vault_root: PathBuf,
    pub config: ZettelConfig,
}

/// Walks up from `cwd` to the first directory containing `.zettel/`.
/// Returns None if no vault is found before reaching home or root.
pub fn find_vault_root(cwd: &Path) -> Option<PathBuf> {
    let home_dir = BaseDirs::new().map(|bd| bd.home_dir().to_path_buf());
    let mut current = cwd.to_path_buf();

    loop {
        if current.join(VAULT_DIR).is_dir() {
            return Some(current);
        }

        if let Some(ref home) = home_dir {
            if &current == home {
                return None;
            }
        }

        match current.parent() {
            Some(parent) if parent != current => {
                current = parent.to_path_buf();
            }
            _ => return None,
        }
    }
}

/// Global configuration directory.
///
/// `ZETTEL_CONFIG_DIR` overrides the OS default; tests use it to isolate global state.
pub fn global_config_dir() -> Option<PathBuf> {
    std::env::var_os("ZETTEL_CONFIG_DIR")
        .map(PathBuf::from)
        .or_else(|| {
            ProjectDirs::from("com", "zettel", "zettel").map(|d| d.config_dir().to_path_buf())
        })
}

/// Config search paths, lowest priority first.
pub fn config_search_paths(vault_root: &Path) -> Vec<SearchPath> {
    let mut paths = Vec::new();
    if let Some(global) = global_config_dir() {
        paths.push(SearchPath::Path(global));
    }
    paths.push(SearchPath::Path(vault_root.join(VAULT_DIR)));
    paths
}

/// Merged configuration for `vault_root`. A config that fails to load is reported
/// and replaced by the defaults.
pub fn load_config(vault_root: &Path) -> ZettelConfig {
    let loaded = Clapfig::builder()
        .app_name("zettel")
        .file_name(CONFIG_FILE)
        .search_paths(config_search_paths(vault_root))
        .search_mode(SearchMode::Merge)
        .load();
    match loaded {
        Ok(config) => config,
        Err(e) => {
            warn!(
                vault = %vault_root.display(),
                error = %e,
                "ignoring unusable config, using defaults"
            );
            ZettelConfig::default()
        }
    }
}

/// Resolves the vault, loads configuration and sets up the store.
///
/// # Arguments
///
/// * `cwd` - Where vault detection starts
/// * `vault_override` - Explicit vault root; bypasses detection
pub fn initialize(cwd: &Path, vault_override: Option<PathBuf>) -> ZettelContext {
    let vault_root = vault_override
        .or_else(|| find_vault_root(cwd))
        .unwrap_or_else(|| cwd.to_path_buf());

    let config = load_config(&vault_root);
    debug!(vault = %vault_root.display(), ?config, "initialized zettel context");

    let store = VaultStore::new(vault_root.clone()).with_id_property(config.id_property());
    let api = ZettelApi::new(store, config.clone());

    ZettelContext {
        api,
        vault_root,
        config,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_vault_root_walks_up() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("vault");
        let nested = root.join("Zettels/deep");
        fs::create_dir_all(&nested).unwrap();
        fs::create_dir_all(root.join(VAULT_DIR)).unwrap();

        assert_eq!(find_vault_root(&nested), Some(root.clone()));
        assert_eq!(find_vault_root(&root), Some(root));
    }

    #[test]
    fn test_find_vault_root_ignores_plain_file() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("vault");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join(VAULT_DIR), "not a dir").unwrap();

        assert_ne!(find_vault_root(&root), Some(root));
    }

    #[test]
    fn test_initialize_with_override_reads_vault_config() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_path_buf();
        fs::create_dir_all(root.join(VAULT_DIR)).unwrap();
        fs::write(
            root.join(VAULT_DIR).join(CONFIG_FILE),
            "id_property = \"zid\"\nsort_order = \"desc\"\n",
        )
        .unwrap();

        let ctx = initialize(&root, Some(root.clone()));
        assert_eq!(ctx.vault_root, root);
        assert_eq!(ctx.config.id_property(), "zid");
        assert_eq!(ctx.config.sort_order, crate::zettel_id::SortOrder::Descending);
    }

    #[test]
    fn test_malformed_config_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_path_buf();
        fs::create_dir_all(root.join(VAULT_DIR)).unwrap();
        fs::write(
            root.join(VAULT_DIR).join(CONFIG_FILE),
            "sort_order = \"sideways\"\n",
        )
        .unwrap();

        assert_eq!(load_config(&root), ZettelConfig::default());
    }
}
