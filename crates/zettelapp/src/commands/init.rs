use crate::commands::{CmdMessage, CmdResult};
use crate::config::ZettelConfig;
use crate::error::{Result, ZettelError};
use crate::init::{CONFIG_FILE, VAULT_DIR};
use confique::toml::FormatOptions;
use std::fs;
use std::path::Path;

/// Marks `vault_root` as a vault: creates `.zettel/` and a commented `zettel.toml`.
/// An existing config file is left alone.
pub fn run(vault_root: &Path) -> Result<CmdResult> {
    let dir = vault_root.join(VAULT_DIR);
    fs::create_dir_all(&dir).map_err(ZettelError::Io)?;

    let mut result = CmdResult::default();
    let config_path = dir.join(CONFIG_FILE);
    if config_path.exists() {
        result.add_message(CmdMessage::info(format!(
            "Vault already initialized at {}",
            vault_root.display()
        )));
        return Ok(result);
    }

    let template = confique::toml::template::<ZettelConfig>(FormatOptions::default());
    fs::write(&config_path, template).map_err(ZettelError::Io)?;
    result.add_message(CmdMessage::success(format!(
        "Initialized vault at {}",
        vault_root.display()
    )));
    Ok(result)
}
