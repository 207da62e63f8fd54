//! # CLI Layer
//!
//! This module is **one possible UI client** for zettel; it is not the application itself.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: Convert shell arguments into typed commands via clap
//! 2. **Context Setup**: Resolve the vault and load configuration
//! 3. **Dispatch**: Route commands to the [`ZettelApi`]
//! 4. **Output Formatting**: Text via `render.rs`, or JSON with `--json`
//! 5. **Error Handling**: Errors bubble up to `main`, which prints them and exits 1

use super::render::{self, View};
use super::setup::{build_command, init_tracing, Cli, Commands, CompletionShell, ConfigCommands};
use anyhow::{Context, Result};
use clap::Parser;
use clapfig::{Clapfig, ConfigAction, SearchPath};
use std::path::{Path, PathBuf};
use tracing::debug;
use zettelapp::api::ZettelApi;
use zettelapp::commands::CmdResult;
use zettelapp::config::ZettelConfig;
use zettelapp::init::{config_search_paths, initialize, CONFIG_FILE, VAULT_DIR};
use zettelapp::store::NoteStore;
use zettelapp::zettel_id::SortOrder;

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color || std::env::var_os("NO_COLOR").is_some() {
        console::set_colors_enabled(false);
    }
    init_tracing(&cli);

    let command = cli
        .command
        .clone()
        .unwrap_or(Commands::Tree { desc: false });

    // Completions and init don't need a loaded vault.
    if let Commands::Completions { shell } = command {
        print_completions(shell);
        return Ok(());
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    if let Commands::Init = command {
        let vault_root = cli.vault.clone().unwrap_or(cwd);
        let result = zettelapp::commands::init::run(&vault_root)?;
        return emit(&cli, &result, View::Messages);
    }

    let mut ctx = initialize(&cwd, cli.vault.clone());
    debug!(vault = %ctx.vault_root.display(), ?command, "dispatching");

    if let Commands::Config { action } = &command {
        return handle_config_command(action.as_ref(), &ctx.vault_root, &ctx.config);
    }

    let (result, view) = dispatch(&mut ctx.api, command)?;
    emit(&cli, &result, view)
}

/// Runs one vault command against the API and picks how its result is shown.
fn dispatch<S: NoteStore>(api: &mut ZettelApi<S>, command: Commands) -> Result<(CmdResult, View)> {
    let outcome = match command {
        Commands::Tree { desc } => {
            if desc {
                api.set_sort_order(SortOrder::Descending);
            }
            (api.list_tree()?, View::Tree)
        }
        Commands::Unfiled => (api.unfiled()?, View::Notes),
        Commands::Next { parent } => (api.next_id(parent.as_deref())?, View::ZettelId),
        Commands::New {
            at: Some(at),
            title,
            ..
        } => (api.create_note_at(&at, title.as_deref())?, View::Messages),
        Commands::New {
            parent,
            at: None,
            title,
        } => (
            api.create_note(parent.as_deref(), title.as_deref())?,
            View::Messages,
        ),
        Commands::Delete { id, dry_run } => (api.delete(&id, dry_run)?, View::Notes),
        Commands::Rename { path, title } => (api.rename(&path, &title)?, View::Messages),
        Commands::Move {
            source,
            target,
            dry_run,
        } => (
            api.move_note(&source, target.as_deref(), dry_run)?,
            View::Remap,
        ),
        Commands::Renumber {
            source,
            new_id,
            dry_run,
        } => (api.renumber(&source, &new_id, dry_run)?, View::Remap),
        Commands::SetId { path, id } => (api.set_id(&path, &id)?, View::Messages),
        other => anyhow::bail!("not a vault command: {:?}", other),
    };
    Ok(outcome)
}

fn emit(cli: &Cli, result: &CmdResult, view: View) -> Result<()> {
    let out = render::render(result, view, cli.json).context("failed to serialize result")?;
    print!("{}", out);
    Ok(())
}

/// Handles `zettel config` using clapfig directly.
fn handle_config_command(
    action: Option<&ConfigCommands>,
    vault_root: &Path,
    config: &ZettelConfig,
) -> Result<()> {
    let action = match action {
        None => {
            // Bare `zettel config`: all resolved values
            let table = toml::Value::try_from(config).context("failed to serialize config")?;
            if let toml::Value::Table(t) = table {
                for (k, v) in &t {
                    println!("{} = {}", k, format_toml_value(v));
                }
            }
            return Ok(());
        }
        Some(ConfigCommands::Gen { output }) => ConfigAction::Gen {
            output: output.clone(),
        },
        Some(ConfigCommands::Get { key }) => ConfigAction::Get {
            key: key.clone(),
            scope: None,
        },
        Some(ConfigCommands::Set { key, value }) => ConfigAction::Set {
            key: key.clone(),
            value: value.clone(),
            scope: None,
        },
    };

    // `set` writes to the first search path, so it only sees the vault's own file.
    let search_paths = match action {
        ConfigAction::Set { .. } => vec![SearchPath::Path(vault_root.join(VAULT_DIR))],
        _ => config_search_paths(vault_root),
    };

    let result = Clapfig::builder::<ZettelConfig>()
        .app_name("zettel")
        .file_name(CONFIG_FILE)
        .search_paths(search_paths)
        .no_env()
        .strict(false)
        .handle(&action)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;
    let text = result.to_string();
    if text.ends_with('\n') {
        print!("{}", text);
    } else {
        println!("{}", text);
    }
    Ok(())
}

/// Formats a TOML value for display.
fn format_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => format!("\"{}\"", s),
        toml::Value::Array(a) => toml::to_string(a).unwrap_or_else(|_| format!("{a:?}")),
        other => other.to_string(),
    }
}

fn print_completions(shell: CompletionShell) {
    let shell = match shell {
        CompletionShell::Bash => clap_complete::Shell::Bash,
        CompletionShell::Zsh => clap_complete::Shell::Zsh,
    };
    let mut cmd = build_command();
    clap_complete::generate(shell, &mut cmd, "zettel", &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;
    use zettelapp::store::memory::InMemoryStore;

    fn api() -> ZettelApi<InMemoryStore> {
        let store = InMemoryStore::new();
        store.insert_note("one.md", "1");
        store.insert_note("one-a.md", "1.a");
        store.insert_note("two.md", "2");
        store.insert("loose.md", "no frontmatter");
        ZettelApi::new(store, ZettelConfig::default())
    }

    #[test]
    fn test_dispatch_picks_views() {
        let mut api = api();
        let (result, view) = dispatch(&mut api, Commands::Tree { desc: false }).unwrap();
        assert_eq!(view, View::Tree);
        assert_eq!(result.entries.len(), 3);

        let (result, view) = dispatch(&mut api, Commands::Unfiled).unwrap();
        assert_eq!(view, View::Notes);
        assert_eq!(result.notes[0].title, "loose");

        let (result, view) = dispatch(
            &mut api,
            Commands::Next {
                parent: Some("1".into()),
            },
        )
        .unwrap();
        assert_eq!(view, View::ZettelId);
        assert_eq!(result.zettel_id.unwrap().to_string(), "1.b");
    }

    #[test]
    fn test_dispatch_tree_desc() {
        let mut api = api();
        let (result, _) = dispatch(&mut api, Commands::Tree { desc: true }).unwrap();
        assert_eq!(result.entries[0].zettel_id.to_string(), "2");
    }

    #[test]
    fn test_dispatch_move_dry_run_writes_nothing() {
        let mut api = api();
        let (result, view) = dispatch(
            &mut api,
            Commands::Move {
                source: "1.a".into(),
                target: None,
                dry_run: true,
            },
        )
        .unwrap();
        assert_eq!(view, View::Remap);
        assert_eq!(result.remap.unwrap().len(), 1);
        assert_eq!(api.store().zettel_id_of("one-a.md").as_deref(), Some("1.a"));
    }

    #[test]
    fn test_dispatch_delete_lists_notes() {
        let mut api = api();
        let (result, view) = dispatch(
            &mut api,
            Commands::Delete {
                id: "1".into(),
                dry_run: true,
            },
        )
        .unwrap();
        assert_eq!(view, View::Notes);
        assert_eq!(result.notes.len(), 2);
        assert!(api.store().content("one.md").is_some());
    }

    #[test]
    fn test_dispatch_new_at_requires_path_node() {
        let mut api = api();
        let err = dispatch(
            &mut api,
            Commands::New {
                parent: None,
                at: Some("1".into()),
                title: None,
            },
        )
        .unwrap_err();
        assert!(err.to_string().contains("already has a note"));
    }

    #[test]
    fn test_dispatch_propagates_errors() {
        let mut api = api();
        let err = dispatch(
            &mut api,
            Commands::Renumber {
                source: "9".into(),
                new_id: "3".into(),
                dry_run: false,
            },
        )
        .unwrap_err();
        assert!(err.to_string().contains("9"));
    }

    #[test]
    fn test_format_toml_value() {
        assert_eq!(
            format_toml_value(&toml::Value::String("zettel_id".into())),
            "\"zettel_id\""
        );
        assert_eq!(format_toml_value(&toml::Value::Integer(500)), "500");
    }
}
