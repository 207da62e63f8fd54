use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
}

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format for releases: "v0.3.0"
/// Format for dev builds: "v0.3.0\ndev: abc1234 2024-01-15 14:30"
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            format!("v{}", VERSION)
        } else {
            format!("v{}\ndev: {} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "zettel",
    bin_name = "zettel",
    version = get_version(),
    disable_help_subcommand = true,
    after_help = "Enable shell completions:\n  eval \"$(zettel completions bash)\"  # add to ~/.bashrc\n  eval \"$(zettel completions zsh)\"   # add to ~/.zshrc"
)]
#[command(about = "Navigate and reorganize a Zettelkasten of markdown notes", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Vault root (skips searching upwards for .zettel/)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub vault: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true, help_heading = "Options")]
    pub json: bool,

    /// Log diagnostics to stderr (honours RUST_LOG)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Silence all logs
    #[arg(short, long, global = true, conflicts_with = "verbose", help_heading = "Options")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, help_heading = "Options")]
    pub no_color: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Show the identifier tree
    #[command(alias = "ls", display_order = 1)]
    Tree {
        /// List siblings in descending order
        #[arg(long)]
        desc: bool,
    },

    /// List notes without an identifier
    #[command(display_order = 2)]
    Unfiled,

    /// Print the next free identifier under a parent (top level if omitted)
    #[command(display_order = 3)]
    Next {
        /// Parent identifier (e.g. 1.a)
        parent: Option<String>,
    },

    /// Create a note with the next free identifier
    #[command(alias = "n", display_order = 4)]
    New {
        /// Parent identifier (top level if omitted)
        parent: Option<String>,

        /// Give the note this exact identifier; it must be a path node ("(no note)")
        #[arg(long, value_name = "ID", conflicts_with = "parent")]
        at: Option<String>,

        /// Note title, used as the file name
        #[arg(short, long)]
        title: Option<String>,
    },

    /// Delete a note and every note below it
    #[command(alias = "rm", display_order = 5)]
    Delete {
        /// Identifier to delete (path nodes take their descendants along)
        id: String,

        /// List the notes without deleting anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Rename a note's file, keeping its identifier
    #[command(display_order = 13)]
    Rename {
        /// Note path, relative to the vault root
        path: PathBuf,

        /// New title, used as the file name
        title: String,
    },

    /// Move a note and its descendants under another parent
    #[command(alias = "mv", display_order = 10)]
    Move {
        /// Identifier of the note to move
        source: String,

        /// New parent identifier (top level if omitted)
        target: Option<String>,

        /// Show the renumbering without writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Give a note (and its descendants) an explicit identifier
    #[command(display_order = 11)]
    Renumber {
        /// Identifier of the note to renumber
        source: String,

        /// The identifier it should get
        new_id: String,

        /// Show the renumbering without writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Write an identifier into a note's frontmatter
    #[command(display_order = 12)]
    SetId {
        /// Note path, relative to the vault root
        path: PathBuf,

        /// The identifier to write
        id: String,
    },

    /// Mark the current directory as a vault
    #[command(display_order = 20)]
    Init,

    /// Show, get or set configuration
    #[command(display_order = 21)]
    Config {
        #[command(subcommand)]
        action: Option<ConfigCommands>,
    },

    /// Generate shell completions
    #[command(display_order = 22)]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Print a commented config template
    Gen {
        /// Write the template to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print one resolved value
    Get { key: String },

    /// Set a value in the vault's zettel.toml
    Set { key: String, value: String },
}

/// Builds the clap Command, used for completion generation.
pub fn build_command() -> clap::Command {
    Cli::command()
}

/// Installs the stderr log subscriber.
///
/// `--quiet` and the default are both "off", so `RUST_LOG` never leaks log lines
/// into normal output. `--verbose` honours `RUST_LOG`, falling back to "info".
pub fn init_tracing(cli: &Cli) {
    let filter = if cli.quiet {
        tracing_subscriber::EnvFilter::new("off")
    } else if cli.verbose {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    } else {
        tracing_subscriber::EnvFilter::new("off")
    };

    let ansi = !(cli.no_color || std::env::var_os("NO_COLOR").is_some());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(ansi)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("zettel").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_is_well_formed() {
        build_command().debug_assert();
    }

    #[test]
    fn test_naked_invocation_has_no_command() {
        assert_eq!(parse(&[]).command, None);
    }

    #[test]
    fn test_move_to_top_level() {
        let cli = parse(&["mv", "1.b", "--dry-run"]);
        assert_eq!(
            cli.command,
            Some(Commands::Move {
                source: "1.b".into(),
                target: None,
                dry_run: true,
            })
        );
    }

    #[test]
    fn test_new_at_path_node() {
        assert_eq!(
            parse(&["new", "--at", "1.a.1", "-t", "Bridge"]).command,
            Some(Commands::New {
                parent: None,
                at: Some("1.a.1".into()),
                title: Some("Bridge".into()),
            })
        );
        assert!(Cli::try_parse_from(["zettel", "new", "1", "--at", "2.a"]).is_err());
    }

    #[test]
    fn test_delete_and_rename() {
        assert_eq!(
            parse(&["rm", "1.a", "--dry-run"]).command,
            Some(Commands::Delete {
                id: "1.a".into(),
                dry_run: true,
            })
        );
        assert_eq!(
            parse(&["rename", "Zettels/a.md", "Fast and slow"]).command,
            Some(Commands::Rename {
                path: PathBuf::from("Zettels/a.md"),
                title: "Fast and slow".into(),
            })
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["next", "1", "--json", "--vault", "/tmp/v"]);
        assert!(cli.json);
        assert_eq!(cli.vault, Some(PathBuf::from("/tmp/v")));
        assert_eq!(
            cli.command,
            Some(Commands::Next {
                parent: Some("1".into())
            })
        );
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        let res = Cli::try_parse_from(["zettel", "-v", "-q"]);
        assert!(res.is_err());
    }

    #[test]
    fn test_config_subcommands() {
        let cli = parse(&["config", "set", "sort_order", "desc"]);
        assert_eq!(
            cli.command,
            Some(Commands::Config {
                action: Some(ConfigCommands::Set {
                    key: "sort_order".into(),
                    value: "desc".into(),
                })
            })
        );
        assert_eq!(
            parse(&["config"]).command,
            Some(Commands::Config { action: None })
        );
    }
}
