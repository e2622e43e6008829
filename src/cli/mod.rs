//! Command-line interface.

pub mod completions;
pub mod export;
pub mod get;
pub mod init;
pub mod list;
pub mod output;
pub mod run;
pub mod status;

use clap::{Parser, Subcommand};

use crate::core::config::Overrides;
use crate::core::constants;
use crate::core::resolve::{MissingBehavior, ResolveOptions};

/// Warren - resolved secrets from a hosted store, straight into your environment.
#[derive(Parser)]
#[command(
    name = "warren",
    about = "Fetch, resolve, and inject secrets from a hosted store",
    version
)]
pub struct Cli {
    /// Environment to read secrets from (overrides config)
    #[arg(short, long, global = true)]
    pub environment: Option<String>,

    /// Folder path to read secrets from (overrides config)
    #[arg(short, long, global = true)]
    pub path: Option<String>,

    /// Substitute empty strings for unresolved references instead of failing
    #[arg(long, global = true)]
    pub allow_missing: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Scope overrides: environment variables first, flags on top.
    pub fn overrides(&self) -> Overrides {
        let mut overrides = Overrides::from_env();
        if self.environment.is_some() {
            overrides.environment = self.environment.clone();
        }
        if self.path.is_some() {
            overrides.path = self.path.clone();
        }
        overrides
    }

    /// Resolver options from the global flags.
    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            missing: if self.allow_missing {
                MissingBehavior::Empty
            } else {
                MissingBehavior::Error
            },
        }
    }
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize warren in the current directory
    Init {
        /// Base URL of the secret store
        #[arg(long)]
        url: String,
        /// Workspace identifier, if your store requires one
        #[arg(long)]
        project_id: Option<String>,
    },

    /// Print one resolved secret value
    Get {
        /// Secret key
        key: String,
    },

    /// List secret keys in the current scope
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export resolved secrets to stdout
    Export {
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Dotenv)]
        format: Format,
    },

    /// Run a command with resolved secrets injected as env vars
    Run {
        /// Command and arguments to run
        #[arg(trailing_var_arg = true)]
        command: Vec<String>,
    },

    /// Show workspace status without contacting the store
    Status,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Export output formats.
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum Format {
    Dotenv,
    Shell,
    Json,
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute a command.
pub fn execute(cli: Cli) -> crate::error::Result<()> {
    use Command::*;

    let overrides = cli.overrides();
    let options = cli.resolve_options();

    // Init consumes the global scope flags as the values to write; the
    // other commands treat them as runtime overrides.
    let init_environment = cli
        .environment
        .clone()
        .unwrap_or_else(|| constants::DEFAULT_ENVIRONMENT.to_string());
    let init_path = cli
        .path
        .clone()
        .unwrap_or_else(|| constants::ROOT_PATH.to_string());

    match cli.command {
        Init { url, project_id } => init::execute(&url, &init_environment, &init_path, project_id),
        Get { key } => get::execute(&key, overrides, options),
        List { json } => list::execute(json, overrides, options),
        Export { format } => export::execute(format, overrides, options),
        Run { command } => run::execute(&command, overrides, options),
        Status => status::execute(overrides),
        Completions { shell } => completions::execute(shell),
    }
}
