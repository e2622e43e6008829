//! Warren - resolved secrets from a hosted store, straight into your environment.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use warren::cli::output;
use warren::cli::{execute, Cli};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env("WARREN_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("warren=debug")
        } else {
            EnvFilter::new("warren=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).without_time())
        .init();

    if let Err(e) = execute(cli) {
        // Format error with suggestion if available
        let error_msg = e.to_string();
        let suggestion = match &e {
            warren::error::Error::Config(warren::error::ConfigError::NotInitialized) => {
                Some("run: warren init --url <STORE_URL>")
            }
            warren::error::Error::Credential(warren::error::CredentialError::Missing) => {
                Some("set WARREN_TOKEN or WARREN_SERVICE_TOKEN")
            }
            _ => None,
        };

        output::error(&error_msg);
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
