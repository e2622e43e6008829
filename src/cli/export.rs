//! Export command.
//!
//! Renders the resolved scope to stdout in dotenv, shell, or JSON form.

use crate::cli::Format;
use crate::core::config::Overrides;
use crate::core::env;
use crate::core::resolve::ResolveOptions;
use crate::core::workspace::Workspace;
use crate::error::Result;

/// Export resolved secrets to stdout.
pub fn execute(format: Format, overrides: Overrides, options: ResolveOptions) -> Result<()> {
    let workspace = Workspace::open_with(overrides)?;
    let secrets = workspace.resolve_all(options)?;

    match format {
        Format::Dotenv => print!("{}", env::render_dotenv(&secrets)?),
        Format::Shell => print!("{}", env::render_shell(&secrets)?),
        Format::Json => println!("{}", env::render_json(&secrets)?),
    }

    Ok(())
}
