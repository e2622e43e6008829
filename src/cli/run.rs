//! Run command.
//!
//! Executes a command with resolved secrets injected as environment variables.

use zeroize::Zeroizing;

use crate::core::config::Overrides;
use crate::core::resolve::ResolveOptions;
use crate::core::workspace::Workspace;
use crate::error::Result;

/// Run a command with resolved secrets injected as environment variables.
pub fn execute(command: &[String], overrides: Overrides, options: ResolveOptions) -> Result<()> {
    if command.is_empty() {
        return Err(crate::error::Error::Other(
            "no command specified".to_string(),
        ));
    }

    let workspace = Workspace::open_with(overrides)?;
    let exit_code = run_with_secrets(&workspace, command, options)?;
    std::process::exit(exit_code);
}

/// Run a command with resolved secrets as environment variables.
fn run_with_secrets(
    workspace: &Workspace,
    command: &[String],
    options: ResolveOptions,
) -> Result<i32> {
    let secrets = workspace.resolve_all(options)?;

    let mut cmd = std::process::Command::new(&command[0]);
    cmd.args(&command[1..]);

    // Inject secrets as environment variables
    // Use Zeroizing to ensure values are wiped from memory after use
    for secret in secrets {
        let value = Zeroizing::new(secret.value);
        cmd.env(&secret.key, value.as_str());
    }
    // Values are now zeroized as they go out of scope

    let status = cmd.status()?;
    // Return the actual exit code, or 1 if unavailable
    Ok(status.code().unwrap_or(1))
}
