//! Get command.

use crate::core::config::Overrides;
use crate::core::resolve::ResolveOptions;
use crate::core::workspace::Workspace;
use crate::error::Result;

/// Print one resolved secret value.
pub fn execute(key: &str, overrides: Overrides, options: ResolveOptions) -> Result<()> {
    let workspace = Workspace::open_with(overrides)?;
    let secret = workspace.resolve_one(key, options)?;

    // Plain output for scripting - no decoration
    println!("{}", secret.value);

    Ok(())
}
