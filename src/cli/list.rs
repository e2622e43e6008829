//! List command.

use crate::cli::output;
use crate::core::config::Overrides;
use crate::core::domain::SecretType;
use crate::core::resolve::ResolveOptions;
use crate::core::workspace::Workspace;
use crate::error::Result;

/// List secret keys in the current scope.
pub fn execute(json: bool, overrides: Overrides, options: ResolveOptions) -> Result<()> {
    let workspace = Workspace::open_with(overrides)?;
    let secrets = workspace.resolve_all(options)?;

    if json {
        let keys: Vec<&str> = secrets.iter().map(|s| s.key.as_str()).collect();
        let result = serde_json::json!({
            "keys": keys,
            "count": keys.len()
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if secrets.is_empty() {
        output::dimmed("no secrets in scope");
    } else {
        println!();
        output::header(&format!("{} secrets", secrets.len()));
        output::rule();
        for secret in &secrets {
            if secret.secret_type == SecretType::Personal {
                output::list_item(&format!("{} (personal)", secret.key));
            } else {
                output::list_item(&secret.key);
            }
        }
    }

    Ok(())
}
