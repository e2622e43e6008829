//! Quick status overview command.
//!
//! Reports configuration and credential state without contacting the store.

use crate::cli::output;
use crate::core::config::{Config, Overrides};
use crate::core::constants;
use crate::core::domain::Credential;
use crate::error::{CredentialError, Error, Result};

/// Show workspace status.
pub fn execute(overrides: Overrides) -> Result<()> {
    let from_file = Config::exists();
    let config = Config::discover_with(overrides)?;

    output::section("Warren Status");

    output::kv(
        "config",
        if from_file {
            constants::CONFIG_FILE
        } else {
            "environment"
        },
    );
    output::kv("store", &config.store.base_url);
    output::kv("environment", &config.store.environment);
    output::kv("path", &config.store.path);
    if let Some(project_id) = &config.store.project_id {
        output::kv("project", project_id);
    }

    match Credential::from_env() {
        Ok(credential) => output::kv("credential", credential.mode()),
        Err(Error::Credential(CredentialError::Missing)) => {
            output::kv("credential", "none");
            println!();
            output::warn(&format!(
                "no credential found; set {} or {}",
                constants::TOKEN_ENV,
                constants::SERVICE_TOKEN_ENV
            ));
        }
        Err(err) => {
            output::kv("credential", "invalid");
            println!();
            output::warn(&err.to_string());
        }
    }

    Ok(())
}
