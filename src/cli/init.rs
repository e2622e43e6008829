//! Init command - write the store configuration file.

use tracing::info;

use crate::cli::output;
use crate::core::config::Config;
use crate::core::constants;
use crate::error::{ConfigError, Result};

/// Initialize warren in the current directory.
pub fn execute(
    url: &str,
    environment: &str,
    path: &str,
    project_id: Option<String>,
) -> Result<()> {
    if Config::exists() {
        return Err(ConfigError::AlreadyInitialized.into());
    }

    let mut config = Config::new(url.to_string());
    config.store.environment = environment.to_string();
    config.store.path = path.to_string();
    config.store.project_id = project_id;
    config.validate()?;
    config.save()?;

    info!("Initialized successfully");

    output::success(&format!("initialized {}", constants::CONFIG_FILE));
    output::kv("store", &config.store.base_url);
    output::kv("environment", &config.store.environment);
    output::kv("path", &config.store.path);
    println!();
    output::hint(&format!(
        "set {} or {} to authenticate",
        constants::TOKEN_ENV,
        constants::SERVICE_TOKEN_ENV
    ));

    Ok(())
}
