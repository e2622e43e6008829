//! Configuration file management.
//!
//! Handles reading, writing, and validating `.warren.toml` configuration
//! files, plus the `WARREN_*` environment variables that override them.
//! Credentials never live here; they are read from the environment at
//! connect time and never written to disk.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// Project configuration stored in `.warren.toml`
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Metadata about the configuration
    pub warren: Meta,
    /// Secret store connection and default scope
    pub store: Store,
}

/// Metadata section of the configuration
#[derive(Debug, Serialize, Deserialize)]
pub struct Meta {
    /// Configuration version
    pub version: String,
}

/// Store section: where to fetch secrets from and the default scope.
#[derive(Debug, Serialize, Deserialize)]
pub struct Store {
    /// Base URL of the secret store API
    pub base_url: String,
    /// Default environment slug
    #[serde(default = "default_environment")]
    pub environment: String,
    /// Default folder path, always starting with `/`
    #[serde(default = "default_path")]
    pub path: String,
    /// Workspace identifier, required by some bearer-token deployments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

fn default_environment() -> String {
    constants::DEFAULT_ENVIRONMENT.to_string()
}

fn default_path() -> String {
    constants::ROOT_PATH.to_string()
}

/// Scope overrides from `WARREN_*` environment variables or CLI flags.
///
/// Any field left `None` falls through to the config file value.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub environment: Option<String>,
    pub path: Option<String>,
}

impl Overrides {
    /// Read overrides from the process environment. Unset and empty
    /// variables count as absent.
    pub fn from_env() -> Self {
        Self {
            base_url: non_empty_var(constants::BASE_URL_ENV),
            environment: non_empty_var(constants::ENVIRONMENT_ENV),
            path: non_empty_var(constants::PATH_ENV),
        }
    }

    fn is_empty(&self) -> bool {
        self.base_url.is_none() && self.environment.is_none() && self.path.is_none()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    /// Create a new configuration pointing at `base_url` with the default
    /// scope (`dev` environment, root path).
    pub fn new(base_url: String) -> Self {
        Self {
            warren: Meta {
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            store: Store {
                base_url,
                environment: default_environment(),
                path: default_path(),
                project_id: None,
            },
        }
    }

    /// Path to the configuration file in the current directory
    pub fn config_path() -> PathBuf {
        PathBuf::from(constants::CONFIG_FILE)
    }

    /// Check if a configuration file exists in the current directory
    pub fn exists() -> bool {
        Self::config_path().exists()
    }

    /// Load configuration from `.warren.toml`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotInitialized` if the file doesn't exist,
    /// or `ConfigError::Parse` if the TOML is malformed.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        debug!(path = %path.display(), "loading config");

        if !path.exists() {
            return Err(ConfigError::NotInitialized.into());
        }
        let contents = std::fs::read_to_string(&path).map_err(ConfigError::ReadFile)?;
        let config: Self = toml::from_str(&contents).map_err(ConfigError::Parse)?;

        debug!(
            environment = %config.store.environment,
            path = %config.store.path,
            "config loaded"
        );

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to `.warren.toml`
    ///
    /// # Errors
    ///
    /// Returns error if serialization or file write fails.
    pub fn save(&self) -> Result<()> {
        debug!("saving config");

        let contents = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        std::fs::write(Self::config_path(), contents)?;

        Ok(())
    }

    /// Locate configuration: the file if present, otherwise one synthesized
    /// from `WARREN_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotInitialized` when neither a file nor
    /// `WARREN_BASE_URL` exists.
    pub fn discover() -> Result<Self> {
        Self::discover_with(Overrides::from_env())
    }

    /// Like [`Config::discover`] but with explicit overrides, applied on
    /// top of whatever the file provides.
    pub fn discover_with(overrides: Overrides) -> Result<Self> {
        let mut config = if Self::exists() {
            Self::load()?
        } else if let Some(base_url) = overrides.base_url.clone() {
            debug!("no config file, building config from environment");
            Self::new(base_url)
        } else {
            return Err(ConfigError::NotInitialized.into());
        };

        if !overrides.is_empty() {
            config.apply(&overrides);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply scope overrides in place.
    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(base_url) = &overrides.base_url {
            self.store.base_url = base_url.clone();
        }
        if let Some(environment) = &overrides.environment {
            self.store.environment = environment.clone();
        }
        if let Some(path) = &overrides.path {
            self.store.path = path.clone();
        }
    }

    /// Validate the configuration structure and contents
    ///
    /// Checks:
    /// - Version field is valid semver
    /// - Base URL is an http(s) URL
    /// - Environment slug is non-empty
    /// - Folder path starts with `/`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` or `ConfigError::MissingField` on validation failure.
    pub fn validate(&self) -> Result<()> {
        debug!("validating config");

        if self.warren.version.is_empty() {
            return Err(ConfigError::MissingField { field: "version" }.into());
        }
        let version_parts: Vec<&str> = self.warren.version.split('.').collect();
        if version_parts.len() < 2 {
            return Err(ConfigError::InvalidValue {
                field: "version",
                reason: format!("not a valid semver: {}", self.warren.version),
            }
            .into());
        }

        if self.store.base_url.is_empty() {
            return Err(ConfigError::MissingField { field: "base_url" }.into());
        }
        if !self.store.base_url.starts_with("http://")
            && !self.store.base_url.starts_with("https://")
        {
            return Err(ConfigError::InvalidValue {
                field: "base_url",
                reason: format!("not an http(s) URL: {}", self.store.base_url),
            }
            .into());
        }

        if self.store.environment.is_empty() {
            return Err(ConfigError::MissingField {
                field: "environment",
            }
            .into());
        }

        if !self.store.path.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "path",
                reason: format!("must start with '/': {}", self.store.path),
            }
            .into());
        }

        Ok(())
    }
}
