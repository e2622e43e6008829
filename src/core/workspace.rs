//! Workspace facade.
//!
//! Wires configuration, credential discovery, and the matching secret
//! source together so commands have one entry point for "give me resolved
//! secrets for the current scope".

use tracing::debug;

use crate::core::client;
use crate::core::config::{Config, Overrides};
use crate::core::domain::{Credential, Secret};
use crate::core::resolve::{self, ResolveOptions, SecretSource};
use crate::error::{Result, SecretError};

/// An open connection to one store scope.
pub struct Workspace {
    config: Config,
    source: Box<dyn SecretSource>,
}

impl Workspace {
    /// Open the workspace with configuration and credential from the
    /// current directory and environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotInitialized` without a config file or
    /// `WARREN_BASE_URL`, `CredentialError::Missing` without a credential,
    /// and connection errors from the service token handshake.
    pub fn open() -> Result<Self> {
        Self::open_with(Overrides::from_env())
    }

    /// Like [`Workspace::open`] with explicit scope overrides, typically
    /// from CLI flags layered over the environment.
    pub fn open_with(overrides: Overrides) -> Result<Self> {
        let config = Config::discover_with(overrides)?;
        let credential = Credential::from_env()?;
        debug!(mode = credential.mode(), "opening workspace");
        let source = client::source_for(&config, &credential)?;

        Ok(Self { config, source })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The default (environment, path) scope.
    pub fn scope(&self) -> (&str, &str) {
        (&self.config.store.environment, &self.config.store.path)
    }

    /// Fetch the default scope and resolve every reference.
    ///
    /// # Errors
    ///
    /// Propagates fetch and resolution failures; no partial batch is
    /// returned.
    pub fn resolve_all(&self, options: ResolveOptions) -> Result<Vec<Secret>> {
        let (environment, path) = self.scope();
        let batch = self.source.fetch(environment, path)?;
        resolve::resolve_batch(batch, self.source.as_ref(), options)
    }

    /// Fetch the default scope and resolve one secret by key.
    ///
    /// # Errors
    ///
    /// Returns `SecretError::NotFound` when the key is not in scope, plus
    /// the same failure modes as [`Workspace::resolve_all`].
    pub fn resolve_one(&self, key: &str, options: ResolveOptions) -> Result<Secret> {
        let (environment, path) = self.scope();
        let batch = self.source.fetch(environment, path)?;

        let mut secret = batch
            .iter()
            .find(|s| s.key == key)
            .cloned()
            .ok_or_else(|| SecretError::NotFound(key.to_string()))?;
        secret.value =
            resolve::expand_value(&secret.value, &batch, self.source.as_ref(), options)?;

        Ok(secret)
    }
}
