//! Credential discovery and parsing.
//!
//! Credentials come from the environment only, never from the config file.
//! Two modes exist: a bearer token for stores that return plaintext, and a
//! service token whose trailing segment carries the key material protecting
//! the workspace key.

use zeroize::Zeroizing;

use crate::core::constants;
use crate::error::{CredentialError, Result};

/// Authentication material for the secret store.
pub enum Credential {
    /// Plain bearer token; the store returns plaintext secrets.
    Bearer(Zeroizing<String>),
    /// Service token; the store returns encrypted records that are
    /// decrypted client-side.
    ServiceToken(ServiceToken),
}

impl Credential {
    /// Read the credential from the environment.
    ///
    /// `WARREN_SERVICE_TOKEN` wins over `WARREN_TOKEN` when both are set,
    /// since it identifies the mode unambiguously. Empty values count as
    /// unset.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::Missing` if neither variable is set, or
    /// `CredentialError::Malformed` if the service token does not parse.
    pub fn from_env() -> Result<Self> {
        if let Some(raw) = non_empty_var(constants::SERVICE_TOKEN_ENV) {
            return Ok(Credential::ServiceToken(ServiceToken::parse(&raw)?));
        }
        if let Some(raw) = non_empty_var(constants::TOKEN_ENV) {
            return Ok(Credential::Bearer(Zeroizing::new(raw)));
        }
        Err(CredentialError::Missing.into())
    }

    /// Human-readable mode name for status output.
    pub fn mode(&self) -> &'static str {
        match self {
            Credential::Bearer(_) => "bearer",
            Credential::ServiceToken(_) => "service token",
        }
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credential::Bearer(_) => write!(f, "Credential::Bearer(<redacted>)"),
            Credential::ServiceToken(token) => {
                write!(f, "Credential::ServiceToken({:?})", token)
            }
        }
    }
}

/// A parsed service token: `st.<identifier>.<secret>.<key material>`.
///
/// The first three segments authenticate against the store; the final
/// segment never leaves the client and seeds the key that protects the
/// workspace key.
pub struct ServiceToken {
    identifier: String,
    secret: Zeroizing<String>,
    key_material: Zeroizing<String>,
}

impl ServiceToken {
    /// Parse a raw service token string.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::Malformed` unless the token has exactly
    /// four non-empty dot-separated segments starting with `st`.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if !raw.starts_with(constants::SERVICE_TOKEN_PREFIX) {
            return Err(malformed("must start with 'st.'"));
        }

        let segments: Vec<&str> = raw.split('.').collect();
        if segments.len() != 4 {
            return Err(malformed(&format!(
                "expected 4 dot-separated segments, found {}",
                segments.len()
            )));
        }
        if segments.iter().any(|s| s.is_empty()) {
            return Err(malformed("empty segment"));
        }

        Ok(Self {
            identifier: segments[1].to_string(),
            secret: Zeroizing::new(segments[2].to_string()),
            key_material: Zeroizing::new(segments[3].to_string()),
        })
    }

    /// Token identifier. Safe to display.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The value sent as the bearer credential: `st.<identifier>.<secret>`,
    /// without the key material segment.
    pub fn auth_token(&self) -> Zeroizing<String> {
        Zeroizing::new(format!("st.{}.{}", self.identifier, self.secret.as_str()))
    }

    /// Client-side key material. Never sent to the store.
    pub fn key_material(&self) -> &str {
        &self.key_material
    }
}

impl std::fmt::Debug for ServiceToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceToken")
            .field("identifier", &self.identifier)
            .field("secret", &"<redacted>")
            .field("key_material", &"<redacted>")
            .finish()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn malformed(reason: &str) -> crate::error::Error {
    CredentialError::Malformed {
        reason: reason.to_string(),
    }
    .into()
}
