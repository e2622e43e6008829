//! Error types.
//!
//! Each core concern has its own error enum; the top-level [`Error`] wraps
//! them so callers can use one `Result` type throughout the crate.

use thiserror::Error;

/// Configuration file and environment override errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("not initialized: no .warren.toml found and WARREN_BASE_URL is not set")]
    NotInitialized,

    #[error("already initialized: .warren.toml exists")]
    AlreadyInitialized,

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[source] toml::ser::Error),

    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Credential parsing and discovery errors.
#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("no credential found: set WARREN_TOKEN or WARREN_SERVICE_TOKEN")]
    Missing,

    #[error("malformed service token: {reason}")]
    Malformed { reason: String },
}

/// Envelope decoding and symmetric cipher errors.
#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("invalid base64 in {field}: {source}")]
    Encoding {
        field: &'static str,
        #[source]
        source: base64::DecodeError,
    },

    #[error("malformed {field}: {reason}")]
    Malformed { field: &'static str, reason: String },

    #[error("authentication failed for {field}: ciphertext or tag rejected")]
    Authentication { field: &'static str },

    #[error("encryption failed: {0}")]
    Encrypt(String),

    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("decrypted {field} is not valid UTF-8")]
    InvalidUtf8 { field: &'static str },
}

/// Reference resolution errors.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("unresolved secret reference ${{{token}}}: no matching secret in scope")]
    Missing { token: String },

    #[error("cyclic secret reference: {chain}")]
    Cycle { chain: String },
}

/// Secret store API errors.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("store returned {status}: {message}")]
    Status { status: u16, message: String },
}

/// Secret lookup errors.
#[derive(Error, Debug)]
pub enum SecretError {
    #[error("secret not found: {0}")]
    NotFound(String),
}

/// Input validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("secret key cannot be empty")]
    EmptyKey,

    #[error("invalid secret key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },
}

/// Top-level error type for all warren operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Secret(#[from] SecretError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Convenience result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
