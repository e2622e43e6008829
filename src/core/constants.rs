//! Constants used throughout warren.
//!
//! Centralizes magic strings and configuration values.

/// Configuration file name (.warren.toml).
pub const CONFIG_FILE: &str = ".warren.toml";

/// Environment variable holding a bearer token credential.
pub const TOKEN_ENV: &str = "WARREN_TOKEN";

/// Environment variable holding a service token credential (st.*).
pub const SERVICE_TOKEN_ENV: &str = "WARREN_SERVICE_TOKEN";

/// Environment variable overriding the store base URL.
pub const BASE_URL_ENV: &str = "WARREN_BASE_URL";

/// Environment variable overriding the environment slug.
pub const ENVIRONMENT_ENV: &str = "WARREN_ENVIRONMENT";

/// Environment variable overriding the folder path.
pub const PATH_ENV: &str = "WARREN_PATH";

/// Environment slug used when none is configured.
pub const DEFAULT_ENVIRONMENT: &str = "dev";

/// Root folder path.
pub const ROOT_PATH: &str = "/";

/// Prefix identifying a service token credential.
pub const SERVICE_TOKEN_PREFIX: &str = "st.";
