//! Type aliases for domain concepts.
//!
//! Provides semantic type aliases to make function signatures more descriptive.

/// A secret key name (e.g., DATABASE_URL, API_KEY).
pub type SecretKey = String;

/// An environment slug (e.g., dev, staging, prod).
pub type EnvironmentSlug = String;

/// A folder path within a project. Always starts with `/`.
pub type FolderPath = String;
