//! Warren - resolved secrets from a hosted store, straight into your environment.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── init          # Write .warren.toml
//! │   ├── export        # Render resolved secrets (dotenv/shell/json)
//! │   ├── run           # Run with injected secrets
//! │   ├── get           # Print one resolved value
//! │   ├── list          # List keys in scope
//! │   ├── status        # Offline workspace overview
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── config        # .warren.toml management + env overrides
//!     ├── domain/       # Secret, SecretType, Credential
//!     ├── reference     # ${...} reference parsing
//!     ├── resolve       # Recursive reference resolution
//!     ├── crypto        # AES-256-GCM envelopes, HKDF key derivation
//!     ├── client        # Store API client (both credential modes)
//!     ├── workspace     # Config + credential + source facade
//!     └── env           # Rendering a resolved batch
//! ```
//!
//! # Features
//!
//! - Recursive `${...}` reference resolution across environments and paths
//! - Bearer and service token credential modes behind one fetch trait
//! - Client-side AES-256-GCM decryption for service token mode
//! - dotenv, shell, and JSON export of a resolved scope
//! - Secrets stay off disk; credentials come from the environment

pub mod cli;
pub mod core;
pub mod error;
