//! Core library components.
//!
//! This module contains the reusable business logic for secret fetching,
//! reference resolution, decryption, and configuration handling.

pub mod client;
pub mod config;
pub mod constants;
pub mod crypto;
pub mod domain;
pub mod env;
pub mod reference;
pub mod resolve;
pub mod types;
pub mod validation;
pub mod workspace;
