//! Domain types.

mod credential;
mod secret;

pub use credential::{Credential, ServiceToken};
pub use secret::{apply_personal_precedence, Secret, SecretType};
