//! Secret reference parsing.
//!
//! A secret value may embed other secrets with `${...}` syntax. A token
//! without dots names a key in the same batch; a dotted token names a key
//! in another environment and folder path of the project:
//!
//! ```text
//! ${DB_HOST}                  key DB_HOST in the current batch
//! ${prod.DB_HOST}             environment prod, path /
//! ${prod.infra.DB_HOST}       environment prod, path /infra
//! ${prod.infra.pg.DB_HOST}    environment prod, path /infra/pg
//! ```
//!
//! Parsing is total: malformed constructs are not references, they are
//! literal text.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Matches `${token}` where the token contains no whitespace or braces.
    /// Tokens with whitespace stay literal.
    static ref REFERENCE_REGEX: Regex = Regex::new(r"\$\{([^\s{}]+)\}").unwrap();
}

/// A single parsed occurrence of a secret reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// The full matched text, braces included. Substitution replaces every
    /// occurrence of this exact string.
    pub raw: String,
    /// The inner token, used to track in-progress expansions.
    pub token: String,
    /// Where the referenced secret lives.
    pub target: Target,
}

/// Classified target of a reference token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Key in the current batch.
    Local { key: String },
    /// Key in another scope of the project.
    Remote {
        environment: String,
        path: String,
        key: String,
    },
}

/// Parse all references in a value, in match order. Duplicate occurrences
/// of the same token yield one entry each.
pub fn parse(value: &str) -> Vec<Reference> {
    REFERENCE_REGEX
        .captures_iter(value)
        .map(|caps| {
            let token = caps[1].to_string();
            Reference {
                raw: caps[0].to_string(),
                target: classify(&token),
                token,
            }
        })
        .collect()
}

/// Whether a value contains at least one reference.
pub fn contains_reference(value: &str) -> bool {
    REFERENCE_REGEX.is_match(value)
}

/// Split a token into its target.
///
/// No dots: a local key. Otherwise the first segment is the environment,
/// the last is the key, and the middle segments form the folder path.
fn classify(token: &str) -> Target {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() == 1 {
        return Target::Local {
            key: token.to_string(),
        };
    }

    let environment = segments[0].to_string();
    let key = segments[segments.len() - 1].to_string();
    let middle = &segments[1..segments.len() - 1];
    let path = if middle.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", middle.join("/"))
    };

    Target::Remote {
        environment,
        path,
        key,
    }
}
