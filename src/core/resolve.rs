//! Recursive secret reference resolution.
//!
//! A fetched batch may contain values with `${...}` references to other
//! secrets, in the same scope or in another environment and folder. This
//! module expands those references to final plaintext values.
//!
//! The batch is split into a resolved map (no references) and a pending map
//! (at least one reference). Both maps are shared across the whole pass and
//! updated in place as values finish expanding, so each secret is expanded
//! at most once per pass. Remote references trigger one fetch per
//! occurrence through the [`SecretSource`] the caller supplies.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::core::domain::Secret;
use crate::core::reference::{self, Target};
use crate::core::types::SecretKey;
use crate::error::{ResolveError, Result};

/// Anything that can fetch the secret batch for an environment and folder
/// path. Implemented by both API-backed sources; tests substitute mocks.
pub trait SecretSource {
    /// Fetch all secrets visible under `environment` and `path`, with
    /// personal-over-shared precedence already applied.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying store is unreachable or rejects
    /// the request. Any error aborts the whole resolution pass.
    fn fetch(&self, environment: &str, path: &str) -> Result<Vec<Secret>>;
}

/// What to do when a reference points at no known secret.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingBehavior {
    /// Fail the pass with [`ResolveError::Missing`].
    #[default]
    Error,

    /// Substitute an empty string and log a warning.
    Empty,
}

/// Options for one resolution pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveOptions {
    pub missing: MissingBehavior,
}

/// Expand every reference in `secrets` and return the batch with final
/// values, in the same order as the input.
///
/// # Errors
///
/// Returns [`ResolveError::Cycle`] when references form a loop,
/// [`ResolveError::Missing`] when a reference matches nothing and
/// [`MissingBehavior::Error`] is in effect, and any fetch error from
/// `source` unchanged. On error no partial batch is returned.
pub fn resolve_batch<S: SecretSource + ?Sized>(
    secrets: Vec<Secret>,
    source: &S,
    options: ResolveOptions,
) -> Result<Vec<Secret>> {
    let order: Vec<SecretKey> = secrets.iter().map(|s| s.key.clone()).collect();

    let mut resolved: HashMap<SecretKey, Secret> = HashMap::new();
    let mut pending: HashMap<SecretKey, Secret> = HashMap::new();
    for secret in secrets {
        if reference::contains_reference(&secret.value) {
            pending.insert(secret.key.clone(), secret);
        } else {
            resolved.insert(secret.key.clone(), secret);
        }
    }
    debug!(
        resolved = resolved.len(),
        pending = pending.len(),
        "partitioned batch"
    );

    let roots: Vec<SecretKey> = pending.keys().cloned().collect();
    for root in roots {
        let value = match pending.get(&root) {
            Some(secret) => secret.value.clone(),
            // A previous root already expanded this entry away; nothing to do.
            None => continue,
        };
        let mut stack = vec![root.clone()];
        let expanded = expand(&value, &mut resolved, &mut pending, source, options, &mut stack)?;
        if let Some(entry) = pending.get_mut(&root) {
            entry.value = expanded;
        }
    }

    let mut output = Vec::with_capacity(order.len());
    for key in &order {
        if let Some(secret) = resolved.get(key).or_else(|| pending.get(key)) {
            output.push(secret.clone());
        }
    }
    Ok(output)
}

/// Expand every reference in a single value against a local batch.
///
/// Builds the resolved/pending maps from `batch` and expands `value` as if
/// it belonged to that batch. Used for single-secret lookups where the rest
/// of the scope is context, not output.
///
/// # Errors
///
/// Same failure modes as [`resolve_batch`].
pub fn expand_value<S: SecretSource + ?Sized>(
    value: &str,
    batch: &[Secret],
    source: &S,
    options: ResolveOptions,
) -> Result<String> {
    let mut resolved: HashMap<SecretKey, Secret> = HashMap::new();
    let mut pending: HashMap<SecretKey, Secret> = HashMap::new();
    for secret in batch {
        if reference::contains_reference(&secret.value) {
            pending.insert(secret.key.clone(), secret.clone());
        } else {
            resolved.insert(secret.key.clone(), secret.clone());
        }
    }

    let mut stack = Vec::new();
    expand(value, &mut resolved, &mut pending, source, options, &mut stack)
}

/// Expand one value. `stack` holds the token texts currently being
/// expanded, root first; re-entering any of them is a cycle.
fn expand<S: SecretSource + ?Sized>(
    value: &str,
    resolved: &mut HashMap<SecretKey, Secret>,
    pending: &mut HashMap<SecretKey, Secret>,
    source: &S,
    options: ResolveOptions,
    stack: &mut Vec<String>,
) -> Result<String> {
    let references = reference::parse(value);
    if references.is_empty() {
        return Ok(value.to_string());
    }

    let mut output = value.to_string();
    for reference in references {
        if stack.iter().any(|entry| *entry == reference.token) {
            stack.push(reference.token.clone());
            return Err(ResolveError::Cycle {
                chain: stack.join(" -> "),
            }
            .into());
        }

        let replacement = match &reference.target {
            Target::Local { key } => {
                if let Some(secret) = resolved.get(key) {
                    secret.value.clone()
                } else if let Some(secret) = pending.get(key) {
                    let nested = secret.value.clone();
                    stack.push(reference.token.clone());
                    let expanded = expand(&nested, resolved, pending, source, options, stack)?;
                    stack.pop();
                    // Store the final value so later roots reuse it instead
                    // of expanding again.
                    if let Some(entry) = pending.get_mut(key) {
                        entry.value = expanded.clone();
                    }
                    expanded
                } else {
                    substitute_missing(&reference.token, options)?
                }
            }
            Target::Remote {
                environment,
                path,
                key,
            } => {
                let batch = source.fetch(environment, path)?;
                debug!(
                    environment = %environment,
                    path = %path,
                    count = batch.len(),
                    "fetched referenced scope"
                );
                match batch.into_iter().find(|s| s.key == *key) {
                    Some(secret) => {
                        stack.push(reference.token.clone());
                        let expanded =
                            expand(&secret.value, resolved, pending, source, options, stack)?;
                        stack.pop();
                        expanded
                    }
                    None => substitute_missing(&reference.token, options)?,
                }
            }
        };

        output = output.replace(&reference.raw, &replacement);
    }

    Ok(output)
}

fn substitute_missing(token: &str, options: ResolveOptions) -> Result<String> {
    match options.missing {
        MissingBehavior::Error => Err(ResolveError::Missing {
            token: token.to_string(),
        }
        .into()),
        MissingBehavior::Empty => {
            warn!("unresolved reference ${{{}}}: substituting empty string", token);
            Ok(String::new())
        }
    }
}
