//! Rendering resolved secrets for consumption.
//!
//! Turns a resolved batch into dotenv lines, shell export statements, or a
//! JSON object. All formats emit keys in sorted order so output is stable
//! across runs.

use std::collections::BTreeMap;

use crate::core::domain::Secret;
use crate::core::validation;
use crate::error::Result;

/// Key-to-secret map, sorted by key. Later duplicates win.
pub fn to_map(secrets: &[Secret]) -> BTreeMap<&str, &Secret> {
    secrets.iter().map(|s| (s.key.as_str(), s)).collect()
}

/// Render secrets as dotenv `KEY=value` lines.
///
/// Quotes values that contain spaces or special characters.
///
/// # Errors
///
/// Returns `ValidationError` if any key is not a valid environment
/// variable name.
pub fn render_dotenv(secrets: &[Secret]) -> Result<String> {
    let mut output = String::new();

    for (key, secret) in to_map(secrets) {
        validation::validate_key(key)?;

        // Quote values that contain spaces or special chars
        if secret.value.contains(' ') || secret.value.contains('#') || secret.value.contains('=')
        {
            output.push_str(&format!("{}=\"{}\"\n", key, secret.value));
        } else {
            output.push_str(&format!("{}={}\n", key, secret.value));
        }
    }

    Ok(output)
}

/// Render secrets as `export KEY='value'` statements for `eval` in a
/// POSIX shell. Values are single-quoted with embedded quotes escaped.
///
/// # Errors
///
/// Returns `ValidationError` if any key is not a valid environment
/// variable name.
pub fn render_shell(secrets: &[Secret]) -> Result<String> {
    let mut output = String::new();

    for (key, secret) in to_map(secrets) {
        validation::validate_key(key)?;

        let escaped = secret.value.replace('\'', "'\\''");
        output.push_str(&format!("export {}='{}'\n", key, escaped));
    }

    Ok(output)
}

/// Render secrets as a pretty-printed JSON object of key to value.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json(secrets: &[Secret]) -> Result<String> {
    let map: BTreeMap<&str, &str> = secrets
        .iter()
        .map(|s| (s.key.as_str(), s.value.as_str()))
        .collect();

    Ok(serde_json::to_string_pretty(&map)?)
}
