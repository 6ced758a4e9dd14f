//! Parsing of `key=value` environment overrides.

use crate::error::{DomainError, DomainResult};

/// Parses a single `key=value` override as given on the command line.
///
/// The key is trimmed; the value is kept verbatim. Values may not contain a
/// further `=`, and the key may not be empty.
///
/// # Errors
///
/// Returns [`DomainError::InvalidOverride`] when the input is malformed.
pub fn parse_override(input: &str) -> DomainResult<(String, String)> {
    let Some((key, value)) = input.split_once('=') else {
        return Err(DomainError::InvalidOverride(input.to_string()));
    };

    let key = key.trim();
    if key.is_empty() || value.contains('=') {
        return Err(DomainError::InvalidOverride(input.to_string()));
    }

    Ok((key.to_string(), value.to_string()))
}
