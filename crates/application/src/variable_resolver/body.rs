//! Body modifiers
//!
//! Patches the raw JSON payload of a test case before it is templated.

use litmus_domain::BodyModifier;
use serde_json::Value;
use thiserror::Error;

use crate::json_path::{self, SetPathError};

/// Errors raised while applying body modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BodyModifierError {
    /// The payload is not valid JSON, so it cannot be patched.
    #[error("body is not valid JSON: {0}")]
    InvalidJson(String),

    /// A modifier path could not be written.
    #[error("cannot set {path:?}: {source}")]
    Path {
        /// The modifier path.
        path: String,
        /// Why the write failed.
        #[source]
        source: SetPathError,
    },
}

/// Applies `modifiers` to `body` in order and returns the new payload.
///
/// Without modifiers the body is returned untouched, byte for byte. An empty
/// body is treated as an empty JSON object.
///
/// # Errors
///
/// Returns [`BodyModifierError`] when the body is not JSON or a path cannot
/// be created.
pub fn apply_body_modifiers(
    body: &str,
    modifiers: &[BodyModifier],
) -> Result<String, BodyModifierError> {
    if modifiers.is_empty() {
        return Ok(body.to_string());
    }

    let mut document: Value = if body.trim().is_empty() {
        Value::Object(serde_json::Map::new())
    } else {
        serde_json::from_str(body).map_err(|e| BodyModifierError::InvalidJson(e.to_string()))?
    };

    for modifier in modifiers {
        json_path::set(&mut document, &modifier.path, modifier.value.clone()).map_err(|source| {
            BodyModifierError::Path {
                path: modifier.path.clone(),
                source,
            }
        })?;
    }

    Ok(document.to_string())
}
