//! Assertion and propagation of extracted values.

use litmus_domain::{Environment, GetterConfig};
use thiserror::Error;

use crate::extract::ExtractError;

/// An extracted value did not match its expectation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("assertion failed for {locator:?}\n\texp: {expected}\n\tgot: {actual}")]
pub struct AssertionError {
    /// The getter's locator.
    pub locator: String,
    /// The expected value.
    pub expected: String,
    /// The extracted value.
    pub actual: String,
}

/// Errors raised while applying one getter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetterError {
    /// The value could not be extracted.
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// The value did not match its expectation.
    #[error(transparent)]
    Assertion(#[from] AssertionError),

    /// Propagation was requested but no environment exists.
    #[error("cannot set {name:?}: no environment available")]
    EnvironmentUnavailable {
        /// The variable that could not be set.
        name: String,
    },
}

/// What one getter produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetterOutcome {
    /// The resolved locator.
    pub path: String,
    /// The extracted value.
    pub value: String,
    /// The variable the value was stored in, if any.
    pub stored_as: Option<String>,
}

/// Compares `actual` to the getter's expectation by exact string equality.
/// A getter without an expectation always passes.
///
/// # Errors
///
/// Returns [`AssertionError`] carrying both values on mismatch.
pub fn assert_value(getter: &GetterConfig, actual: &str) -> Result<(), AssertionError> {
    if !getter.asserts() || getter.expected == actual {
        return Ok(());
    }

    Err(AssertionError {
        locator: getter.path.clone(),
        expected: getter.expected.clone(),
        actual: actual.to_string(),
    })
}

/// Stores `value` under the getter's `set` name. Returns the name written, if
/// any.
///
/// # Errors
///
/// Returns [`GetterError::EnvironmentUnavailable`] if propagation is
/// requested while `env` is `None`.
pub fn propagate(
    getter: &GetterConfig,
    value: &str,
    env: Option<&mut Environment>,
) -> Result<Option<String>, GetterError> {
    if !getter.propagates() {
        return Ok(None);
    }

    let env = env.ok_or_else(|| GetterError::EnvironmentUnavailable {
        name: getter.set.clone(),
    })?;
    env.set(getter.set.clone(), value);
    tracing::debug!(name = %getter.set, value, "environment variable set");

    Ok(Some(getter.set.clone()))
}

/// Asserts an already extracted value, then propagates it.
///
/// # Errors
///
/// Returns the assertion failure, or [`GetterError::EnvironmentUnavailable`].
pub fn check_value(
    getter: &GetterConfig,
    value: String,
    env: Option<&mut Environment>,
) -> Result<GetterOutcome, GetterError> {
    assert_value(getter, &value)?;
    let stored_as = propagate(getter, &value, env)?;

    Ok(GetterOutcome {
        path: getter.path.clone(),
        value,
        stored_as,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn world() -> String {
        "world".to_string()
    }

    #[test]
    fn test_empty_expectation_never_fails() {
        let getter = GetterConfig::body("hello");
        for actual in ["", "world", "anything"] {
            assert!(assert_value(&getter, actual).is_ok());
        }
    }

    #[test]
    fn test_expectation_fails_iff_different() {
        let getter = GetterConfig::body("hello").expecting("x");
        assert!(assert_value(&getter, "x").is_ok());

        let err = assert_value(&getter, "y").unwrap_err();
        assert_eq!(err.expected, "x");
        assert_eq!(err.actual, "y");
    }

    #[test]
    fn test_assert_only_does_not_propagate() {
        let mut env = Environment::new();
        let getter = GetterConfig::body("hello").expecting("world");

        let outcome = check_value(&getter, world(), Some(&mut env)).unwrap();
        assert_eq!(outcome.stored_as, None);
        assert_eq!(outcome.value, "world");
        assert!(env.is_empty());
    }

    #[test]
    fn test_assert_and_propagate() {
        let mut env = Environment::new();
        let getter = GetterConfig::body("hello")
            .expecting("world")
            .storing_as("greeting");

        let outcome = check_value(&getter, world(), Some(&mut env)).unwrap();
        assert_eq!(outcome.stored_as.as_deref(), Some("greeting"));
        assert_eq!(env.get_rendered("greeting"), Some("world".to_string()));
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn test_failed_assertion_skips_propagation() {
        let mut env = Environment::new();
        let getter = GetterConfig::body("hello").expecting("moon").storing_as("greeting");

        let err = check_value(&getter, world(), Some(&mut env)).unwrap_err();
        assert!(matches!(err, GetterError::Assertion(_)));
        assert!(!env.contains("greeting"));
    }

    #[test]
    fn test_propagation_without_environment() {
        let getter = GetterConfig::body("hello").storing_as("greeting");
        let err = check_value(&getter, world(), None).unwrap_err();
        assert_eq!(
            err,
            GetterError::EnvironmentUnavailable {
                name: "greeting".to_string()
            }
        );
    }
}
