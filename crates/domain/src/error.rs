//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur while building the test model.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// A getter names a response source that does not exist.
    #[error("unsupported getter type: {0:?} (expected \"header\" or \"body\")")]
    UnsupportedGetterSource(String),

    /// An environment override is not of the form `key=value`.
    #[error("invalid environment override {0:?}: expected key=value")]
    InvalidOverride(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
