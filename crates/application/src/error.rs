//! Run error types

use litmus_domain::format_status;
use thiserror::Error;

use crate::assertion::GetterError;
use crate::extract::ExtractError;
use crate::ports::HttpClientError;
use crate::variable_resolver::{ResolveError, TemplateError};

/// The terminal error of a test case, wrapped with the step that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    /// Template resolution failed.
    #[error("applying environment: {0}")]
    ApplyingEnvironment(#[from] ResolveError),

    /// The transport failed.
    #[error("performing request: {0}")]
    PerformingRequest(#[from] HttpClientError),

    /// The response status differs from the declared `wants_code`.
    #[error(
        "expected response code: {}, but got: {}",
        format_status(*expected),
        format_status(*actual)
    )]
    StatusMismatch {
        /// Declared status code.
        expected: u16,
        /// Received status code.
        actual: u16,
    },

    /// A header getter failed.
    #[error("extracting header: {0}")]
    ExtractingHeader(#[source] GetterError),

    /// A body getter failed.
    #[error("extracting body: {0}")]
    ExtractingBody(#[source] GetterError),

    /// The response body could not be read.
    #[error("reading response body: {0}")]
    ReadingBody(#[source] HttpClientError),
}

impl RunError {
    /// Returns the template failure, if resolution is what failed.
    #[must_use]
    pub const fn template_error(&self) -> Option<&TemplateError> {
        match self {
            Self::ApplyingEnvironment(e) => e.template_error(),
            _ => None,
        }
    }

    /// Returns the getter failure, if extraction, assertion or propagation
    /// is what failed.
    #[must_use]
    pub const fn getter_error(&self) -> Option<&GetterError> {
        match self {
            Self::ExtractingHeader(e) | Self::ExtractingBody(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the extraction failure, if any.
    #[must_use]
    pub const fn extract_error(&self) -> Option<&ExtractError> {
        match self.getter_error() {
            Some(GetterError::Extract(e)) => Some(e),
            _ => None,
        }
    }
}

/// Result type alias for run operations.
pub type RunResult<T> = Result<T, RunError>;
