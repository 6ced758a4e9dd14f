//! Response value extraction.
//!
//! Each response-source kind has its own [`Extractor`] implementation.
//! Bodies are decoded once per response by the [`BodyDecoder`] an
//! [`ExtractorRegistry`] selects from the declared [`ContentKind`]; every
//! body getter then reads the same [`DecodedBody`].

mod body;
mod header;
mod json;
mod registry;

use litmus_domain::GetterConfig;
use thiserror::Error;

pub use body::{BodyDecoder, BodyExtractor, DecodedBody};
pub use header::HeaderExtractor;
pub use json::{JsonBodyDecoder, JsonDocument};
pub use registry::{ContentKind, ExtractorRegistry};

/// Errors raised while extracting a value from a response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// The locator does not resolve to a value.
    #[error("no value found for {source_kind} {locator:?}")]
    NotFound {
        /// `"header"` or `"body path"`.
        source_kind: &'static str,
        /// The header name or body path.
        locator: String,
    },

    /// No body decoder is registered for the response's content type.
    #[error("unsupported Content-Type {content_type:?}")]
    UnsupportedContent {
        /// The declared content type, empty if none was sent.
        content_type: String,
    },

    /// The body does not parse as the declared content kind.
    #[error("invalid response body: {0}")]
    InvalidBody(String),
}

/// Retrieves the value a getter points at from one kind of response source.
pub trait Extractor<S: ?Sized>: Send + Sync {
    /// Returns the value `config.path` locates in `source`, rendered as text.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::NotFound`] when the locator does not resolve.
    fn get(&self, config: &GetterConfig, source: &S) -> Result<String, ExtractError>;
}
