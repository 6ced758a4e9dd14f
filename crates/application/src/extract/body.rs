//! Decoded response bodies

use litmus_domain::GetterConfig;

use super::{ExtractError, Extractor};

/// A response body parsed into a structure that paths can be looked up in.
pub trait DecodedBody: Send + Sync {
    /// Returns the value at `path` rendered as text, or `None` if the path
    /// does not resolve.
    fn lookup(&self, path: &str) -> Option<String>;
}

/// Parses raw body bytes of one content kind.
pub trait BodyDecoder: Send + Sync {
    /// Decodes `body` into a document.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::InvalidBody`] if `body` is not well formed.
    fn decode(&self, body: &[u8]) -> Result<Box<dyn DecodedBody>, ExtractError>;
}

/// Reads body getters from an already decoded body.
#[derive(Debug, Clone, Copy, Default)]
pub struct BodyExtractor;

impl Extractor<dyn DecodedBody> for BodyExtractor {
    fn get(&self, config: &GetterConfig, body: &dyn DecodedBody) -> Result<String, ExtractError> {
        body.lookup(&config.path)
            .ok_or_else(|| ExtractError::NotFound {
                source_kind: "body path",
                locator: config.path.clone(),
            })
    }
}
