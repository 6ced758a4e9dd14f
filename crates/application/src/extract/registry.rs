//! Body extractor registry

use std::collections::HashMap;
use std::fmt;

use mime::Mime;

use super::{BodyDecoder, ExtractError, JsonBodyDecoder};

/// Structured body formats a response can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    /// `application/json` or any `+json` media type.
    Json,
}

impl ContentKind {
    /// Derives the content kind from a `Content-Type` header value.
    ///
    /// Parameters such as `charset` are ignored.
    #[must_use]
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let mime: Mime = content_type.trim().parse().ok()?;

        let is_json = (mime.type_() == mime::APPLICATION && mime.subtype() == mime::JSON)
            || mime.suffix() == Some(mime::JSON);

        is_json.then_some(Self::Json)
    }
}

/// Maps each [`ContentKind`] to the decoder that reads it.
pub struct ExtractorRegistry {
    body: HashMap<ContentKind, Box<dyn BodyDecoder>>,
}

impl ExtractorRegistry {
    /// Creates a registry with no body decoders.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            body: HashMap::new(),
        }
    }

    /// Registers (or replaces) the decoder for `kind`.
    #[must_use]
    pub fn register(mut self, kind: ContentKind, decoder: impl BodyDecoder + 'static) -> Self {
        self.body.insert(kind, Box::new(decoder));
        self
    }

    /// Selects the body decoder for a response's declared content type.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::UnsupportedContent`] when the content type is
    /// missing, unparseable or has no registered decoder.
    pub fn select(&self, content_type: Option<&str>) -> Result<&dyn BodyDecoder, ExtractError> {
        let declared = content_type.unwrap_or_default();

        ContentKind::from_content_type(declared)
            .and_then(|kind| self.body.get(&kind))
            .map(|decoder| &**decoder)
            .ok_or_else(|| ExtractError::UnsupportedContent {
                content_type: declared.to_string(),
            })
    }
}

impl Default for ExtractorRegistry {
    /// The default registry knows how to read JSON bodies.
    fn default() -> Self {
        Self::empty().register(ContentKind::Json, JsonBodyDecoder)
    }
}

impl fmt::Debug for ExtractorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractorRegistry")
            .field("kinds", &self.body.keys().collect::<Vec<_>>())
            .finish()
    }
}
