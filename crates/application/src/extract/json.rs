//! JSON body decoding

use litmus_domain::render_value;
use serde_json::Value;

use super::{BodyDecoder, DecodedBody, ExtractError};
use crate::json_path;

/// Decodes JSON bodies into a [`JsonDocument`].
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBodyDecoder;

impl BodyDecoder for JsonBodyDecoder {
    fn decode(&self, body: &[u8]) -> Result<Box<dyn DecodedBody>, ExtractError> {
        let document: Value =
            serde_json::from_slice(body).map_err(|e| ExtractError::InvalidBody(e.to_string()))?;
        Ok(Box::new(JsonDocument(document)))
    }
}

/// A parsed JSON body addressed with dot-delimited paths.
///
/// Strings are returned without quotes, `null` as the empty string and
/// objects, arrays, numbers and booleans as compact JSON. Numbers keep the
/// exact text the server sent.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonDocument(pub Value);

impl DecodedBody for JsonDocument {
    fn lookup(&self, path: &str) -> Option<String> {
        json_path::lookup(&self.0, path).map(|value| render_value(&value))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn get(path: &str, body: &str) -> Option<String> {
        JsonBodyDecoder.decode(body.as_bytes()).unwrap().lookup(path)
    }

    #[test]
    fn test_nested_path() {
        assert_eq!(get("a.b", r#"{"a":{"b":"x"}}"#).as_deref(), Some("x"));
    }

    #[test]
    fn test_missing_path() {
        assert_eq!(get("a.b", r#"{"a":{}}"#), None);
    }

    #[test]
    fn test_array_index_and_length() {
        let body = r#"{"items":[{"id":7},{"id":8}]}"#;
        assert_eq!(get("items.1.id", body).as_deref(), Some("8"));
        assert_eq!(get("items.#", body).as_deref(), Some("2"));
    }

    #[test]
    fn test_value_rendering() {
        let body = r#"{"n":1.5,"ok":true,"none":null,"obj":{"k":"v"}}"#;
        assert_eq!(get("n", body).as_deref(), Some("1.5"));
        assert_eq!(get("ok", body).as_deref(), Some("true"));
        assert_eq!(get("none", body).as_deref(), Some(""));
        assert_eq!(get("obj", body).as_deref(), Some(r#"{"k":"v"}"#));
    }

    #[test]
    fn test_numbers_keep_their_text() {
        let body = r#"{"price":1.50,"big":123456789012345678901234,"exp":1e3,"neg":-0.0}"#;
        assert_eq!(get("price", body).as_deref(), Some("1.50"));
        assert_eq!(get("big", body).as_deref(), Some("123456789012345678901234"));
        assert_eq!(get("exp", body).as_deref(), Some("1e3"));
        assert_eq!(get("neg", body).as_deref(), Some("-0.0"));
    }

    #[test]
    fn test_nested_numbers_keep_their_text() {
        assert_eq!(
            get("obj", r#"{"obj":{"p":1.50}}"#).as_deref(),
            Some(r#"{"p":1.50}"#)
        );
    }

    #[test]
    fn test_invalid_body() {
        assert!(matches!(
            JsonBodyDecoder.decode(b"<html>"),
            Err(ExtractError::InvalidBody(_))
        ));
    }
}
