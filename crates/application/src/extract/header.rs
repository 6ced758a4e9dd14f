//! Header extractor

use litmus_domain::{GetterConfig, ResponseHeaders};

use super::{ExtractError, Extractor};

/// Extracts values from response headers.
///
/// Header names match case-insensitively; the first value of the first
/// matching header is returned.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderExtractor;

impl Extractor<ResponseHeaders> for HeaderExtractor {
    fn get(&self, config: &GetterConfig, headers: &ResponseHeaders) -> Result<String, ExtractError> {
        headers
            .first(&config.path)
            .map(str::to_string)
            .ok_or_else(|| ExtractError::NotFound {
                source_kind: "header",
                locator: config.path.clone(),
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn headers() -> ResponseHeaders {
        [
            ("Content-Type", "application/json"),
            ("X-Request-Id", "abc"),
            ("x-request-id", "def"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let headers = headers();
        let lower = HeaderExtractor.get(&GetterConfig::header("content-type"), &headers);
        let upper = HeaderExtractor.get(&GetterConfig::header("Content-Type"), &headers);

        assert_eq!(lower.unwrap(), "application/json");
        assert_eq!(upper.unwrap(), "application/json");
    }

    #[test]
    fn test_first_match_wins() {
        let value = HeaderExtractor
            .get(&GetterConfig::header("X-REQUEST-ID"), &headers())
            .unwrap();
        assert_eq!(value, "abc");
    }

    #[test]
    fn test_missing_header() {
        let err = HeaderExtractor
            .get(&GetterConfig::header("Location"), &headers())
            .unwrap_err();
        assert_eq!(
            err,
            ExtractError::NotFound {
                source_kind: "header",
                locator: "Location".to_string()
            }
        );
    }
}
