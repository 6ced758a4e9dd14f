//! Variable parser for {{variable}} syntax
//!
//! Parses strings to extract variable references with their positions.
//! Parsing is strict: an unclosed `{{`, an empty placeholder or an invalid
//! name is an error rather than literal text.

use std::ops::Range;

use thiserror::Error;

/// Errors raised while parsing or expanding a template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// A `{{` was never closed by `}}`.
    #[error("unclosed placeholder starting at byte {position}")]
    Unclosed {
        /// Byte offset of the opening delimiter.
        position: usize,
    },

    /// A placeholder contains no variable name.
    #[error("empty placeholder at byte {position}")]
    EmptyPlaceholder {
        /// Byte offset of the opening delimiter.
        position: usize,
    },

    /// A placeholder contains something that is not a variable name.
    #[error("invalid variable name {name:?} at byte {position}")]
    InvalidName {
        /// The text between the delimiters.
        name: String,
        /// Byte offset of the opening delimiter.
        position: usize,
    },

    /// The referenced variable is not in the environment.
    #[error("unknown variable {name:?}")]
    UnknownVariable {
        /// The variable name.
        name: String,
    },
}

/// Represents a parsed variable reference in a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableReference {
    /// The variable name (without {{ }}).
    pub name: String,

    /// Byte range in the original string where this reference appears.
    pub span: Range<usize>,
}

impl VariableReference {
    /// Creates a new variable reference.
    #[must_use]
    pub fn new(name: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// Parses a string and extracts all variable references.
///
/// Supports `{{name}}`, `{{ name }}` and the dotted form `{{.name}}`.
///
/// # Errors
///
/// Returns a [`TemplateError`] for unbalanced delimiters, empty placeholders
/// and invalid variable names.
///
/// # Examples
///
/// ```
/// use litmus_application::variable_resolver::parse_variables;
///
/// let refs = parse_variables("http://{{host}}/users/{{ .id }}").unwrap();
/// assert_eq!(refs.len(), 2);
/// assert_eq!(refs[0].name, "host");
/// assert_eq!(refs[1].name, "id");
/// ```
pub fn parse_variables(input: &str) -> Result<Vec<VariableReference>, TemplateError> {
    let mut references = Vec::new();
    let mut cursor = 0;

    while let Some(offset) = input[cursor..].find("{{") {
        let start = cursor + offset;
        let inner_start = start + 2;

        let Some(close) = input[inner_start..].find("}}") else {
            return Err(TemplateError::Unclosed { position: start });
        };
        let inner = &input[inner_start..inner_start + close];
        let end = inner_start + close + 2;

        if inner.contains("{{") {
            return Err(TemplateError::Unclosed { position: start });
        }

        let trimmed = inner.trim();
        let name = trimmed.strip_prefix('.').unwrap_or(trimmed).trim();
        if name.is_empty() {
            return Err(TemplateError::EmptyPlaceholder { position: start });
        }
        if !is_valid_variable_name(name) {
            return Err(TemplateError::InvalidName {
                name: name.to_string(),
                position: start,
            });
        }

        references.push(VariableReference::new(name, start..end));
        cursor = end;
    }

    Ok(references)
}

/// Validates a variable name.
/// Valid names: alphanumeric, underscore and hyphen, not starting with a digit or hyphen.
#[must_use]
pub fn is_valid_variable_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }

    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_simple_variable() {
        let refs = parse_variables("{{name}}").unwrap();
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].name, "name");
        assert_eq!(refs[0].span, 0..8);
    }

    #[test]
    fn test_parse_dotted_variable() {
        let refs = parse_variables("{{.base}}").unwrap();
        assert_eq!(refs[0].name, "base");
    }

    #[test]
    fn test_parse_multiple_variables() {
        let refs = parse_variables("{{base_url}}/api/{{version}}/users").unwrap();
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].name, "base_url");
        assert_eq!(refs[1].name, "version");
    }

    #[test]
    fn test_parse_with_whitespace() {
        let refs = parse_variables("{{ name }}").unwrap();
        assert_eq!(refs[0].name, "name");
    }

    #[test]
    fn test_no_variables() {
        assert!(parse_variables("Hello, World!").unwrap().is_empty());
        assert!(parse_variables("{single} braces}}").unwrap().is_empty());
    }

    #[test]
    fn test_unclosed_variable() {
        assert_eq!(
            parse_variables("ok {{name").unwrap_err(),
            TemplateError::Unclosed { position: 3 }
        );
    }

    #[test]
    fn test_nested_opening_is_unclosed() {
        assert!(matches!(
            parse_variables("{{a{{b}}"),
            Err(TemplateError::Unclosed { position: 0 })
        ));
    }

    #[test]
    fn test_empty_variable() {
        assert_eq!(
            parse_variables("{{  }}").unwrap_err(),
            TemplateError::EmptyPlaceholder { position: 0 }
        );
    }

    #[test]
    fn test_invalid_name() {
        assert!(matches!(
            parse_variables("{{1abc}}"),
            Err(TemplateError::InvalidName { .. })
        ));
    }

    #[test]
    fn test_variable_in_json() {
        let refs = parse_variables(r#"{"name": "{{user_name}}", "id": {{id}}}"#).unwrap();
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].name, "user_name");
        assert_eq!(refs[1].name, "id");
    }

    #[test]
    fn test_adjacent_variables() {
        let names: Vec<String> = parse_variables("{{a}}{{b}}{{c}}")
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_valid_variable_names() {
        assert!(is_valid_variable_name("name"));
        assert!(is_valid_variable_name("my_var"));
        assert!(is_valid_variable_name("var-name"));
        assert!(is_valid_variable_name("_private"));
        assert!(!is_valid_variable_name(""));
        assert!(!is_valid_variable_name("123var"));
        assert!(!is_valid_variable_name("-start"));
        assert!(!is_valid_variable_name("a.b"));
    }

    #[test]
    fn test_span_positions() {
        let input = "Hello {{name}}, welcome!";
        let refs = parse_variables(input).unwrap();
        assert_eq!(&input[refs[0].span.clone()], "{{name}}");
    }
}
