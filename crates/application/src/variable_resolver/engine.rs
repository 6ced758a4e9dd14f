//! Variable resolution engine
//!
//! Resolves `{{variable}}` references against the run environment.

use litmus_domain::{Environment, TestCase};
use thiserror::Error;

use super::body::{BodyModifierError, apply_body_modifiers};
use super::parser::{TemplateError, parse_variables};

/// Error raised when a test case cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// A templated field failed to resolve.
    #[error("{field}: {source}")]
    Template {
        /// Which field failed, e.g. `url` or `header "Authorization"`.
        field: String,
        /// The template failure.
        #[source]
        source: TemplateError,
    },

    /// The body could not be patched before templating.
    #[error("applying body modifiers: {0}")]
    BodyModifier(#[from] BodyModifierError),
}

impl ResolveError {
    /// Returns the underlying template error, if that is what failed.
    #[must_use]
    pub const fn template_error(&self) -> Option<&TemplateError> {
        match self {
            Self::Template { source, .. } => Some(source),
            Self::BodyModifier(_) => None,
        }
    }
}

/// The template resolution engine.
/// Borrows the environment; resolution never mutates it.
#[derive(Debug, Clone, Copy)]
pub struct TemplateResolver<'env> {
    env: &'env Environment,
}

impl<'env> TemplateResolver<'env> {
    /// Creates a resolver over the given environment.
    #[must_use]
    pub const fn new(env: &'env Environment) -> Self {
        Self { env }
    }

    /// Resolves every placeholder in `input`.
    ///
    /// Input without placeholders is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns a [`TemplateError`] for malformed placeholders or unknown
    /// variables. No partial output is produced.
    pub fn resolve(&self, input: &str) -> Result<String, TemplateError> {
        let references = parse_variables(input)?;

        if references.is_empty() {
            return Ok(input.to_string());
        }

        let mut result = String::with_capacity(input.len());
        let mut last_end = 0;

        for var_ref in &references {
            // Append text before this variable
            result.push_str(&input[last_end..var_ref.span.start]);

            let value = self.env.get_rendered(&var_ref.name).ok_or_else(|| {
                TemplateError::UnknownVariable {
                    name: var_ref.name.clone(),
                }
            })?;
            result.push_str(&value);

            last_end = var_ref.span.end;
        }

        // Append remaining text after last variable
        result.push_str(&input[last_end..]);

        Ok(result)
    }

    /// Produces a resolved copy of `case`.
    ///
    /// Body modifiers are applied to the raw body first; then the URL, body,
    /// every header value, every query value and every getter's locator and
    /// expected value are resolved. The first failure aborts the whole case.
    ///
    /// # Errors
    ///
    /// Returns a [`ResolveError`] naming the field that failed.
    pub fn resolve_case(&self, case: &TestCase) -> Result<TestCase, ResolveError> {
        let mut resolved = case.clone();

        resolved.url = self.field("url", &case.url)?;

        let body = apply_body_modifiers(&case.body, &case.body_modifiers)?;
        resolved.body = self.field("body", &body)?;
        resolved.body_modifiers.clear();

        for (name, value) in &mut resolved.headers {
            *value = self.field(&format!("header {name:?}"), value)?;
        }

        for (name, value) in &mut resolved.query {
            *value = self.field(&format!("query {name:?}"), value)?;
        }

        for (i, getter) in resolved.getters.iter_mut().enumerate() {
            getter.path = self.field(&format!("getter #{} path", i + 1), &getter.path)?;
            getter.expected = self.field(&format!("getter #{} exp", i + 1), &getter.expected)?;
        }

        Ok(resolved)
    }

    fn field(&self, field: &str, input: &str) -> Result<String, ResolveError> {
        self.resolve(input).map_err(|source| ResolveError::Template {
            field: field.to_string(),
            source,
        })
    }
}
