//! On-disk test case schema.
//!
//! The file schema is looser than [`TestCase`]: it accepts `payload` as an
//! alias for `body`, `bodymod` as a mapping, and the keyed `head` / `body`
//! getter maps. Everything is normalized into [`TestCase`] at load time.

use indexmap::IndexMap;
use litmus_application::variable_resolver::is_valid_variable_name;
use litmus_domain::{BodyModifier, GetterConfig, GetterSource, HttpMethod, TestCase, render_value};
use serde::Deserialize;
use serde_json::Value;

/// A getter written as a map entry rather than a [`GetterConfig`].
///
/// ```yaml
/// body:
///   hello: world          # Scalar: assert `hello` equals "world"
///   user_id:              # Keyed: store `data.id` as `user_id`...
///     data.id: ""         # ...asserting it only if the value is non-empty
///   count: 5              # non-string scalars are compared as text
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LegacyGetter {
    /// `variable: { locator: expected }`.
    Keyed(IndexMap<String, Value>),
    /// `locator: expected`.
    Scalar(Value),
}

impl LegacyGetter {
    /// Converts the entry keyed by `key` into a canonical getter.
    ///
    /// # Errors
    ///
    /// Returns a message if a keyed entry does not hold exactly one
    /// `locator: expected` pair, or if an expectation is a list or mapping.
    pub fn into_getter(self, source: GetterSource, key: String) -> Result<GetterConfig, String> {
        match self {
            Self::Scalar(expected) => {
                let expected = expectation(source, &key, &expected)?;
                Ok(GetterConfig::new(source, key).expecting(expected))
            }
            Self::Keyed(entries) => {
                if entries.len() != 1 {
                    return Err(format!(
                        "{source} getter {key:?} must map to exactly one locator, found {}",
                        entries.len()
                    ));
                }
                let Some((path, expected)) = entries.into_iter().next() else {
                    return Err(format!("{source} getter {key:?} has no locator"));
                };
                let expected = expectation(source, &key, &expected)?;
                Ok(GetterConfig::new(source, path)
                    .expecting(expected)
                    .storing_as(key))
            }
        }
    }
}

/// Renders a scalar expectation the way extracted values are rendered, so
/// `5` in a file matches the `5` a response carries.
fn expectation(source: GetterSource, key: &str, value: &Value) -> Result<String, String> {
    match value {
        Value::Array(_) | Value::Object(_) => Err(format!(
            "{source} getter {key:?} must expect a scalar value"
        )),
        scalar => Ok(render_value(scalar)),
    }
}

/// `body` is either the raw payload or a keyed getter map.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawBody {
    Payload(String),
    Getters(IndexMap<String, LegacyGetter>),
}

/// One test case as written in a file.
#[derive(Debug, Deserialize)]
pub(super) struct RawTestCase {
    #[serde(default)]
    name: String,
    #[serde(default)]
    method: HttpMethod,
    url: String,
    #[serde(default)]
    headers: IndexMap<String, String>,
    #[serde(default)]
    query: IndexMap<String, String>,
    #[serde(default)]
    payload: Option<String>,
    #[serde(default)]
    body: Option<RawBody>,
    #[serde(default)]
    bodymod: IndexMap<String, Value>,
    #[serde(default)]
    head: IndexMap<String, LegacyGetter>,
    #[serde(default)]
    getters: Vec<GetterConfig>,
    #[serde(default)]
    wants_code: u16,
}

impl RawTestCase {
    pub(super) fn name(&self) -> &str {
        &self.name
    }

    /// Normalizes into a [`TestCase`]. Canonical getters keep their order
    /// and are followed by legacy header getters, then legacy body getters.
    pub(super) fn into_test_case(self) -> Result<TestCase, String> {
        let (body, legacy_body) = match (self.payload, self.body) {
            (Some(_), Some(RawBody::Payload(_))) => {
                return Err("both `payload` and a string `body` are set".to_string());
            }
            (payload, Some(RawBody::Payload(body))) => (payload.unwrap_or(body), IndexMap::new()),
            (payload, Some(RawBody::Getters(getters))) => (payload.unwrap_or_default(), getters),
            (payload, None) => (payload.unwrap_or_default(), IndexMap::new()),
        };

        let mut getters = self.getters;
        for (key, legacy) in self.head {
            getters.push(legacy.into_getter(GetterSource::Header, key)?);
        }
        for (key, legacy) in legacy_body {
            getters.push(legacy.into_getter(GetterSource::Body, key)?);
        }
        if let Some(getter) = getters
            .iter()
            .find(|g| g.propagates() && !is_valid_variable_name(&g.set))
        {
            return Err(format!(
                "cannot store {:?} into {:?}: not a valid variable name",
                getter.path, getter.set
            ));
        }

        Ok(TestCase {
            name: self.name,
            method: self.method,
            url: self.url,
            headers: self.headers,
            query: self.query,
            body,
            body_modifiers: self
                .bodymod
                .into_iter()
                .map(|(path, value)| BodyModifier::new(path, value))
                .collect(),
            wants_code: self.wants_code,
            getters,
        })
    }
}

/// Top level of a TOML test file: `[[litmus.test]]` tables.
#[derive(Debug, Deserialize)]
pub(super) struct TomlTestFile {
    pub(super) litmus: TomlSection,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct TomlSection {
    #[serde(default)]
    pub(super) test: Vec<RawTestCase>,
}
