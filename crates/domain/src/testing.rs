//! Declarative HTTP test cases.
//!
//! A [`TestCase`] describes one HTTP exchange and the [`GetterConfig`] rules
//! that extract values from its response, assert them and optionally feed
//! them back into the run [`Environment`](crate::Environment).

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DomainError, DomainResult};
use crate::request::HttpMethod;

/// The part of a response a getter reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum GetterSource {
    /// Response headers, matched case-insensitively.
    Header,
    /// Structured response body.
    Body,
}

impl GetterSource {
    /// Returns the canonical name used in test files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Body => "body",
        }
    }
}

impl fmt::Display for GetterSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GetterSource {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "header" | "head" => Ok(Self::Header),
            "body" => Ok(Self::Body),
            other => Err(DomainError::UnsupportedGetterSource(other.to_string())),
        }
    }
}

impl TryFrom<String> for GetterSource {
    type Error = DomainError;

    fn try_from(value: String) -> DomainResult<Self> {
        value.parse()
    }
}

impl From<GetterSource> for String {
    fn from(source: GetterSource) -> Self {
        source.as_str().to_string()
    }
}

/// One extraction rule: locate a value, optionally assert it, optionally
/// store it in the environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetterConfig {
    /// Header name or dot-delimited body path.
    pub path: String,
    /// Which part of the response to read.
    #[serde(rename = "type")]
    pub source: GetterSource,
    /// Expected value; empty means extraction only.
    #[serde(default, rename = "exp")]
    pub expected: String,
    /// Environment variable to store the value in; empty means don't store.
    #[serde(default)]
    pub set: String,
}

impl GetterConfig {
    /// Creates a getter that only extracts.
    #[must_use]
    pub fn new(source: GetterSource, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            source,
            expected: String::new(),
            set: String::new(),
        }
    }

    /// Creates a header getter.
    #[must_use]
    pub fn header(name: impl Into<String>) -> Self {
        Self::new(GetterSource::Header, name)
    }

    /// Creates a body getter.
    #[must_use]
    pub fn body(path: impl Into<String>) -> Self {
        Self::new(GetterSource::Body, path)
    }

    /// Sets the expected value.
    #[must_use]
    pub fn expecting(mut self, expected: impl Into<String>) -> Self {
        self.expected = expected.into();
        self
    }

    /// Sets the environment variable the value is stored in.
    #[must_use]
    pub fn storing_as(mut self, name: impl Into<String>) -> Self {
        self.set = name.into();
        self
    }

    /// Returns true if the extracted value is compared to an expectation.
    #[must_use]
    pub fn asserts(&self) -> bool {
        !self.expected.is_empty()
    }

    /// Returns true if the extracted value is written to the environment.
    #[must_use]
    pub fn propagates(&self) -> bool {
        !self.set.is_empty()
    }
}

/// A JSON edit applied to the request body before templating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyModifier {
    /// Dot-delimited path inside the JSON payload.
    pub path: String,
    /// Value written at `path`.
    pub value: Value,
}

impl BodyModifier {
    /// Creates a new body modifier.
    #[must_use]
    pub fn new(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            path: path.into(),
            value: value.into(),
        }
    }
}

/// One HTTP exchange plus the rules applied to its response.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TestCase {
    /// Identifier used for selection and reporting. Need not be unique.
    #[serde(default)]
    pub name: String,
    /// HTTP method.
    #[serde(default)]
    pub method: HttpMethod,
    /// Target URL, possibly containing placeholders.
    pub url: String,
    /// Request headers.
    #[serde(default)]
    pub headers: IndexMap<String, String>,
    /// Query parameters appended to the URL.
    #[serde(default)]
    pub query: IndexMap<String, String>,
    /// Raw request payload, possibly containing placeholders.
    #[serde(default)]
    pub body: String,
    /// JSON edits applied to `body`, in order, before templating.
    #[serde(default, rename = "bodymod")]
    pub body_modifiers: Vec<BodyModifier>,
    /// Expected status code; `0` means the status is not checked.
    #[serde(default)]
    pub wants_code: u16,
    /// Extraction rules, in declared order.
    #[serde(default)]
    pub getters: Vec<GetterConfig>,
}

impl TestCase {
    /// Creates a test case with no headers, body or getters.
    #[must_use]
    pub fn new(name: impl Into<String>, method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            method,
            url: url.into(),
            ..Self::default()
        }
    }

    /// Creates a GET test case.
    #[must_use]
    pub fn get(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(name, HttpMethod::Get, url)
    }

    /// Adds a request header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Adds a query parameter.
    #[must_use]
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    /// Sets the raw request body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Appends a body modifier.
    #[must_use]
    pub fn with_body_modifier(mut self, path: impl Into<String>, value: impl Into<Value>) -> Self {
        self.body_modifiers.push(BodyModifier::new(path, value));
        self
    }

    /// Appends a getter.
    #[must_use]
    pub fn with_getter(mut self, getter: GetterConfig) -> Self {
        self.getters.push(getter);
        self
    }

    /// Sets the expected status code.
    #[must_use]
    pub const fn expecting_status(mut self, code: u16) -> Self {
        self.wants_code = code;
        self
    }

    /// Iterates over the getters reading from `source`, in declared order.
    pub fn getters_for(&self, source: GetterSource) -> impl Iterator<Item = &GetterConfig> {
        self.getters.iter().filter(move |g| g.source == source)
    }

    /// Returns true if the case is selected by `filter`; an empty filter
    /// selects every case.
    #[must_use]
    pub fn matches_name(&self, filter: &str) -> bool {
        filter.is_empty() || self.name == filter
    }
}
