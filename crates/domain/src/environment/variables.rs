//! Environment variable store

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The variable environment shared by every test case in a run.
///
/// Keys are unique and the last write wins. Insertion order is preserved so
/// that dumps and diagnostics are stable. Values set by propagation are always
/// strings; seed values may be any scalar or structured JSON value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Environment {
    variables: IndexMap<String, Value>,
}

impl Environment {
    /// Creates an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the raw value of a variable.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Returns the value of a variable rendered as template text.
    #[must_use]
    pub fn get_rendered(&self, name: &str) -> Option<String> {
        self.get(name).map(render_value)
    }

    /// Sets a variable, overwriting any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.variables.insert(name.into(), value.into());
    }

    /// Applies overrides in iteration order; later entries win on collision.
    pub fn merge<I, K, V>(&mut self, overrides: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        for (name, value) in overrides {
            self.set(name, value);
        }
    }

    /// Returns true if the variable is defined.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// Returns the number of variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Returns true if no variables are defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Iterates over variables in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.variables.iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut env = Self::new();
        env.merge(iter);
        env
    }
}

/// Renders a JSON value as the text substituted into templates.
///
/// Strings render without quotes, `null` renders as the empty string and
/// everything else renders as compact JSON.
#[must_use]
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
