//! Dot-delimited JSON paths.
//!
//! Paths look like `data.items.0.id`. Numeric segments index arrays, `\.`
//! escapes a literal dot inside a key and `#` stands for an array's length
//! when reading (or "append" when writing, together with `-`).

use serde_json::{Map, Value};

/// Splits a path into its segments, honouring `\.` escapes.
#[must_use]
pub fn split_path(path: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = path.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                Some(escaped) => current.push(escaped),
                None => current.push('\\'),
            },
            '.' => segments.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    segments.push(current);

    segments
}

/// Looks up `path` in `root`. Returns `None` if any segment does not exist.
#[must_use]
pub fn lookup(root: &Value, path: &str) -> Option<Value> {
    let mut current = root;

    for segment in split_path(path) {
        current = match current {
            Value::Object(map) => map.get(&segment)?,
            Value::Array(items) if segment == "#" => return Some(Value::from(items.len())),
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }

    Some(current.clone())
}

/// Reasons a write into a JSON document can fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetPathError {
    /// The path was empty.
    #[error("empty path")]
    EmptyPath,

    /// A segment tried to descend into a string, number or boolean.
    #[error("segment {segment:?} descends into a scalar value")]
    NotAContainer {
        /// The offending segment.
        segment: String,
    },

    /// An array segment was neither an index nor an append marker.
    #[error("segment {segment:?} is not a valid array index")]
    InvalidIndex {
        /// The offending segment.
        segment: String,
    },
}

/// Writes `value` at `path` inside `root`, creating intermediate objects.
///
/// Numeric segments address existing array elements; an index equal to the
/// length, `-` or `#` appends.
///
/// # Errors
///
/// Returns [`SetPathError`] when the path cannot be created.
pub fn set(root: &mut Value, path: &str, value: Value) -> Result<(), SetPathError> {
    if path.is_empty() {
        return Err(SetPathError::EmptyPath);
    }

    let segments = split_path(path);
    let last = segments.len() - 1;
    let mut current = root;

    for (i, segment) in segments.into_iter().enumerate() {
        if current.is_null() {
            *current = Value::Object(Map::new());
        }

        let is_last = i == last;
        current = match current {
            Value::Object(map) => {
                if is_last {
                    map.insert(segment, value);
                    return Ok(());
                }
                map.entry(segment).or_insert(Value::Null)
            }
            Value::Array(items) => {
                let index = if segment == "-" || segment == "#" {
                    items.len()
                } else {
                    segment
                        .parse::<usize>()
                        .ok()
                        .filter(|idx| *idx <= items.len())
                        .ok_or_else(|| SetPathError::InvalidIndex {
                            segment: segment.clone(),
                        })?
                };

                if index == items.len() {
                    items.push(Value::Null);
                }
                if is_last {
                    items[index] = value;
                    return Ok(());
                }
                &mut items[index]
            }
            _ => return Err(SetPathError::NotAContainer { segment }),
        };
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_split_path() {
        assert_eq!(split_path("a.b.c"), vec!["a", "b", "c"]);
        assert_eq!(split_path(r"file\.name.size"), vec!["file.name", "size"]);
        assert_eq!(split_path("single"), vec!["single"]);
    }

    #[test]
    fn test_lookup_nested() {
        let doc = json!({"a": {"b": "x"}, "items": [{"id": 7}, {"id": 8}]});

        assert_eq!(lookup(&doc, "a.b"), Some(json!("x")));
        assert_eq!(lookup(&doc, "items.1.id"), Some(json!(8)));
        assert_eq!(lookup(&doc, "items.#"), Some(json!(2)));
    }

    #[test]
    fn test_lookup_missing() {
        let doc = json!({"a": {}, "items": []});

        assert_eq!(lookup(&doc, "a.b"), None);
        assert_eq!(lookup(&doc, "items.0"), None);
        assert_eq!(lookup(&doc, "a.b.c"), None);
        assert_eq!(lookup(&json!("scalar"), "a"), None);
    }

    #[test]
    fn test_set_creates_intermediate_objects() {
        let mut doc = json!({});
        set(&mut doc, "user.address.city", json!("Leeds")).unwrap();
        assert_eq!(doc, json!({"user": {"address": {"city": "Leeds"}}}));
    }

    #[test]
    fn test_set_overwrites_and_appends() {
        let mut doc = json!({"tags": ["a"], "id": 1});
        set(&mut doc, "id", json!(2)).unwrap();
        set(&mut doc, "tags.0", json!("z")).unwrap();
        set(&mut doc, "tags.-", json!("b")).unwrap();
        assert_eq!(doc, json!({"tags": ["z", "b"], "id": 2}));
    }

    #[test]
    fn test_set_rejects_scalar_traversal() {
        let mut doc = json!({"id": 1});
        let err = set(&mut doc, "id.value", json!(2)).unwrap_err();
        assert_eq!(
            err,
            SetPathError::NotAContainer {
                segment: "value".to_string()
            }
        );
    }

    #[test]
    fn test_set_rejects_out_of_range_index() {
        let mut doc = json!({"tags": []});
        assert!(matches!(
            set(&mut doc, "tags.3", json!("x")),
            Err(SetPathError::InvalidIndex { .. })
        ));
    }
}
