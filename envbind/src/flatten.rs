//! Flattening of nested JSON objects into connector-joined string keys.

use std::collections::HashMap;

use serde_json::{Map, Value};

/// Flat mapping from fully-qualified key to raw string value.
pub type FlatMap = HashMap<String, String>;

/// Flatten `map` into `key -> string` pairs.
///
/// Nested objects contribute `parent + connector + child` keys. Booleans
/// become `"true"`/`"false"`, integers their base-10 form and other numbers
/// the shortest decimal that round-trips. Arrays and nulls are dropped.
///
/// # Examples
///
/// ```
/// use envbind::flatten;
/// let value = serde_json::json!({"a": {"b": 5, "c": [1, 2]}});
/// let flat = flatten(value.as_object().expect("object"), "_");
/// assert_eq!(flat.get("a_b").map(String::as_str), Some("5"));
/// assert!(!flat.contains_key("a_c"));
/// ```
#[must_use]
pub fn flatten(map: &Map<String, Value>, connector: &str) -> FlatMap {
    let mut flat = FlatMap::new();
    flatten_into(&mut flat, None, map, connector);
    flat
}

fn flatten_into(flat: &mut FlatMap, prefix: Option<&str>, map: &Map<String, Value>, connector: &str) {
    for (key, value) in map {
        let full = prefix.map_or_else(|| key.clone(), |p| format!("{p}{connector}{key}"));
        match value {
            Value::Object(child) => flatten_into(flat, Some(&full), child, connector),
            Value::Bool(b) => {
                flat.insert(full, b.to_string());
            }
            Value::Number(n) => {
                if let Some(text) = number_to_string(n) {
                    flat.insert(full, text);
                }
            }
            Value::String(s) => {
                flat.insert(full, s.clone());
            }
            Value::Array(_) | Value::Null => {}
        }
    }
}

fn number_to_string(n: &serde_json::Number) -> Option<String> {
    if let Some(i) = n.as_i64() {
        return Some(i.to_string());
    }
    if let Some(u) = n.as_u64() {
        return Some(u.to_string());
    }
    n.as_f64().map(|f| f.to_string())
}
