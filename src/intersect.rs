//! Required/empty field selection for progressive disclosure.
//!
//! Forms showing a resource for the first time display only the fields the
//! user must still fill in: those both declared `required` by the schema
//! and currently empty in the values document.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::normalize::Schema;

/// True if a value counts as empty for progressive disclosure.
///
/// Empty means `null`, the empty string, or a collection with zero entries.
/// `0` and `false` are real values, not empty.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(arr) => arr.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Keys of `schema.properties` whose value is missing or empty in `values`.
pub fn empty_value_keys(schema: &Schema, values: &Value) -> BTreeSet<String> {
    schema
        .properties()
        .filter(|(key, _)| match values.get(key) {
            Some(value) => is_empty_value(value),
            None => true,
        })
        .map(|(key, _)| key.to_string())
        .collect()
}

/// Keys that are both required by the schema and empty in the values.
///
/// Deterministic for identical inputs; returns an empty set (not an error)
/// when nothing matches.
pub fn empty_required_keys(schema: &Schema, values: &Value) -> BTreeSet<String> {
    let required: BTreeSet<String> = schema.required_keys().into_iter().collect();
    let empty = empty_value_keys(schema, values);
    required.intersection(&empty).cloned().collect()
}
