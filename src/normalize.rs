//! Schema normalization - prepares raw resource schemas for form rendering.
//!
//! Normalization runs once per form load, on a copy of the server-supplied
//! document. It defaults a missing root type, strips the legacy `defaults`
//! property, annotates boolean fields with a checkbox format, forces
//! enum-typed fields to strings, and computes the property display order.
//! All anomalies are advisory-only; normalization never fails.

use serde_json::{Map, Value};

use crate::diagnostics::{
    Advisory, DiagnosticSink, DEFAULTS_REMOVED, MISSING_ROOT_TYPE, PASSWORD_FORMAT,
};
use crate::types::{FORMAT_CHECKBOX, FORMAT_PASSWORD};

/// A normalized resource schema.
///
/// Wraps the normalized document together with the two facts the form layer
/// needs: whether the schema is a collection of object groups, and the
/// display order of its top-level properties.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    root: Value,
    grouped: bool,
    ordered: Vec<String>,
}

/// Normalize a raw schema document.
///
/// Operates on a copy; the caller's document is never mutated. Advisories
/// (missing root type, legacy `defaults` property, password-shaped fields
/// without a password format) are reported through `sink` and never abort
/// normalization.
pub fn normalize(raw: &Value, sink: &mut dyn DiagnosticSink) -> Schema {
    let mut root = match raw {
        Value::Object(map) => map.clone(),
        _ => Map::new(),
    };

    if !root.contains_key("type") {
        root.insert("type".to_string(), Value::String("object".to_string()));
        sink.warn(Advisory {
            code: MISSING_ROOT_TYPE,
            path: "/".to_string(),
            message: "schema missing root type, defaulting to \"object\"".to_string(),
        });
    }

    if let Some(Value::Object(props)) = root.get_mut("properties") {
        if props.shift_remove("defaults").is_some() {
            sink.warn(Advisory {
                code: DEFAULTS_REMOVED,
                path: "/properties/defaults".to_string(),
                message: "legacy \"defaults\" property removed".to_string(),
            });
        }
    }

    let mut root = Value::Object(root);
    visit_object_node(&mut root, "", sink);

    Schema::wrap(root)
}

impl Schema {
    /// Wrap an already-normalized document, recomputing the grouped flag and
    /// property ordering. Used for child schemas handed out by
    /// [`Schema::child`], which were normalized as part of their parent.
    pub(crate) fn wrap(root: Value) -> Self {
        let grouped = all_properties_are_objects(&root);
        let ordered = ordered_property_keys(&root);
        Schema {
            root,
            grouped,
            ordered,
        }
    }

    /// The normalized schema document.
    pub fn as_value(&self) -> &Value {
        &self.root
    }

    /// Consume the wrapper, returning the normalized document.
    pub fn into_value(self) -> Value {
        self.root
    }

    /// True iff every top-level property is an object-typed group.
    ///
    /// Collection schemas are rendered as named groups
    /// ([`GroupedForm`](crate::GroupedForm)); field schemas as a flat list
    /// ([`FlatForm`](crate::FlatForm)).
    pub fn is_collection(&self) -> bool {
        self.grouped
    }

    /// Top-level property keys, sorted ascending by `propertyOrder`.
    ///
    /// The sort is stable: properties with equal (or missing) order keep
    /// their source document order.
    pub fn ordered_keys(&self) -> &[String] {
        &self.ordered
    }

    /// The schema node for a top-level property.
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.root.get("properties")?.get(key)
    }

    /// Top-level properties in display order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.ordered
            .iter()
            .filter_map(|key| self.property(key).map(|node| (key.as_str(), node)))
    }

    /// Keys listed in this schema's own `required` array (non-recursive).
    pub fn required_keys(&self) -> Vec<String> {
        self.root
            .get("required")
            .and_then(Value::as_array)
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Display label, if the schema declares one.
    pub fn title(&self) -> Option<&str> {
        self.root.get("title").and_then(Value::as_str)
    }

    /// A top-level property wrapped as its own schema, for per-group
    /// rendering of collection schemas.
    pub fn child(&self, key: &str) -> Option<Schema> {
        self.property(key).cloned().map(Schema::wrap)
    }
}

// --- Internal implementation ---

/// Recursively apply per-property fixups to every object-typed node.
fn visit_object_node(node: &mut Value, path: &str, sink: &mut dyn DiagnosticSink) {
    if !is_object_typed(node) {
        return;
    }

    let Some(Value::Object(props)) = node.get_mut("properties") else {
        return;
    };

    for (key, child) in props.iter_mut() {
        let child_path = format!("{}/properties/{}", path, key);

        if let Value::Object(map) = child {
            if map.get("type").and_then(Value::as_str) == Some("boolean") {
                map.insert(
                    "format".to_string(),
                    Value::String(FORMAT_CHECKBOX.to_string()),
                );
            }

            // Enums are rendered and stored as strings regardless of the
            // declared element type.
            let has_enum = map
                .get("enum")
                .and_then(Value::as_array)
                .map(|arr| !arr.is_empty())
                .unwrap_or(false);
            if has_enum {
                map.insert("type".to_string(), Value::String("string".to_string()));
            }

            let is_string = map.get("type").and_then(Value::as_str) == Some("string");
            let has_password_format =
                map.get("format").and_then(Value::as_str) == Some(FORMAT_PASSWORD);
            if is_string && !has_password_format && key.to_lowercase().ends_with(FORMAT_PASSWORD) {
                sink.warn(Advisory {
                    code: PASSWORD_FORMAT,
                    path: child_path.clone(),
                    message: format!(
                        "field \"{}\" looks like a password but has no password format",
                        key
                    ),
                });
            }
        }

        visit_object_node(child, &child_path, sink);
    }
}

fn is_object_typed(node: &Value) -> bool {
    node.get("type").and_then(Value::as_str) == Some("object")
}

/// True iff every direct property is an object-typed node.
fn all_properties_are_objects(root: &Value) -> bool {
    match root.get("properties").and_then(Value::as_object) {
        Some(props) => props.values().all(is_object_typed),
        None => true,
    }
}

/// Property keys stably sorted ascending by `propertyOrder`.
///
/// A missing or non-integer order sorts as 0; ties keep source order.
fn ordered_property_keys(root: &Value) -> Vec<String> {
    let Some(props) = root.get("properties").and_then(Value::as_object) else {
        return Vec::new();
    };

    let mut keys: Vec<(i64, String)> = props
        .iter()
        .map(|(key, node)| {
            let order = node
                .get("propertyOrder")
                .and_then(Value::as_i64)
                .unwrap_or(0);
            (order, key.clone())
        })
        .collect();

    keys.sort_by_key(|(order, _)| *order);
    keys.into_iter().map(|(_, key)| key).collect()
}
