//! Shared field-set state backing the flat and grouped forms.
//!
//! A [`SubForm`] owns the narrowed schema for one list of fields plus the
//! live field values. The flat form holds at most one; the grouped form
//! holds one per surviving group.

use serde_json::{Map, Value};

use crate::error::FormError;
use crate::intersect::empty_required_keys;
use crate::normalize::Schema;
use crate::types::{is_inheritance_envelope, json_type_name, FormOptions};

/// Which fields survive into the rendered form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Narrowing {
    /// Every property.
    All,
    /// Only properties named in `required`.
    Required,
    /// Only properties that are required and currently empty, plus the
    /// explicit default-property allow-list.
    RequiredAndEmpty,
}

impl Narrowing {
    /// When both flags are set, required-and-empty wins (the narrower).
    pub(crate) fn from_options(options: &FormOptions) -> Self {
        if options.show_only_required_and_empty {
            Narrowing::RequiredAndEmpty
        } else if options.show_only_required {
            Narrowing::Required
        } else {
            Narrowing::All
        }
    }
}

/// Live state for one list of fields.
pub(crate) struct SubForm {
    /// Narrowed schema node: properties restricted to the displayed fields,
    /// `required` restricted to match.
    schema: Value,
    validator: jsonschema::Validator,
    /// Displayed field keys, in schema display order.
    keys: Vec<String>,
    /// Current field values. Only fields that have a value appear here.
    fields: Map<String, Value>,
    hide_inheritance: bool,
}

impl SubForm {
    /// Build the field set for `schema` narrowed per `options`.
    ///
    /// Returns `Ok(None)` when narrowing leaves no fields to display.
    /// Fails fast when `values` is not a JSON object or when the narrowed
    /// schema cannot back a validator.
    pub(crate) fn build(
        schema: &Schema,
        values: &Value,
        options: &FormOptions,
        narrowing: Narrowing,
    ) -> Result<Option<SubForm>, FormError> {
        let values = match values {
            Value::Object(map) => map,
            other => {
                return Err(FormError::MalformedValues {
                    message: format!("expected object, got {}", json_type_name(other)),
                })
            }
        };

        let keys = displayed_keys(schema, values, options, narrowing);
        if keys.is_empty() {
            return Ok(None);
        }

        let narrowed = narrowed_schema(schema, &keys);
        let validator =
            jsonschema::validator_for(&narrowed).map_err(|e| FormError::MalformedSchema {
                message: e.to_string(),
            })?;

        let mut fields = Map::new();
        for key in &keys {
            if let Some(value) = values.get(key) {
                fields.insert(key.clone(), seed_value(value, options.hide_inheritance));
            }
        }

        Ok(Some(SubForm {
            schema: narrowed,
            validator,
            keys,
            fields,
            hide_inheritance: options.hide_inheritance,
        }))
    }

    /// Displayed field keys, in display order.
    pub(crate) fn field_keys(&self) -> &[String] {
        &self.keys
    }

    /// Harvest the current field values into a plain document.
    pub(crate) fn harvest(&self) -> Value {
        Value::Object(self.fields.clone())
    }

    /// Merge `partial` into the live fields. Keys the form does not display
    /// are ignored.
    pub(crate) fn merge(&mut self, partial: &Value) {
        let Some(map) = partial.as_object() else {
            return;
        };
        for (key, value) in map {
            if self.keys.iter().any(|k| k == key) {
                self.fields
                    .insert(key.clone(), seed_value(value, self.hide_inheritance));
            }
        }
    }

    /// Validate the harvested document against the narrowed schema.
    pub(crate) fn is_valid(&self) -> bool {
        self.validator.is_valid(&self.harvest())
    }
}

impl std::fmt::Debug for SubForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubForm")
            .field("keys", &self.keys)
            .field("fields", &self.fields)
            .finish()
    }
}

/// Compute the displayed keys for a schema/values pair, in display order.
fn displayed_keys(
    schema: &Schema,
    values: &Map<String, Value>,
    options: &FormOptions,
    narrowing: Narrowing,
) -> Vec<String> {
    match narrowing {
        Narrowing::All => schema.ordered_keys().to_vec(),
        Narrowing::Required => {
            let required = schema.required_keys();
            schema
                .ordered_keys()
                .iter()
                .filter(|key| required.iter().any(|r| r == *key))
                .cloned()
                .collect()
        }
        Narrowing::RequiredAndEmpty => {
            let keep = empty_required_keys(schema, &Value::Object(values.clone()));
            schema
                .ordered_keys()
                .iter()
                .filter(|key| {
                    keep.contains(key.as_str())
                        || options.default_properties.iter().any(|d| d == *key)
                })
                .cloned()
                .collect()
        }
    }
}

/// Restrict a schema node to the displayed keys.
///
/// Properties are rebuilt in display order; `required` keeps only displayed
/// keys; everything else on the node carries over.
fn narrowed_schema(schema: &Schema, keys: &[String]) -> Value {
    let mut result = match schema.as_value() {
        Value::Object(map) => map.clone(),
        _ => Map::new(),
    };

    let mut properties = Map::new();
    for key in keys {
        if let Some(node) = schema.property(key) {
            properties.insert(key.clone(), node.clone());
        }
    }
    result.insert("properties".to_string(), Value::Object(properties));

    if result.contains_key("required") {
        let required: Vec<Value> = schema
            .required_keys()
            .into_iter()
            .filter(|r| keys.iter().any(|k| k == r))
            .map(Value::String)
            .collect();
        result.insert("required".to_string(), Value::Array(required));
    }

    Value::Object(result)
}

/// Unwrap inheritance envelopes when the form hides inheritance.
fn seed_value(value: &Value, hide_inheritance: bool) -> Value {
    if hide_inheritance && is_inheritance_envelope(value) {
        value["value"].clone()
    } else {
        value.clone()
    }
}
