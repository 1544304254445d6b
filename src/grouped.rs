//! Grouped form - one named sub-form per top-level object group.

use serde_json::{Map, Value};

use crate::error::FormError;
use crate::form::{Narrowing, SubForm};
use crate::normalize::Schema;
use crate::schedule::RenderQueue;
use crate::types::{json_type_name, FormOptions};

/// One surviving group: a flat-style field set namespaced under its key.
#[derive(Debug)]
struct Group {
    key: String,
    title: Option<String>,
    form: SubForm,
    /// Whether the values document contained an entry for this group. A
    /// group that was never seeded and never edited stays out of the
    /// harvested document.
    seeded: bool,
}

/// Form handle over a collection schema: each top-level property is an
/// object-typed group rendered as its own field list.
///
/// Narrowing options apply per group; a group whose narrowed field set is
/// empty is omitted entirely rather than shown as an empty section.
#[derive(Debug)]
pub struct GroupedForm {
    groups: Vec<Group>,
}

impl GroupedForm {
    /// Build a grouped form over `schema` and `values`.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::NotACollectionSchema`] when `schema` is a plain
    /// field schema (use [`FlatForm`](crate::FlatForm) instead), or a
    /// malformed-document error when `values` or a group's entry is not a
    /// JSON object.
    pub fn new(
        schema: &Schema,
        values: &Value,
        mut options: FormOptions,
        queue: &RenderQueue,
    ) -> Result<Self, FormError> {
        if !schema.is_collection() {
            return Err(FormError::NotACollectionSchema);
        }
        if !values.is_object() {
            return Err(FormError::MalformedValues {
                message: format!("expected object, got {}", json_type_name(values)),
            });
        }

        let on_rendered = options.on_rendered.take();
        let narrowing = Narrowing::from_options(&options);

        let mut groups = Vec::new();
        for key in schema.ordered_keys() {
            let Some(child_schema) = schema.child(key) else {
                continue;
            };

            let (child_values, seeded) = match values.get(key) {
                Some(entry) if entry.is_object() => (entry.clone(), true),
                Some(entry) => {
                    return Err(FormError::MalformedValues {
                        message: format!(
                            "group \"{}\": expected object, got {}",
                            key,
                            json_type_name(entry)
                        ),
                    })
                }
                None => (Value::Object(Map::new()), false),
            };

            if let Some(form) = SubForm::build(&child_schema, &child_values, &options, narrowing)? {
                groups.push(Group {
                    key: key.clone(),
                    title: child_schema.title().map(String::from),
                    form,
                    seeded,
                });
            }
        }

        if let Some(callback) = on_rendered {
            queue.defer(callback);
        }

        Ok(GroupedForm { groups })
    }

    /// True iff at least one group survived the omission filter.
    pub fn display_form(&self) -> bool {
        !self.groups.is_empty()
    }

    /// Surviving group keys, in display order.
    pub fn group_keys(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.key.as_str()).collect()
    }

    /// Display label for a surviving group, if its schema declares one.
    pub fn group_title(&self, key: &str) -> Option<&str> {
        self.groups
            .iter()
            .find(|g| g.key == key)
            .and_then(|g| g.title.as_deref())
    }

    /// Displayed field keys of a surviving group.
    pub fn group_field_keys(&self, key: &str) -> Option<&[String]> {
        self.groups
            .iter()
            .find(|g| g.key == key)
            .map(|g| g.form.field_keys())
    }

    /// True when every surviving group's fields pass validation.
    pub fn is_valid(&self) -> bool {
        self.groups.iter().all(|g| g.form.is_valid())
    }

    /// Merge each surviving group's harvest under its own key.
    ///
    /// Group keys are disjoint namespaces, so collisions cannot occur. A
    /// group that had no values entry and still has no fields set is left
    /// out of the document.
    pub fn get_data(&self) -> Value {
        let mut result = Map::new();
        for group in &self.groups {
            let data = group.form.harvest();
            let has_fields = data.as_object().map(|m| !m.is_empty()).unwrap_or(false);
            if group.seeded || has_fields {
                result.insert(group.key.clone(), data);
            }
        }
        Value::Object(result)
    }

    /// Route each entry of `partial` to the group owning that namespace key.
    /// Entries for unknown groups are ignored.
    pub fn set_data(&mut self, partial: &Value) {
        let Some(map) = partial.as_object() else {
            return;
        };
        for group in self.groups.iter_mut() {
            if let Some(entry) = map.get(&group.key) {
                group.form.merge(entry);
            }
        }
    }

    /// Release every rendered group. Idempotent.
    pub fn destroy(&mut self) {
        self.groups.clear();
    }
}
