//! Flat form - a single list of fields over a non-collection schema.

use serde_json::Value;

use crate::error::FormError;
use crate::form::{Narrowing, SubForm};
use crate::normalize::Schema;
use crate::schedule::RenderQueue;
use crate::types::FormOptions;

/// Form handle over a field schema: one editable field per top-level
/// property.
///
/// Construction is synchronous; the `on_rendered` callback from
/// [`FormOptions`] fires on the next drain of the [`RenderQueue`].
///
/// # Example
///
/// ```
/// use schema_form::{normalize, FlatForm, FormOptions, NullSink, RenderQueue};
/// use serde_json::json;
///
/// let schema = normalize(
///     &json!({
///         "type": "object",
///         "properties": {
///             "host": { "type": "string" },
///             "port": { "type": "number" }
///         }
///     }),
///     &mut NullSink,
/// );
/// let values = json!({ "host": "ldap.example.com" });
///
/// let queue = RenderQueue::new();
/// let form = FlatForm::new(&schema, &values, FormOptions::new(), &queue).unwrap();
///
/// assert!(form.should_display());
/// assert_eq!(form.get_data(), Some(json!({ "host": "ldap.example.com" })));
/// ```
#[derive(Debug)]
pub struct FlatForm {
    subform: Option<SubForm>,
}

impl FlatForm {
    /// Build a flat form over `schema` and `values`.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::NotAFieldSchema`] when `schema` is a collection
    /// of object groups (use [`GroupedForm`](crate::GroupedForm) instead),
    /// or a malformed-document error when `values` is not a JSON object.
    pub fn new(
        schema: &Schema,
        values: &Value,
        mut options: FormOptions,
        queue: &RenderQueue,
    ) -> Result<Self, FormError> {
        if schema.is_collection() {
            return Err(FormError::NotAFieldSchema);
        }

        let on_rendered = options.on_rendered.take();
        let narrowing = Narrowing::from_options(&options);
        let subform = SubForm::build(schema, values, &options, narrowing)?;

        if let Some(callback) = on_rendered {
            queue.defer(callback);
        }

        Ok(FlatForm { subform })
    }

    /// False when narrowing left nothing to show; the caller should render
    /// a "no action needed" state instead of an empty form.
    pub fn should_display(&self) -> bool {
        self.subform.is_some()
    }

    /// Displayed field keys, in display order. Empty when nothing rendered.
    pub fn field_keys(&self) -> &[String] {
        self.subform
            .as_ref()
            .map(SubForm::field_keys)
            .unwrap_or(&[])
    }

    /// True when there is nothing to validate, or the rendered fields pass
    /// validation against the narrowed schema.
    pub fn is_valid(&self) -> bool {
        self.subform.as_ref().map(SubForm::is_valid).unwrap_or(true)
    }

    /// Harvest the current field values. `None` when never rendered.
    pub fn get_data(&self) -> Option<Value> {
        self.subform.as_ref().map(SubForm::harvest)
    }

    /// Merge `partial` into the live fields without reconstructing the form.
    /// Keys the form does not display are ignored.
    pub fn set_data(&mut self, partial: &Value) {
        if let Some(subform) = self.subform.as_mut() {
            subform.merge(partial);
        }
    }

    /// Release the rendered field set. Idempotent; safe when nothing was
    /// rendered.
    pub fn destroy(&mut self) {
        self.subform = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::NullSink;
    use crate::normalize::normalize;
    use serde_json::json;

    fn field_schema() -> Schema {
        normalize(
            &json!({
                "type": "object",
                "required": ["host"],
                "properties": {
                    "host": { "type": "string", "propertyOrder": 1 },
                    "port": { "type": "number", "propertyOrder": 2 },
                    "enabled": { "type": "boolean", "propertyOrder": 3 }
                }
            }),
            &mut NullSink,
        )
    }

    #[test]
    fn collection_schema_is_rejected() {
        let schema = normalize(
            &json!({
                "type": "object",
                "properties": {
                    "general": { "type": "object", "properties": {} }
                }
            }),
            &mut NullSink,
        );
        let queue = RenderQueue::new();
        let result = FlatForm::new(&schema, &json!({}), FormOptions::new(), &queue);
        assert!(matches!(result, Err(FormError::NotAFieldSchema)));
    }

    #[test]
    fn round_trip_restricts_to_schema_properties() {
        let schema = field_schema();
        let values = json!({ "host": "a", "port": 389, "stray": true });
        let queue = RenderQueue::new();

        let form = FlatForm::new(&schema, &values, FormOptions::new(), &queue).unwrap();
        assert_eq!(form.get_data(), Some(json!({ "host": "a", "port": 389 })));
    }

    #[test]
    fn empty_required_and_empty_set_suppresses_display() {
        let schema = field_schema();
        let values = json!({ "host": "filled" });
        let queue = RenderQueue::new();

        let options = FormOptions::new().show_only_required_and_empty(true);
        let form = FlatForm::new(&schema, &values, options, &queue).unwrap();

        assert!(!form.should_display());
        assert_eq!(form.get_data(), None);
        assert!(form.is_valid());
    }

    #[test]
    fn required_only_narrowing() {
        let schema = field_schema();
        let values = json!({ "host": "filled", "port": 389 });
        let queue = RenderQueue::new();

        let options = FormOptions::new().show_only_required(true);
        let form = FlatForm::new(&schema, &values, options, &queue).unwrap();

        assert_eq!(form.field_keys(), &["host"]);
        assert_eq!(form.get_data(), Some(json!({ "host": "filled" })));
    }

    #[test]
    fn set_data_merges_without_reconstruction() {
        let schema = field_schema();
        let queue = RenderQueue::new();
        let mut form =
            FlatForm::new(&schema, &json!({ "host": "a" }), FormOptions::new(), &queue).unwrap();

        form.set_data(&json!({ "port": 636 }));
        assert_eq!(form.get_data(), Some(json!({ "host": "a", "port": 636 })));
    }

    #[test]
    fn destroy_is_idempotent() {
        let schema = field_schema();
        let queue = RenderQueue::new();
        let mut form =
            FlatForm::new(&schema, &json!({ "host": "a" }), FormOptions::new(), &queue).unwrap();

        form.destroy();
        form.destroy();
        assert!(!form.should_display());
        assert_eq!(form.get_data(), None);
        assert!(form.is_valid());
    }

    #[test]
    fn on_rendered_fires_on_next_drain_only() {
        use std::cell::Cell;
        use std::rc::Rc;

        let schema = field_schema();
        let queue = RenderQueue::new();
        let fired = Rc::new(Cell::new(false));

        let flag = Rc::clone(&fired);
        let options = FormOptions::new().on_rendered(move || flag.set(true));
        let _form = FlatForm::new(&schema, &json!({}), options, &queue).unwrap();

        // Synchronous construction pass done, callback not yet fired.
        assert!(!fired.get());
        queue.run_pending();
        assert!(fired.get());
    }
}
