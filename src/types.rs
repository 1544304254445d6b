//! Core types for schema-driven forms.

use serde_json::Value;

/// Presentation format hints attached to property nodes.
pub const FORMAT_CHECKBOX: &str = "checkbox";
pub const FORMAT_PASSWORD: &str = "password";

/// Returns the JSON type name for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Callback fired after a form's synchronous construction pass, on the next
/// drain of the [`RenderQueue`](crate::RenderQueue).
pub type OnRendered = Box<dyn FnOnce() + 'static>;

/// Options controlling which fields a form displays.
///
/// `show_only_required` and `show_only_required_and_empty` are mutually
/// exclusive in practice; when both are set the required-and-empty
/// restriction wins since it is the narrower of the two.
#[derive(Default)]
pub struct FormOptions {
    /// Restrict displayed fields to those listed in the schema's `required`.
    pub show_only_required: bool,
    /// Restrict displayed fields to those that are required and currently
    /// empty (progressive disclosure).
    pub show_only_required_and_empty: bool,
    /// Unwrap inheritance envelopes (`{"value": v, "inherited": b}`) and
    /// expose only the inner value.
    pub hide_inheritance: bool,
    /// Keys kept through narrowing even when not required-and-empty.
    pub default_properties: Vec<String>,
    /// Fired once after construction, on the next queue drain.
    pub on_rendered: Option<OnRendered>,
}

impl std::fmt::Debug for FormOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormOptions")
            .field("show_only_required", &self.show_only_required)
            .field(
                "show_only_required_and_empty",
                &self.show_only_required_and_empty,
            )
            .field("hide_inheritance", &self.hide_inheritance)
            .field("default_properties", &self.default_properties)
            .field("on_rendered", &self.on_rendered.is_some())
            .finish()
    }
}

impl FormOptions {
    /// Options that display every field (no narrowing).
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the form to required fields.
    pub fn show_only_required(mut self, yes: bool) -> Self {
        self.show_only_required = yes;
        self
    }

    /// Restrict the form to required-and-empty fields.
    pub fn show_only_required_and_empty(mut self, yes: bool) -> Self {
        self.show_only_required_and_empty = yes;
        self
    }

    /// Unwrap inheritance envelopes.
    pub fn hide_inheritance(mut self, yes: bool) -> Self {
        self.hide_inheritance = yes;
        self
    }

    /// Keys retained through narrowing regardless of required/empty state.
    pub fn default_properties<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_properties = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Set the render-complete callback.
    pub fn on_rendered(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_rendered = Some(Box::new(callback));
        self
    }
}

/// True if `value` is an inheritance envelope: an object with exactly a
/// `value` entry and a boolean `inherited` entry.
pub fn is_inheritance_envelope(value: &Value) -> bool {
    match value {
        Value::Object(map) => {
            map.len() == 2
                && map.contains_key("value")
                && map.get("inherited").map(Value::is_boolean).unwrap_or(false)
        }
        _ => false,
    }
}
