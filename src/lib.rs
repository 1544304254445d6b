//! Schema-Driven Form State
//!
//! Turns a JSON-Schema-shaped description of a resource's editable
//! properties, plus a matching values document, into headless form state:
//! a normalized schema, a progressive-disclosure field selection, and
//! flat or grouped form handles that harvest a plain values document back
//! out for submission.
//!
//! # Example
//!
//! ```
//! use schema_form::{normalize, CollectSink, FlatForm, FormOptions, RenderQueue};
//! use serde_json::json;
//!
//! let raw = json!({
//!     "properties": {
//!         "serverUrl": { "type": "string", "propertyOrder": 1 },
//!         "enabled": { "type": "boolean", "propertyOrder": 2 }
//!     },
//!     "required": ["serverUrl"]
//! });
//! let values = json!({ "serverUrl": "", "enabled": true });
//!
//! // Normalization defaults the missing root type and reports it as an
//! // advisory; it never fails.
//! let mut sink = CollectSink::new();
//! let schema = normalize(&raw, &mut sink);
//! assert_eq!(sink.advisories.len(), 1);
//!
//! // Progressive disclosure: show only fields the user still has to fill.
//! let queue = RenderQueue::new();
//! let options = FormOptions::new().show_only_required_and_empty(true);
//! let form = FlatForm::new(&schema, &values, options, &queue).unwrap();
//!
//! assert!(form.should_display());
//! assert_eq!(form.field_keys(), &["serverUrl"]);
//! ```
//!
//! # Schema shapes
//!
//! | Shape | Top-level properties | Handle |
//! |------------|----------------------------|------------------------------|
//! | field | individual fields | [`FlatForm`] |
//! | collection | object-typed groups | [`GroupedForm`] |
//!
//! Passing a schema to the wrong handle is a construction-time
//! [`FormError`], not a recoverable runtime condition.
//!
//! # Copy-on-write discipline
//!
//! Every transformation (normalize, narrow, merge) returns a new value;
//! callers never observe a previously handed-out schema or values document
//! change underneath them.

mod check;
mod diagnostics;
mod error;
mod flat;
mod form;
mod grouped;
mod intersect;
mod loader;
mod normalize;
mod schedule;
mod types;

pub use check::{check, check_file, CheckResult, Diagnostic, FileResult, FileStatus, Severity};
pub use diagnostics::{
    Advisory, CollectSink, DiagnosticSink, NullSink, TracingSink, DEFAULTS_REMOVED,
    MISSING_ROOT_TYPE, PASSWORD_FORMAT,
};
pub use error::{FormError, LoadError};
pub use flat::FlatForm;
pub use grouped::GroupedForm;
pub use intersect::{empty_required_keys, empty_value_keys, is_empty_value};
pub use loader::{is_url, load_document, load_document_auto, load_document_str};
pub use normalize::{normalize, Schema};
pub use schedule::RenderQueue;
pub use types::{is_inheritance_envelope, json_type_name, FormOptions, OnRendered};

#[cfg(feature = "remote")]
pub use loader::load_document_url;
