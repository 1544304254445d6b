//! Advisory diagnostics emitted during schema normalization.
//!
//! Normalization never fails; everything it notices is reported through an
//! injected [`DiagnosticSink`] so hosts decide how advisories surface
//! (collected, logged, or dropped).

use serde::Serialize;

/// Advisory codes.
///
/// - `W001`: schema missing root `type` (defaulted to `object`)
/// - `W002`: legacy `defaults` property removed from `properties`
/// - `W003`: password-named string field without `format: "password"`
pub const MISSING_ROOT_TYPE: &str = "W001";
pub const DEFAULTS_REMOVED: &str = "W002";
pub const PASSWORD_FORMAT: &str = "W003";

/// A single non-fatal diagnostic from schema normalization.
#[derive(Debug, Clone, Serialize)]
pub struct Advisory {
    pub code: &'static str,
    /// JSON path to the issue (e.g., "/properties/userPassword")
    pub path: String,
    pub message: String,
}

/// Receiver for normalization advisories.
pub trait DiagnosticSink {
    fn warn(&mut self, advisory: Advisory);
}

/// Sink that accumulates advisories for later inspection.
#[derive(Debug, Default)]
pub struct CollectSink {
    pub advisories: Vec<Advisory>,
}

impl CollectSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if any collected advisory carries the given code.
    pub fn has_code(&self, code: &str) -> bool {
        self.advisories.iter().any(|a| a.code == code)
    }
}

impl DiagnosticSink for CollectSink {
    fn warn(&mut self, advisory: Advisory) {
        self.advisories.push(advisory);
    }
}

/// Sink that forwards advisories to the `tracing` subscriber.
#[derive(Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn warn(&mut self, advisory: Advisory) {
        tracing::warn!(
            code = advisory.code,
            path = %advisory.path,
            "{}",
            advisory.message
        );
    }
}

/// Sink that drops everything.
#[derive(Debug, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn warn(&mut self, _advisory: Advisory) {}
}
