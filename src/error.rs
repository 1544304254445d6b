//! Error types for form construction and document loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors while loading schema or values documents.
#[derive(Debug, Error)]
pub enum LoadError {
    // IO errors (exit code 3)
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "remote")]
    #[error("failed to fetch {url}: {source}")]
    NetworkError {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    // Parse errors (exit code 2)
    #[error("invalid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            LoadError::FileNotFound { .. } | LoadError::ReadError { .. } => 3,
            #[cfg(feature = "remote")]
            LoadError::NetworkError { .. } => 3,
            LoadError::InvalidJson { .. } => 2,
        }
    }
}

/// Contract errors raised at form construction time.
///
/// These indicate a defect in the calling code (wrong renderer for the
/// schema shape, or documents that do not match the expected structure),
/// not a recoverable runtime condition.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("collection schema passed to flat form: every top-level property is an object group; use GroupedForm")]
    NotAFieldSchema,

    #[error("field schema passed to grouped form: top-level properties are individual fields; use FlatForm")]
    NotACollectionSchema,

    #[error("malformed schema: {message}")]
    MalformedSchema { message: String },

    #[error("malformed values: {message}")]
    MalformedValues { message: String },
}

impl FormError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_error_exit_codes() {
        let err = LoadError::FileNotFound {
            path: PathBuf::from("schema.json"),
        };
        assert_eq!(err.exit_code(), 3);

        let err = LoadError::InvalidJson {
            source: serde_json::from_str::<serde_json::Value>("{").unwrap_err(),
        };
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn form_error_exit_codes() {
        assert_eq!(FormError::NotAFieldSchema.exit_code(), 2);
        assert_eq!(FormError::NotACollectionSchema.exit_code(), 2);
    }

    #[test]
    fn shape_error_messages_name_the_other_form() {
        assert!(FormError::NotAFieldSchema.to_string().contains("GroupedForm"));
        assert!(FormError::NotACollectionSchema
            .to_string()
            .contains("FlatForm"));
    }
}
