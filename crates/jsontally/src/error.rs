//! Error types for jsontally operations

use std::path::PathBuf;

use thiserror::Error;

use crate::report::ValidationReport;
use crate::value::{Value, ValueKind};

/// Main error type for jsontally operations
#[derive(Error, Debug)]
pub enum JsonTallyError {
    /// The raw text is not valid JSON
    #[error("malformed JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The text parsed, but its top-level value is not the requested container
    #[error("malformed JSON: expected a top-level {expected}, found {found}")]
    UnexpectedRoot {
        /// Container kind the caller asked for
        expected: ValueKind,
        /// Kind actually found at the top level
        found: ValueKind,
    },

    /// A typed read found a value that cannot be coerced to the requested type
    #[error("invalid attribute type: expected `{expected}` for attribute `{path}`, found `{found}`")]
    TypeMismatch {
        /// Dotted/bracketed path of the offending attribute
        path: String,
        /// Requested type
        expected: ValueKind,
        /// Stored type
        found: ValueKind,
    },

    /// The calling code used an accessor incorrectly
    #[error("illegal usage: {0}")]
    IllegalUsage(String),

    /// Rendered JSON bytes were not valid UTF-8
    #[error("rendered JSON is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    /// Reading or writing a file failed
    #[error("I/O error on `{}`: {source}", path.display())]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// One or more documents carry unread or invalid attributes
    #[error("{0}")]
    Invalid(ValidationReport),
}

impl JsonTallyError {
    /// Whether this error comes from unparseable input rather than from data validation.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            JsonTallyError::Malformed(_) | JsonTallyError::UnexpectedRoot { .. }
        )
    }

    pub(crate) fn type_mismatch(path: &str, expected: ValueKind, found: &Value) -> Self {
        JsonTallyError::TypeMismatch {
            path: path.to_string(),
            expected,
            found: found.kind(),
        }
    }
}

/// Get a human-readable name for a value's type
pub fn kind_name(value: &Value) -> &'static str {
    value.kind().name()
}

/// Result type alias for jsontally operations
pub type Result<T> = std::result::Result<T, JsonTallyError>;
