//! Error types for response validation

use thiserror::Error;

/// Result type alias for validation and extraction
pub type Result<T> = std::result::Result<T, ResponseError>;

/// Errors raised while checking the shape of an API response or a homework record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponseError {
    /// A value had a different JSON type than expected
    #[error("unexpected data type for {field}: expected {expected}, got {found}")]
    TypeMismatch {
        /// Where the mismatch was found
        field: &'static str,
        /// Expected JSON type
        expected: &'static str,
        /// Actual JSON type
        found: &'static str,
    },

    /// A required key was absent
    #[error("expected keys absent from API response: `{0}`")]
    MissingField(&'static str),

    /// The homework record has no `status` key
    #[error("status field absent")]
    StatusMissing,

    /// The homework record has a status outside the verdict table
    #[error("unexpected status value: `{0}`")]
    UnexpectedStatus(String),
}

impl ResponseError {
    /// Create a type mismatch error for `field`
    pub fn type_mismatch(
        field: &'static str,
        expected: &'static str,
        found: &serde_json::Value,
    ) -> Self {
        Self::TypeMismatch {
            field,
            expected,
            found: json_type_name(found),
        }
    }
}

/// Human-readable JSON type name for diagnostics
pub fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
