//! Error types for the core crate.

use thiserror::Error;

/// Errors that can occur in the core crate.
///
/// Codec failures are programming or schema errors: an entity type and
/// its codec disagree about the persisted shape. They are not retried
/// by any layer above.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An encoding error occurred while producing a field map.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// A required field was absent from a field map.
    #[error("missing field: {0}")]
    MissingField(String),

    /// A field was present but could not be parsed as the expected type.
    #[error("invalid field {field}: expected {expected}, got {value:?}")]
    InvalidField {
        /// The field name.
        field: String,
        /// The expected type or format.
        expected: String,
        /// The raw value that failed to parse.
        value: String,
    },
}

impl CoreError {
    /// Creates an encoding error.
    #[must_use]
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    /// Creates a missing-field error.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField(field.into())
    }

    /// Creates an invalid-field error.
    #[must_use]
    pub fn invalid_field(
        field: impl Into<String>,
        expected: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidField { field: field.into(), expected: expected.into(), value: value.into() }
    }
}
