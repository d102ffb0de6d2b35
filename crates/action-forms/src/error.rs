//! # Form Errors
//!
//! Configuration mistakes are programmer errors and surface eagerly as
//! [`FormConfigError`], when a modal is built or a value is set on a field that does not
//! exist. Failures reported by an action callback are [`ActionError`]s.

use crate::field::FieldType;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormConfigError {
    #[error("Select field '{0}' has no options")]
    EmptyOptions(String),
    #[error("Field '{field}' has min {min} greater than max {max}")]
    InvertedBounds { field: String, min: f64, max: f64 },
    #[error("Duplicate field name '{0}'")]
    DuplicateField(String),
    #[error("Default value of '{field}' does not fit a {field_type} field")]
    DefaultMismatch { field: String, field_type: FieldType },
    #[error("Value for '{field}' does not fit a {field_type} field")]
    ValueMismatch { field: String, field_type: FieldType },
    #[error("Unknown field '{0}'")]
    UnknownField(String),
}

/// A failure reported by an action callback, usually a controller error passed through.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ActionError {
    pub message: String,
}

impl ActionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for ActionError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

impl From<&str> for ActionError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}
