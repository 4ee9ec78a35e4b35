use thiserror::Error;

/// Errors that can occur when building an update expression.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UpdateError {
    #[error("Update has no fields to set")]
    Empty,
    #[error("Invalid field name: {0:?}")]
    InvalidFieldName(String),
}

/// Errors that can occur when reading a request body.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PayloadError {
    #[error("Request body must be a JSON object")]
    NotAnObject,
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Field {field} must be a {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },
}
