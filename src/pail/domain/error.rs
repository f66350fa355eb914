//! Error types for pail domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing or reading domain pail values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PailDomainError {
    /// The name cannot be used as a single root entry.
    #[error("invalid pail name '{0}'")]
    InvalidName(String),

    /// The value is not a hyphenated UUID.
    #[error("invalid pail id '{0}', expected a hyphenated UUID")]
    InvalidId(String),

    /// The document carries no `id` field.
    #[error("pail document has no id")]
    MissingId,

    /// The JSON value is not an object.
    #[error("pail document must be a JSON object")]
    NotAnObject,

    /// A well-known field holds a value of the wrong type.
    #[error("pail field '{field}' must be {expected}")]
    InvalidField {
        /// Field name.
        field: &'static str,
        /// Expected JSON type.
        expected: &'static str,
    },
}

/// Error returned while parsing a pail status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown pail status: {0}")]
pub struct ParsePailStatusError(pub String);
