//! Error types for formbase.

use thiserror::Error;

use crate::filter_set::ClauseId;

/// Result type alias using formbase's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for formbase operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Form not found on the backend
    #[error("Form not found: {0}")]
    FormNotFound(i64),

    /// Filter clause is incomplete or not legal for its category
    #[error("Invalid clause: {0}")]
    InvalidClause(String),

    /// Clause id not present in the filter set
    #[error("Clause not found: {0}")]
    ClauseNotFound(ClauseId),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
