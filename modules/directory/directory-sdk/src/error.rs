//! Public error types for the `directory` module.
//!
//! These errors are safe to expose to other modules and consumers.

use thiserror::Error;

/// Errors that can be returned by the [`DirectoryClientV1`](crate::DirectoryClientV1).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// Query parameters are missing or do not form a supported shape.
    #[error("Invalid query: {message}")]
    InvalidQuery { message: String },

    /// Request payload is missing required fields or carries bad values.
    #[error("Malformed input: {message}")]
    MalformedInput { message: String },

    /// A create-if-absent write found the key already occupied.
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// The addressed record does not exist.
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// The underlying store failed.
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DirectoryError {
    pub fn invalid_query(message: impl Into<String>) -> Self {
        Self::InvalidQuery {
            message: message.into(),
        }
    }

    pub fn malformed_input(message: impl Into<String>) -> Self {
        Self::MalformedInput {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
