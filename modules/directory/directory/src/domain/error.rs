use directory_sdk::DirectoryError;
use sea_orm::DbErr;
use thiserror::Error;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{message}")]
    InvalidQuery { message: String },

    #[error("{message}")]
    MalformedInput { message: String },

    #[error("{message}")]
    Conflict { message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error("Store error: {message}")]
    Store { message: String },
}

impl DomainError {
    #[must_use]
    pub fn invalid_query(message: impl Into<String>) -> Self {
        Self::InvalidQuery {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn malformed_input(message: impl Into<String>) -> Self {
        Self::MalformedInput {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }
}

impl From<DbErr> for DomainError {
    fn from(e: DbErr) -> Self {
        Self::store(e.to_string())
    }
}

/// Convert domain errors to SDK errors for public API consumption.
impl From<DomainError> for DirectoryError {
    fn from(domain_error: DomainError) -> Self {
        match domain_error {
            DomainError::InvalidQuery { message } => Self::invalid_query(message),
            DomainError::MalformedInput { message } => Self::malformed_input(message),
            DomainError::Conflict { message } => Self::conflict(message),
            DomainError::NotFound { message } => Self::not_found(message),
            DomainError::Store { message } => Self::internal(message),
        }
    }
}
