use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;

use crate::api::rest::dto::ErrorDto;
use crate::domain::error::DomainError;

const INTERNAL_ERROR: &str = "An internal database error occurred";

/// HTTP failure rendered as `{"error": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorDto {
                error: self.message,
            }),
        )
            .into_response()
    }
}

/// Convert domain errors to HTTP error responses
#[must_use]
pub fn domain_error_to_response(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidQuery { message } | DomainError::MalformedInput { message } => {
            ApiError::bad_request(message)
        }
        DomainError::Conflict { message } => ApiError::new(StatusCode::CONFLICT, message),
        DomainError::NotFound { message } => ApiError::not_found(message),
        DomainError::Store { message } => {
            tracing::error!(error = %message, "Request failed on store error");
            ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
        }
    }
}

/// Implement Into<ApiError> for `DomainError` so `?` works in handlers
impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        domain_error_to_response(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::DbErr;
    use tracing_test::traced_test;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (DomainError::invalid_query("q"), StatusCode::BAD_REQUEST),
            (DomainError::malformed_input("m"), StatusCode::BAD_REQUEST),
            (DomainError::conflict("c"), StatusCode::CONFLICT),
            (DomainError::not_found("n"), StatusCode::NOT_FOUND),
            (DomainError::store("s"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(domain_error_to_response(err).status, status);
        }
    }

    #[test]
    fn test_store_details_are_not_exposed() {
        let api = domain_error_to_response(DomainError::store("disk I/O error at /var/db"));
        assert_eq!(api.message, INTERNAL_ERROR);
    }

    #[test]
    #[traced_test]
    fn test_store_failure_logged_once_at_boundary() {
        let err = DomainError::from(DbErr::Custom("disk full".to_owned()));

        let api = domain_error_to_response(err);

        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        logs_assert(|lines: &[&str]| {
            match lines.iter().filter(|l| l.contains("ERROR")).count() {
                1 => Ok(()),
                n => Err(format!("expected one error line, got {n}")),
            }
        });
    }
}
