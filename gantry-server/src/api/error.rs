//! API Error Handling
//!
//! Unified error type for API responses. Errors are answered with a plain text
//! body, matching what shell clients of the mock server expect.

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::service::run_service::RunError;

pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Invalid request method";

/// `Allow` header value for read-only routes
pub const ALLOW_GET: &str = "GET,HEAD";

/// `Allow` header value for `POST /trigger`
pub const ALLOW_POST: &str = "POST";

/// API error type
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    /// Wrong method on a known path; carries the `Allow` header value
    MethodNotAllowed(&'static str),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg).into_response(),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            ApiError::MethodNotAllowed(allow) => (
                StatusCode::METHOD_NOT_ALLOWED,
                [(header::ALLOW, allow)],
                METHOD_NOT_ALLOWED_MESSAGE,
            )
                .into_response(),
        }
    }
}

impl From<RunError> for ApiError {
    fn from(err: RunError) -> Self {
        match err {
            RunError::MissingId => ApiError::BadRequest(err.to_string()),
            RunError::NotFound(_) => ApiError::NotFound(err.to_string()),
            RunError::LogsUnavailable { .. } => ApiError::BadRequest(err.to_string()),
            RunError::InvalidBody(_) => {
                tracing::warn!("Rejected trigger request: {}", err);
                ApiError::BadRequest(err.to_string())
            }
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use gantry_core::domain::run::RunStatus;

    #[test]
    fn test_run_errors_map_to_status_codes() {
        let cases = [
            (RunError::MissingId, StatusCode::BAD_REQUEST),
            (
                RunError::NotFound("pipeline-1".to_string()),
                StatusCode::NOT_FOUND,
            ),
            (
                RunError::LogsUnavailable {
                    id: "pipeline-1".to_string(),
                    status: RunStatus::InProgress,
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                RunError::InvalidBody("expected value".to_string()),
                StatusCode::BAD_REQUEST,
            ),
        ];

        for (err, expected) in cases {
            let response = ApiError::from(err).into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn test_method_not_allowed_sets_allow_header() {
        let response = ApiError::MethodNotAllowed(ALLOW_GET).into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[header::ALLOW], "GET,HEAD");
    }
}
