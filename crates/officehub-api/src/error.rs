//! Maps domain errors to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use officehub_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// Error returned by handlers and middleware.
#[derive(Debug)]
pub enum ApiError {
    /// Missing or wrong API token.
    Unauthorized,
    /// Any domain error.
    App(AppError),
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            Self::App(err) => match err.kind {
                ErrorKind::Validation | ErrorKind::Serialization => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
                }
                ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
                ErrorKind::NotRegistered => (StatusCode::NOT_FOUND, "NOT_REGISTERED"),
                ErrorKind::Permission => (StatusCode::FORBIDDEN, "FORBIDDEN"),
                ErrorKind::Cooldown => (StatusCode::TOO_MANY_REQUESTS, "COOLDOWN"),
                ErrorKind::Connectivity | ErrorKind::Backend => {
                    (StatusCode::BAD_GATEWAY, "BACKEND_ERROR")
                }
                ErrorKind::Publish => (StatusCode::BAD_GATEWAY, "PUBLISH_ERROR"),
                ErrorKind::Configuration | ErrorKind::Internal => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
                }
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = match &self {
            Self::Unauthorized => "Missing or invalid API token".to_string(),
            Self::App(err) => {
                if status.is_server_error() {
                    tracing::error!(error = %err, "Request failed");
                }
                err.message.clone()
            }
        };

        let body = ApiErrorResponse {
            error: code.to_string(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::not_found("x"), StatusCode::NOT_FOUND),
            (AppError::cooldown("x"), StatusCode::TOO_MANY_REQUESTS),
            (AppError::connectivity("x"), StatusCode::BAD_GATEWAY),
            (AppError::validation("x"), StatusCode::BAD_REQUEST),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).into_response().status(), status);
        }
        assert_eq!(
            ApiError::Unauthorized.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
    }
}
