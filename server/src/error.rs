//! Startup errors and per-request error responses.
//!
//! # Design
//! `ApiError` is the only error type a handler returns. Every variant maps to
//! a status code with an empty body so store internals never reach the
//! client; the detail goes to the log instead.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use todo_core::TodoError;

/// Failures while bootstrapping or serving the process.
#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("logging error: {0}")]
    Logging(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Error returned from request handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body or query string could not be decoded.
    #[error("malformed request: {0}")]
    Malformed(String),

    #[error(transparent)]
    Todo(#[from] TodoError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Malformed(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Malformed(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Malformed(_) | ApiError::Todo(TodoError::Validation(_)) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Todo(TodoError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Todo(TodoError::Store(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, %status, "request rejected");
        }
        status.into_response()
    }
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;

    use super::*;

    #[test]
    fn validation_and_malformed_are_bad_request() {
        let err = ApiError::from(TodoError::Validation("subject must not be empty"));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = ApiError::Malformed("expected value".to_string());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_is_404() {
        let err = ApiError::from(TodoError::NotFound {
            id: 9,
            at: chrono::Utc::now(),
        });
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn store_failure_is_500() {
        let err = ApiError::from(TodoError::Store(sqlx::Error::PoolClosed));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn error_responses_have_empty_body() {
        let response = ApiError::from(TodoError::Store(sqlx::Error::PoolTimedOut)).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());
    }
}
