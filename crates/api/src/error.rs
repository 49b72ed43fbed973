use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use pitchside_core::error::CoreError;
use pitchside_worker::error::JobError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and sqlx errors for the store.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `pitchside_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<JobError> for AppError {
    fn from(err: JobError) -> Self {
        match err {
            JobError::Core(core) => AppError::Core(core),
            JobError::Database(db) => AppError::Database(db),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => {
                let (status, code) = match core {
                    CoreError::Unauthenticated(_) => {
                        (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED")
                    }
                    CoreError::InvalidArgument(_) => {
                        (StatusCode::BAD_REQUEST, "INVALID_ARGUMENT")
                    }
                    CoreError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
                    CoreError::PermissionDenied(_) => {
                        (StatusCode::FORBIDDEN, "PERMISSION_DENIED")
                    }
                    CoreError::PreconditionFailed(_) => {
                        (StatusCode::PRECONDITION_FAILED, "FAILED_PRECONDITION")
                    }
                    CoreError::ResourceExhausted(_) => {
                        (StatusCode::TOO_MANY_REQUESTS, "RESOURCE_EXHAUSTED")
                    }
                    CoreError::Internal(msg) => {
                        tracing::error!(error = %msg, "Internal core error");
                        (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
                    }
                };
                (status, code, core.user_message())
            }

            AppError::Database(err) => classify_sqlx_error(err),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
