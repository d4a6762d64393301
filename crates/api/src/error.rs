use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tunebook_core::error::CoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `tunebook_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A bad request with a human-readable message (malformed path
    /// parameters, unparseable body values).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message. The message is
    /// logged, never sent to the client.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    json!("the requested resource could not be found"),
                ),
                CoreError::EditConflict => (
                    StatusCode::CONFLICT,
                    "EDIT_CONFLICT",
                    json!("unable to update the record due to an edit conflict, please try again"),
                ),
                // The 422 body carries the full field → message map.
                CoreError::Validation(fields) => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "VALIDATION_FAILED",
                    json!(fields),
                ),
                CoreError::RateLimited => (
                    StatusCode::TOO_MANY_REQUESTS,
                    "RATE_LIMITED",
                    json!("rate limit exceeded"),
                ),
                CoreError::Unauthenticated(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED", json!(msg))
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", json!(msg)),
                CoreError::Timeout => {
                    tracing::error!("storage deadline exceeded");
                    internal_body()
                }
                CoreError::StorageUnavailable(detail) => {
                    tracing::error!(error = %detail, "storage unavailable");
                    internal_body()
                }
            },
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", json!(msg)),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "internal error");
                internal_body()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Sanitized 500 body: no internal detail leaks to the client.
fn internal_body() -> (StatusCode, &'static str, serde_json::Value) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        json!("the server encountered a problem and could not process your request"),
    )
}
