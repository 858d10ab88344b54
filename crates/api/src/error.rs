use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use opsconsole_core::error::CoreError;
use opsconsole_db::StoreError;
use opsconsole_genai::GenAiError;
use opsconsole_monitor::MonitorError;
use serde_json::json;

/// Message returned when the language model call fails.
pub const GENERATION_FAILED_MSG: &str = "Failed to generate response";

const INTERNAL_MSG: &str = "An internal error occurred";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `opsconsole_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A storage backend error.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The chat model call failed.
    #[error("Generation failed: {0}")]
    Generation(#[from] GenAiError),

    /// The chat request body could not be read as JSON.
    #[error("Unreadable chat request: {0}")]
    ChatBody(String),

    /// Auth-event processing failed.
    #[error(transparent)]
    Monitor(#[from] MonitorError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal()
                }
            },

            // --- Storage errors ---
            AppError::Store(err) => classify_store_error(err),

            AppError::Generation(err) => {
                tracing::error!(error = %err, "Chat generation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "GENERATION_FAILED",
                    GENERATION_FAILED_MSG.to_string(),
                )
            }

            AppError::ChatBody(reason) => {
                tracing::warn!(reason = %reason, "Unreadable chat request body");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "GENERATION_FAILED",
                    GENERATION_FAILED_MSG.to_string(),
                )
            }

            AppError::Monitor(err) => match err {
                MonitorError::InvalidEvent(e) => (
                    StatusCode::BAD_REQUEST,
                    "INVALID_EVENT",
                    format!("Invalid auth event: {e}"),
                ),
                other => {
                    tracing::error!(error = %other, "Auth event processing failed");
                    internal()
                }
            },

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_MSG.to_string(),
    )
}

/// Classify a store error into an HTTP status, error code, and message.
///
/// - Uniqueness violations map to 409 with the store's message.
/// - Everything else maps to 500 with a sanitized message.
fn classify_store_error(err: &StoreError) -> (StatusCode, &'static str, String) {
    match err {
        StoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        StoreError::Database(sqlx::Error::RowNotFound) => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        other => {
            tracing::error!(error = %other, "Store error");
            internal()
        }
    }
}
