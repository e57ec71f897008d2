//! API error types with IntoResponse
//!
//! Faults are converted to JSON responses with appropriate status codes.
//! Expected business outcomes (taken username, unknown login) are not
//! errors and never pass through here.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use loanapp_core::ValidationError;
use serde_json::json;

use crate::db::DbError;
use crate::render::RenderError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Store error, including an unreachable store (500, logged)
    Database(DbError),

    /// Template rendering failed (500, logged)
    Render(RenderError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation(e) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "validation_error",
                    "message": e.to_string()
                }),
            ),
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "internal_error",
                        "message": "an internal error occurred"
                    }),
                )
            }
            Self::Render(e) => {
                tracing::error!("Render error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "internal_error",
                        "message": "an internal error occurred"
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        Self::Database(e)
    }
}

impl From<RenderError> for ApiError {
    fn from(e: RenderError) -> Self {
        Self::Render(e)
    }
}
