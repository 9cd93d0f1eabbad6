use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type for the fail-visible routes.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// The client only ever sees the fixed message for each class; the cause is logged.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Server configuration error")]
    MissingCredential,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Provider rejected credentials: {0}")]
    Unauthorized(String),

    #[error("Provider rate limited: {0}")]
    RateLimited(String),

    #[error("LLM error: {0}")]
    Llm(String),
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::MissingApiKey => AppError::MissingCredential,
            LlmError::Auth(msg) => AppError::Unauthorized(msg),
            LlmError::RateLimited(msg) => AppError::RateLimited(msg),
            other => AppError::Llm(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::MissingCredential => {
                tracing::error!("GEMINI_API_KEY missing");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server configuration error".to_string(),
                )
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Unauthorized(msg) => {
                tracing::error!("AI provider authentication failed: {msg}");
                (
                    StatusCode::UNAUTHORIZED,
                    "AI service authentication failed".to_string(),
                )
            }
            AppError::RateLimited(msg) => {
                tracing::error!("AI provider rate limited: {msg}");
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    "Too many requests. Please try again later.".to_string(),
                )
            }
            AppError::Llm(msg) => {
                tracing::error!("Email generation failed: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to generate email. Please try again.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "success": false,
            "error": message
        }));

        (status, body).into_response()
    }
}
