use axum::{
    extract::{multipart::MultipartRejection, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Bodies keep the `{"error", "details"}` / `{"error", "raw"}` shape existing
/// clients read, plus a `kind` tag for programmatic matching.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Text extraction failed: {0}")]
    Extraction(String),

    #[error("Upstream request failed: {0}")]
    UpstreamRequest(String),

    #[error("Upstream reply is not valid JSON")]
    UpstreamDecode { raw: String },

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    /// Stable machine-readable tag for the failure class.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation",
            AppError::Extraction(_) => "extraction",
            AppError::UpstreamRequest(_) => "upstream_request",
            AppError::UpstreamDecode { .. } => "upstream_decode",
            AppError::Unexpected(_) => "unexpected",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Extraction(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::UpstreamRequest(_) | AppError::UpstreamDecode { .. } => {
                StatusCode::BAD_GATEWAY
            }
            AppError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Http(_) | LlmError::Api { .. } => {
                AppError::UpstreamRequest(err.to_string())
            }
            LlmError::Envelope(_) | LlmError::EmptyContent => {
                AppError::Unexpected(err.to_string())
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let kind = self.kind();

        let body = match &self {
            AppError::Validation(msg) => {
                tracing::warn!("Validation error: {msg}");
                json!({ "error": "Invalid request", "details": msg, "kind": kind })
            }
            AppError::Extraction(msg) => {
                tracing::warn!("Text extraction error: {msg}");
                json!({ "error": "Failed to extract text", "details": msg, "kind": kind })
            }
            AppError::UpstreamRequest(msg) => {
                tracing::error!("Groq request error: {msg}");
                json!({ "error": "Groq API request failed", "details": msg, "kind": kind })
            }
            AppError::UpstreamDecode { raw } => {
                tracing::error!("Groq reply was not valid JSON ({} bytes)", raw.len());
                json!({ "error": "Failed to decode Groq response as JSON", "raw": raw, "kind": kind })
            }
            AppError::Unexpected(msg) => {
                tracing::error!("Unexpected error: {msg}");
                json!({ "error": "Unexpected error occurred", "details": msg, "kind": kind })
            }
        };

        (status, Json(body)).into_response()
    }
}
