use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::ExtractionError;
use crate::llm_client::LlmError;
use crate::resume::normalize::NormalizeError;
use crate::storage::FetchError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Gemini API key not configured")]
    Configuration,

    #[error("Failed to download resume from storage: {0}")]
    Download(#[from] FetchError),

    #[error("{0}")]
    Extraction(#[from] ExtractionError),

    #[error("Gemini API error: {0}")]
    LlmApi(#[from] LlmError),

    #[error("Failed to parse Gemini response JSON: {0}")]
    ResponseParse(#[from] NormalizeError),
}

impl AppError {
    /// Machine-oriented category for clients.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Configuration => "CONFIGURATION_ERROR",
            AppError::Download(_) => "DOWNLOAD_ERROR",
            AppError::Extraction(_) => "EXTRACTION_ERROR",
            AppError::LlmApi(_) => "LLM_API_ERROR",
            AppError::ResponseParse(_) => "RESPONSE_PARSE_ERROR",
        }
    }

    /// Every failure is reported as a server error; callers get no
    /// upstream-vs-internal distinction.
    pub fn status(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        let message = self.to_string();
        tracing::error!("{code}: {message}");

        let body = Json(json!({
            "detail": message,
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
