use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocsiftError {
    #[error("Database error: {0}")]
    Database(#[from] libsql::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Storage container unreachable: {0}")]
    StorageUnreachable(String),

    #[error("Download failed: {0}")]
    Download(String),

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("OCR error: {0}")]
    Ocr(String),

    #[error("OCR unavailable: {0}")]
    OcrUnavailable(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("LLM unavailable: {0}")]
    LlmUnavailable(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for DocsiftError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            DocsiftError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            DocsiftError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            DocsiftError::Database(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            DocsiftError::Storage(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            DocsiftError::StorageUnreachable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            DocsiftError::Download(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            DocsiftError::Extraction(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            DocsiftError::Ocr(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            DocsiftError::OcrUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            DocsiftError::Llm(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            DocsiftError::LlmUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            DocsiftError::Json(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            DocsiftError::Io(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            DocsiftError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": message,
            "code": status.as_u16()
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, DocsiftError>;
