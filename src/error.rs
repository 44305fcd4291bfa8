use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;

/// Everything the car info handler can fail with. The wire shape is uniform
/// (500 with `{"error": <message>}`), but the variant records which stage of
/// the pipeline failed so callers and tests can classify the error.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("API key is not set up.")]
    MissingApiKey,

    #[error("Google API error: {0}")]
    UpstreamStatus(reqwest::StatusCode),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("No valid content returned from API.")]
    NoContent,

    #[error("Invalid JSON payload from model: {0}")]
    PayloadParse(serde_json::Error),

    #[error("Invalid request body: {0}")]
    InvalidRequest(serde_json::Error),
}

/// Failure classes, one per pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    UpstreamStatus,
    Transport,
    UpstreamContent,
    PayloadParse,
    InputParse,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::MissingApiKey => ErrorKind::Config,
            AppError::UpstreamStatus(_) => ErrorKind::UpstreamStatus,
            AppError::Network(_) => ErrorKind::Transport,
            AppError::NoContent => ErrorKind::UpstreamContent,
            AppError::PayloadParse(_) => ErrorKind::PayloadParse,
            AppError::InvalidRequest(_) => ErrorKind::InputParse,
        }
    }
}

// All failures collapse to the same status and body shape on the wire; the
// one server-side log line happens here.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("Request failed ({:?}): {}", self.kind(), self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}

// Implement alias for Result to simplify usage
pub type AppResult<T> = Result<T, AppError>;
