use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Coarse failure classes for one generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationErrorKind {
    UpstreamCallFailure,
    MalformedOutput,
    SchemaMismatch,
}

#[derive(thiserror::Error, Debug)]
pub enum GenerationError {
    #[error("Model call failed: {0}")]
    UpstreamCallFailure(String),

    #[error("Model call timed out after {0:?}")]
    Timeout(Duration),

    #[error("Model output is not valid JSON: {0}")]
    MalformedOutput(String),

    #[error("Model output does not match the answer schema: {0}")]
    SchemaMismatch(String),
}

impl GenerationError {
    pub fn kind(&self) -> GenerationErrorKind {
        match self {
            GenerationError::UpstreamCallFailure(_) | GenerationError::Timeout(_) => {
                GenerationErrorKind::UpstreamCallFailure
            }
            GenerationError::MalformedOutput(_) => GenerationErrorKind::MalformedOutput,
            GenerationError::SchemaMismatch(_) => GenerationErrorKind::SchemaMismatch,
        }
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        GenerationError::UpstreamCallFailure(err.to_string())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Generation failed: {0}")]
    Generation(#[from] GenerationError),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::Generation(e) => {
                let code = match e.kind() {
                    GenerationErrorKind::UpstreamCallFailure => "UPSTREAM_CALL_FAILURE",
                    GenerationErrorKind::MalformedOutput => "MALFORMED_OUTPUT",
                    GenerationErrorKind::SchemaMismatch => "SCHEMA_MISMATCH",
                };
                // Details stay in the log; clients get a generic message.
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    code,
                    "Failed to generate response".to_string(),
                )
            }
        };

        tracing::error!("Request failed: {} - {}", code, self);

        (
            status,
            Json(ErrorResponse {
                error: message,
                code: code.to_string(),
            }),
        )
            .into_response()
    }
}

/// Errors surfaced by the conversation store.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("Answer request failed: {0}")]
    Transport(String),

    #[error("Message {0} not found")]
    MessageNotFound(u64),

    #[error("Message {0} has no answer to play")]
    NoAnswer(u64),

    #[error("Speech synthesis failed: {0}")]
    Speech(String),
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        StoreError::Transport(err.to_string())
    }
}

impl From<GenerationError> for StoreError {
    fn from(err: GenerationError) -> Self {
        StoreError::Generation(err.to_string())
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value '{value}' for {var}")]
    Invalid { var: &'static str, value: String },
}
