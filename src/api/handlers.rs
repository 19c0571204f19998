use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use super::{AskQuery, DeprecatedNotice, HealthResponse};
use crate::api::routes::AppState;
use crate::error::AppError;
use crate::lesson::{Answer, Register};

const MAX_QUESTION_CHARS: usize = 1000;

pub async fn ask(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AskQuery>,
) -> Result<Json<Answer>, AppError> {
    let register = match query.speech.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(s) => Some(s.parse::<Register>().map_err(AppError::BadRequest)?),
    };

    if let Some(question) = &query.question {
        if question.chars().count() > MAX_QUESTION_CHARS {
            return Err(AppError::BadRequest(format!(
                "Question too long (max {} chars)",
                MAX_QUESTION_CHARS
            )));
        }
    }

    let answer = state
        .generation
        .generate(query.question.as_deref(), register)
        .await?;

    Ok(Json(answer))
}

/// Speech moved to the client's own synthesis facility; this only says so.
pub async fn tts() -> Json<DeprecatedNotice> {
    Json(DeprecatedNotice {
        message: "TTS functionality has been moved to client-side speech synthesis".to_string(),
        deprecated: true,
    })
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
