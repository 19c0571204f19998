use std::sync::Arc;
use std::time::Duration;

use crate::error::GenerationError;
use crate::lesson::{self, Answer, Register, DEFAULT_QUESTION};
use crate::model::LanguageModel;

/// Turns a question into a structured `Answer` via one model call.
///
/// Every call is independent: no retries and no caching.
#[derive(Clone)]
pub struct GenerationService {
    model: Arc<dyn LanguageModel>,
    timeout: Duration,
}

impl GenerationService {
    pub fn new(model: Arc<dyn LanguageModel>, timeout: Duration) -> Self {
        Self { model, timeout }
    }

    pub async fn generate(
        &self,
        question: Option<&str>,
        register: Option<Register>,
    ) -> Result<Answer, GenerationError> {
        let question = question
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .unwrap_or(DEFAULT_QUESTION);
        let register = register.unwrap_or_default();

        let prompt = lesson::build_prompt(question, register);
        tracing::info!(
            model = self.model.model_name(),
            %register,
            "Generating answer for {:?}",
            question
        );

        let raw = tokio::time::timeout(self.timeout, self.model.invoke(&prompt))
            .await
            .map_err(|_| GenerationError::Timeout(self.timeout))??;

        let answer = lesson::parse_answer(&raw)?;

        for (i, sentence) in answer.grammar_breakdown.iter().enumerate() {
            if !sentence.chunks_cover_sentence() {
                tracing::warn!("Breakdown {} chunks do not cover its sentence", i);
            }
        }

        Ok(answer)
    }
}
