pub mod gemini;

use async_trait::async_trait;

use crate::error::GenerationError;

pub use gemini::{GeminiConfig, GeminiModel};

/// A hosted generative text model reachable with one request/response call.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Send `prompt` and return the raw text the model produced.
    async fn invoke(&self, prompt: &str) -> Result<String, GenerationError>;

    fn model_name(&self) -> &str;
}
