use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::error::StoreError;
use crate::generation::GenerationService;
use crate::lesson::{Answer, Register};

/// Where the store gets answers from.
#[async_trait]
pub trait AnswerSource: Send + Sync {
    async fn fetch_answer(&self, question: &str, register: Register) -> Result<Answer, StoreError>;
}

#[async_trait]
impl AnswerSource for GenerationService {
    async fn fetch_answer(&self, question: &str, register: Register) -> Result<Answer, StoreError> {
        Ok(self.generate(Some(question), Some(register)).await?)
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Calls a remote generation endpoint (`GET {endpoint}/api/ai`).
pub struct HttpAnswerClient {
    client: Client,
    endpoint: String,
}

impl HttpAnswerClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl AnswerSource for HttpAnswerClient {
    async fn fetch_answer(&self, question: &str, register: Register) -> Result<Answer, StoreError> {
        let response = self
            .client
            .get(format!("{}/api/ai", self.endpoint))
            .query(&[("question", question), ("speech", register.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => format!("HTTP {}", status),
            };
            return Err(StoreError::Generation(message));
        }

        Ok(response.json().await?)
    }
}
