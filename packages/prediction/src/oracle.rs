//! Prediction oracle abstraction and the `OpenAI` implementation.
//!
//! The oracle is a black-box function from prompt to text. Keeping it
//! behind a trait lets the pipeline run against test doubles and leaves
//! room for other chat-completions-compatible backends.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::PredictionError;

/// Per-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
/// Backoff before the single retry.
const RETRY_BACKOFF: Duration = Duration::from_millis(500);

/// Trait for spread prediction oracles.
#[async_trait::async_trait]
pub trait PredictionOracle: Send + Sync {
    /// Sends one prompt pair and returns the raw completion text.
    ///
    /// # Errors
    ///
    /// Returns [`PredictionError`] if the request fails.
    async fn predict(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, PredictionError>;
}

/// `OpenAI` chat-completions oracle.
pub struct OpenAiOracle {
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl OpenAiOracle {
    /// Creates a new `OpenAI` oracle.
    #[must_use]
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    messages: Vec<OpenAiMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Serialize)]
struct OpenAiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
}

#[derive(Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct OpenAiError {
    error: OpenAiErrorDetail,
}

#[derive(Deserialize)]
struct OpenAiErrorDetail {
    message: String,
}

#[async_trait::async_trait]
impl PredictionOracle for OpenAiOracle {
    async fn predict(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, PredictionError> {
        let mut last_err = None;

        for attempt in 0..2 {
            if attempt > 0 {
                tokio::time::sleep(RETRY_BACKOFF).await;
                log::debug!("Retrying oracle request");
            }

            match self.predict_once(system_prompt, user_prompt).await {
                Ok(text) => return Ok(text),
                Err(e) => {
                    log::warn!("Oracle attempt {} failed: {e}", attempt + 1);
                    last_err = Some(e);
                }
            }
        }

        Err(last_err.unwrap_or_else(|| PredictionError::Provider {
            message: "oracle request failed without an error".to_string(),
        }))
    }
}

impl OpenAiOracle {
    async fn predict_once(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, PredictionError> {
        let request = OpenAiRequest {
            model: &self.model,
            messages: vec![
                OpenAiMessage {
                    role: "system",
                    content: system_prompt,
                },
                OpenAiMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature: 0.5,
            max_tokens: 1000,
        };

        let resp = self
            .client
            .post("https://api.openai.com/v1/chat/completions")
            .timeout(REQUEST_TIMEOUT)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            let err: OpenAiError = serde_json::from_str(&body).unwrap_or_else(|_| OpenAiError {
                error: OpenAiErrorDetail {
                    message: format!("HTTP {status}: {body}"),
                },
            });
            return Err(PredictionError::Provider {
                message: err.error.message,
            });
        }

        let response: OpenAiResponse = serde_json::from_str(&body)?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| PredictionError::Provider {
                message: "No completion text in OpenAI response".to_string(),
            })
    }
}
