//! LLM client: the single point of entry for all OpenAI API calls.
//!
//! ARCHITECTURAL RULE: no other module may call the completion provider
//! directly. All LLM interactions go through [`ChatCompletion`].
//!
//! Model and temperature are hardcoded. They are product constants, not
//! tunables.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::ApiKey;

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// The model used for every completion request.
pub const MODEL: &str = "gpt-4o-mini";

/// The sampling temperature used for every completion request.
pub const TEMPERATURE: f32 = 0.3;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Chat-style completion over exactly two turns: a system instruction and
/// the user text. The credential is an argument rather than adapter state,
/// so a completion cannot even be requested without one.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn complete(
        &self,
        credential: &ApiKey,
        system: &str,
        user: &str,
    ) -> Result<String, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types (OpenAI Chat Completions)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// HTTP client for the OpenAI Chat Completions API.
///
/// One request per call, no retry and no backoff: a provider failure
/// propagates to the caller, which presents it as an unexpected-error state.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    url: String,
}

impl Default for LlmClient {
    fn default() -> Self {
        Self::new()
    }
}

impl LlmClient {
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("Failed to build HTTP client"),
            url: OPENAI_API_URL.to_string(),
        }
    }

    fn build_payload<'a>(system: &'a str, user: &'a str) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: MODEL,
            temperature: TEMPERATURE,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
        }
    }
}

#[async_trait]
impl ChatCompletion for LlmClient {
    async fn complete(
        &self,
        credential: &ApiKey,
        system: &str,
        user: &str,
    ) -> Result<String, LlmError> {
        let payload = Self::build_payload(system, user);

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(credential.as_str())
            .header("content-type", "application/json")
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Try to parse the provider's error message
            let message = serde_json::from_str::<OpenAiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let completion: ChatCompletionResponse = response.json().await?;

        if let Some(usage) = &completion.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        completion
            .choices
            .into_iter()
            .find_map(|choice| choice.message.and_then(|message| message.content))
            .ok_or(LlmError::EmptyContent)
    }
}
