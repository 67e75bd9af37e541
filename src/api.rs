//! Chat-completion API client used for translation.
//!
//! Speaks the OpenAI-compatible `/chat/completions` wire shape. Every call
//! is a single attempt bounded by a per-request timeout; there is no retry
//! layer, because callers always have a deterministic fallback translation
//! to downgrade to.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::time::{Duration, Instant};
use tracing::{instrument, warn};

use crate::utils::truncate_for_log;

/// One message in a chat conversation.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        ChatMessage {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        ChatMessage {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request body for the chat completions endpoint.
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Minimal client for an OpenAI-compatible chat completions endpoint.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl ChatClient {
    pub fn new(http: reqwest::Client, api_url: String, api_key: String) -> Self {
        ChatClient {
            http,
            api_url,
            api_key,
        }
    }

    /// Sends one completion request and returns the first choice's content,
    /// trimmed. Error statuses carry a bounded slice of the response body.
    #[instrument(level = "info", skip_all)]
    pub async fn complete(
        &self,
        request: &ChatRequest,
        timeout: Duration,
    ) -> Result<String, Box<dyn Error>> {
        let t0 = Instant::now();
        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .timeout(timeout)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                status = status.as_u16(),
                elapsed_ms = t0.elapsed().as_millis() as u64,
                "Chat completion request rejected"
            );
            return Err(format!("chat API returned {status}: {}", truncate_for_log(&body, 200)).into());
        }

        let parsed: ChatResponse = response.json().await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or("chat API response contained no message content")?;

        Ok(content.trim().to_string())
    }
}
