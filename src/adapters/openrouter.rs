//! OpenRouter chat-completion client
//!
//! OpenRouter speaks the OpenAI chat completions format, so this works
//! against any compatible gateway given its base URL.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use super::ChatGateway;
use crate::error::GatewayError;
use crate::utils::http::{build_client, excerpt, MAX_DETAIL_CHARS};

/// One single-turn completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub model: String,
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Client for the OpenRouter chat completions API
pub struct OpenRouterClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl OpenRouterClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - API root, normally `https://openrouter.ai/api/v1`
    /// * `timeout` - Bound on the whole request
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, String> {
        let client = build_client(timeout)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn transport_error(&self, err: reqwest::Error) -> GatewayError {
        if err.is_timeout() {
            GatewayError::Timeout {
                after: self.timeout,
            }
        } else {
            GatewayError::Transport(err.without_url().to_string())
        }
    }

    /// Prefer the gateway's own error message over the raw body.
    fn status_detail(body: &str) -> String {
        serde_json::from_str::<ErrorEnvelope>(body)
            .map(|envelope| envelope.error.message)
            .map(|message| excerpt(&message, MAX_DETAIL_CHARS))
            .unwrap_or_else(|_| excerpt(body, MAX_DETAIL_CHARS))
    }

    fn parse_completion(body: &str) -> Result<String, GatewayError> {
        let parsed: ChatCompletionResponse = serde_json::from_str(body)
            .map_err(|e| GatewayError::Decode(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(GatewayError::EmptyCompletion)
    }
}

#[async_trait]
impl ChatGateway for OpenRouterClient {
    async fn complete(
        &self,
        request: &ChatRequest,
        credential: &str,
    ) -> Result<String, GatewayError> {
        let body = ChatCompletionBody {
            model: &request.model,
            messages: [ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            stream: false,
        };

        debug!(model = %request.model, "Sending chat completion request");

        let resp = self
            .client
            .post(self.completions_url())
            .bearer_auth(credential)
            .header("X-Title", crate::APP_NAME)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            warn!(model = %request.model, "Chat completion failed with status {}", status);
            return Err(GatewayError::Status {
                status: status.as_u16(),
                detail: Self::status_detail(&text),
            });
        }

        Self::parse_completion(&text)
    }
}
