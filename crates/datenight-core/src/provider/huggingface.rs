//! Hugging Face chat-completion adapter.
//!
//! Speaks the OpenAI-compatible `POST {base_url}/chat/completions` API
//! exposed by the Hugging Face inference router:
//!
//! ```text
//! -> { "model": "...", "messages": [{ "role": "user", "content": "..." }], "stream": false }
//! <- { "choices": [{ "message": { "role": "assistant", "content": "..." } }] }
//! <- { "error": "..." }                      (some providers)
//! <- { "error": { "message": "..." } }       (others)
//! ```

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::trait_def::{Completion, ProviderError, TextGenerator};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// [`TextGenerator`] backed by the Hugging Face inference router.
#[derive(Debug, Clone)]
pub struct HuggingFaceGenerator {
    http: Client,
    base_url: String,
}

impl HuggingFaceGenerator {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl TextGenerator for HuggingFaceGenerator {
    fn name(&self) -> &str {
        "Hugging Face"
    }

    async fn complete(&self, request: Completion<'_>) -> Result<String, ProviderError> {
        let body = ChatRequest {
            model: request.model,
            messages: [ChatMessage {
                role: "user",
                content: request.prompt,
            }],
            stream: false,
        };

        let url = self.completions_url();
        debug!(url = %url, model = request.model, "sending chat completion");

        let response = self
            .http
            .post(&url)
            .bearer_auth(request.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                message: status_message(status, &text),
            });
        }

        let value: Value =
            serde_json::from_str(&text).map_err(|e| ProviderError::Decode(e.to_string()))?;
        if let Some(message) = error_payload(&value) {
            return Err(ProviderError::Api(message));
        }

        let parsed: ChatResponse =
            serde_json::from_value(value).map_err(|e| ProviderError::Decode(e.to_string()))?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ProviderError::Decode("completion has no message content".to_owned()))
    }
}

/// Extract a provider error message from a JSON body, in either shape.
fn error_payload(value: &Value) -> Option<String> {
    match value.get("error")? {
        Value::String(s) => Some(s.clone()),
        Value::Object(obj) => obj
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_owned),
        _ => None,
    }
}

fn status_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(message) = error_payload(&value).or_else(|| {
            value
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_owned)
        }) {
            return message;
        }
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_owned();
    }

    match status.canonical_reason() {
        Some(reason) => format!("HTTP {} {reason}", status.as_u16()),
        None => format!("HTTP {}", status.as_u16()),
    }
}
