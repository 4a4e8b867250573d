use async_trait::async_trait;
use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::domain::{ports::ChatModel, DomainError, PromptMessage};
use crate::infrastructure::config::LlmConfig;

/// Non-streaming client for an OpenAI-compatible chat completions API
/// (`POST {endpoint}/v1/chat/completions`).
///
/// Transport-level connect failures map to `DomainError::Connectivity`;
/// every other failure (non-2xx status, decode error, empty choices) is a
/// non-connectivity error.
pub struct OpenAiChatModel {
    client: reqwest::Client,
    url: String,
    model: String,
}

impl OpenAiChatModel {
    pub fn new(cfg: &LlmConfig) -> Result<Self, DomainError> {
        let client = build_client(cfg.api_key.as_deref())?;
        let base = validated_base(&cfg.endpoint)?;

        Ok(Self {
            client,
            url: format!("{base}/v1/chat/completions"),
            model: cfg.model.clone(),
        })
    }
}

#[async_trait]
impl ChatModel for OpenAiChatModel {
    async fn call(&self, messages: &[PromptMessage]) -> Result<String, DomainError> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: messages
                .iter()
                .map(|m| WireMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
        };

        debug!(model = %self.model, message_count = messages.len(), "POST {}", self.url);

        let resp = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(classify_transport_error)?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);
            error!(%status, %snippet, model = %self.model, "chat completions returned non-success status");
            return Err(DomainError::external(format!(
                "chat backend returned {status}: {snippet}"
            )));
        }

        let out: ChatCompletionResponse = resp
            .json()
            .await
            .map_err(|e| DomainError::external(format!("failed to decode chat response: {e}")))?;

        primary_content(out)
    }
}

/// First choice's message content, with distinct errors for a missing
/// choice versus a choice carrying no content.
fn primary_content(response: ChatCompletionResponse) -> Result<String, DomainError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| DomainError::external("chat response contained no choices"))?;

    choice
        .message
        .content
        .ok_or_else(|| DomainError::external("chat response choice had no message content"))
}

/// Only failures to reach the backend count as connectivity; anything the
/// backend itself said (or garbled) is an ordinary external error.
fn classify_transport_error(e: reqwest::Error) -> DomainError {
    if e.is_connect() {
        DomainError::connectivity(e.to_string())
    } else {
        DomainError::external(format!("chat request failed: {e}"))
    }
}

pub(crate) fn build_client(api_key: Option<&str>) -> Result<reqwest::Client, DomainError> {
    let mut headers = header::HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/json"),
    );

    if let Some(key) = api_key {
        let value = header::HeaderValue::from_str(&format!("Bearer {key}"))
            .map_err(|e| DomainError::validation(format!("invalid API key header: {e}")))?;
        headers.insert(header::AUTHORIZATION, value);
    }

    reqwest::Client::builder()
        .default_headers(headers)
        .build()
        .map_err(|e| DomainError::internal(format!("failed to build HTTP client: {e}")))
}

pub(crate) fn validated_base(endpoint: &str) -> Result<String, DomainError> {
    let endpoint = endpoint.trim();
    if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
        return Err(DomainError::validation(format!(
            "endpoint must start with http:// or https://, got `{endpoint}`"
        )));
    }
    Ok(endpoint.trim_end_matches('/').to_string())
}

pub(crate) fn make_snippet(text: &str) -> String {
    const MAX: usize = 200;
    let trimmed = text.trim();
    if trimmed.len() <= MAX {
        trimmed.to_string()
    } else {
        let mut end = MAX;
        while !trimmed.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &trimmed[..end])
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}
