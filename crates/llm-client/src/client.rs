use std::time::Duration;

use crate::types::{ChatMessage, ChatRequest, ChatResponse};
use crate::{LlmError, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

// ─── Completion ───────────────────────────────────────────────────────────

/// Parameters for one completion call. The model and sampling settings come
/// from the caller's config, the messages from the prompt builders.
#[derive(Debug, Clone)]
pub struct Completion {
    pub model: String,
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

// ─── LlmClient ────────────────────────────────────────────────────────────

/// Thin client for an OpenAI-compatible `/chat/completions` endpoint.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct LlmClient {
    http: reqwest::Client,
    api_base: String,
    api_key: Option<String>,
}

impl LlmClient {
    pub fn new(api_base: impl Into<String>, api_key: Option<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            http,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.is_empty()),
        }
    }

    pub fn has_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }

    /// Send a raw request and decode the response body.
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let mut builder = self.http.post(self.endpoint()).json(request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let resp = builder.send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "completion request failed");
            return Err(LlmError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&body)?;
        if let Some(usage) = parsed.usage {
            tracing::debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "completion finished"
            );
        }
        Ok(parsed)
    }

    /// System + user message in, trimmed assistant text out.
    pub async fn complete(&self, completion: &Completion) -> Result<String> {
        let request = ChatRequest {
            model: completion.model.clone(),
            messages: vec![
                ChatMessage::system(completion.system.as_str()),
                ChatMessage::user(completion.user.as_str()),
            ],
            max_tokens: Some(completion.max_tokens),
            temperature: Some(completion.temperature),
        };
        let resp = self.chat(&request).await?;
        resp.first_text()
            .map(|s| s.trim().to_string())
            .ok_or(LlmError::EmptyResponse)
    }
}
