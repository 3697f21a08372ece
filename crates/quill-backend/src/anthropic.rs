//! Anthropic Messages API backend.
//!
//! Talks directly to `POST {base}/v1/messages` via `reqwest` — no SDK layer.
//! Authentication uses the `x-api-key` header plus a pinned
//! `anthropic-version`.

use async_trait::async_trait;
use tracing::{debug, error};

use quill_core::types::{MessagesRequest, ModelResponse, ToolChoice, ToolSchema, Turn};

use crate::traits::{BackendError, ModelBackend, RequestConfig};

/// Production API base.
const DEFAULT_API_BASE: &str = "https://api.anthropic.com";

/// API version header value the request format is written against.
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// HTTP request timeout.
const REQUEST_TIMEOUT_SECS: u64 = 120;

// ─────────────────────────────────────────────
// AnthropicBackend
// ─────────────────────────────────────────────

/// Backend implementation for the Anthropic Messages API.
pub struct AnthropicBackend {
    /// HTTP client (shared, connection-pooled).
    client: reqwest::Client,
    /// API base URL (overridable for tests).
    api_base: String,
    /// API credential.
    api_key: String,
}

impl std::fmt::Debug for AnthropicBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicBackend")
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl AnthropicBackend {
    /// Create a backend against the production API.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_api_base(api_key, DEFAULT_API_BASE)
    }

    /// Create a backend against a custom base URL (mock servers in tests).
    pub fn with_api_base(api_key: impl Into<String>, api_base: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        AnthropicBackend {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.api_base)
    }
}

#[async_trait]
impl ModelBackend for AnthropicBackend {
    async fn complete(
        &self,
        model: &str,
        system: &str,
        messages: &[Turn],
        tools: &[ToolSchema],
        config: &RequestConfig,
    ) -> Result<ModelResponse, BackendError> {
        debug!(
            model = model,
            messages = messages.len(),
            tools = tools.len(),
            "calling model backend"
        );

        let body = MessagesRequest {
            model: model.to_string(),
            max_tokens: config.max_tokens,
            system: system.to_string(),
            messages: messages.to_vec(),
            tools: tools.to_vec(),
            tool_choice: if tools.is_empty() {
                None
            } else {
                Some(ToolChoice::auto())
            },
        };

        let response = self
            .client
            .post(self.messages_url())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "(unreadable error body)".to_string());
            error!(status = %status, body = %body, "API error");
            return Err(BackendError::Api { status, body });
        }

        let parsed: ModelResponse = response.json().await?;
        debug!(
            blocks = parsed.content.len(),
            stop_reason = %parsed.stop_reason.map(|r| r.to_string()).unwrap_or_else(|| "?".into()),
            "model response received"
        );
        Ok(parsed)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
