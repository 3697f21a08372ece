//! Model backend trait — the contract the session loop depends on.
//!
//! One synchronous-from-the-caller's-view call: bounded history plus tool
//! schemas in, an ordered list of content blocks plus a stop reason out.
//! API-level failures are `Err`s the loop catches at the turn boundary.

use async_trait::async_trait;

use quill_core::types::{ModelResponse, ToolSchema, Turn};

/// Per-call request parameters.
#[derive(Clone, Debug)]
pub struct RequestConfig {
    /// Maximum tokens to generate.
    pub max_tokens: u32,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self { max_tokens: 2048 }
    }
}

/// Errors from the model backend.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("request to model backend failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model backend returned {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// Trait every model backend implements.
///
/// The session loop holds an `Arc<dyn ModelBackend>` so tests can substitute
/// a scripted backend.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    /// Send one completion request.
    ///
    /// # Arguments
    /// * `model`    — model identifier to request
    /// * `system`   — system instructions
    /// * `messages` — bounded conversation history
    /// * `tools`    — tool schemas offered to the model (auto tool-choice)
    /// * `config`   — max_tokens etc.
    async fn complete(
        &self,
        model: &str,
        system: &str,
        messages: &[Turn],
        tools: &[ToolSchema],
        config: &RequestConfig,
    ) -> Result<ModelResponse, BackendError>;
}
