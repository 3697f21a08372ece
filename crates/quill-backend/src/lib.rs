//! Quill backend — the model API client.
//!
//! This crate contains:
//! - **traits**: the `ModelBackend` abstraction the session loop depends on
//! - **anthropic**: the HTTP implementation talking to `/v1/messages`

pub mod anthropic;
pub mod traits;

pub use anthropic::AnthropicBackend;
pub use traits::{BackendError, ModelBackend, RequestConfig};
