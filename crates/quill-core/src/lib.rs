//! Quill core — message types and configuration.
//!
//! This crate contains:
//! - **types**: conversation turns, content blocks, tool schemas, and the
//!   Messages API request/response shapes
//! - **config**: environment-based startup configuration

pub mod config;
pub mod types;

pub use config::{Config, ConfigError};
pub use types::{
    ContentBlock, MessagesRequest, ModelResponse, Role, StopReason, ToolChoice, ToolSchema, Turn,
};
