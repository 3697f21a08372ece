//! Core types for Quill — typed conversation turns and content blocks.
//!
//! These types model the Anthropic Messages API format: each turn carries an
//! ordered list of content blocks (text, tool-use requests, tool results).
//! Using Rust enums instead of loose JSON maps catches format errors at
//! compile time instead of at the API boundary.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────
// Roles and turns
// ─────────────────────────────────────────────

/// Who a conversation turn is attributed to.
///
/// Tool results are submitted under the `user` role, so the two roles
/// strictly alternate from the model's perspective.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One turn of the conversation: a role plus an ordered block sequence.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Turn {
    pub role: Role,
    pub content: Vec<ContentBlock>,
}

impl Turn {
    /// A user turn containing a single text block.
    pub fn user_text(text: impl Into<String>) -> Self {
        Turn {
            role: Role::User,
            content: vec![ContentBlock::Text { text: text.into() }],
        }
    }

    /// An assistant turn with the raw content blocks from a model response.
    pub fn assistant(content: Vec<ContentBlock>) -> Self {
        Turn {
            role: Role::Assistant,
            content,
        }
    }

    /// The synthetic user turn that carries tool results back to the model.
    pub fn tool_results(results: Vec<ContentBlock>) -> Self {
        Turn {
            role: Role::User,
            content: results,
        }
    }

    /// Whether this turn has any content worth sending.
    pub fn has_content(&self) -> bool {
        !self.content.is_empty()
    }
}

// ─────────────────────────────────────────────
// Content blocks
// ─────────────────────────────────────────────

/// A single content block within a turn.
///
/// Serialized with a `type` tag, matching the wire format exactly:
/// `{"type": "text", ...}`, `{"type": "tool_use", ...}`,
/// `{"type": "tool_result", ...}`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ContentBlock {
    /// Plain assistant or user text.
    #[serde(rename = "text")]
    Text { text: String },

    /// A model request to invoke a named tool with structured input.
    #[serde(rename = "tool_use")]
    ToolUse {
        id: String,
        name: String,
        input: serde_json::Value,
    },

    /// The outcome of a tool call, linked back by `tool_use_id`.
    #[serde(rename = "tool_result")]
    ToolResult {
        tool_use_id: String,
        content: String,
    },
}

impl ContentBlock {
    /// The text of a `Text` block, if this is one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentBlock::Text { text } => Some(text),
            _ => None,
        }
    }

    pub fn is_tool_use(&self) -> bool {
        matches!(self, ContentBlock::ToolUse { .. })
    }
}

// ─────────────────────────────────────────────
// Tool schemas
// ─────────────────────────────────────────────

/// The contract for one tool, sent to the model so it knows what it may call.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    /// JSON Schema of the accepted input object.
    pub input_schema: serde_json::Value,
}

impl ToolSchema {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: serde_json::Value,
    ) -> Self {
        ToolSchema {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }
}

// ─────────────────────────────────────────────
// Stop reasons
// ─────────────────────────────────────────────

/// Why the model stopped generating.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    EndTurn,
    ToolUse,
    StopSequence,
    MaxTokens,
    #[serde(other)]
    Unknown,
}

impl StopReason {
    /// The three stop reasons the loop treats as non-anomalous.
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            StopReason::EndTurn | StopReason::ToolUse | StopReason::StopSequence
        )
    }
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            StopReason::EndTurn => "end_turn",
            StopReason::ToolUse => "tool_use",
            StopReason::StopSequence => "stop_sequence",
            StopReason::MaxTokens => "max_tokens",
            StopReason::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

// ─────────────────────────────────────────────
// Messages API request/response
// ─────────────────────────────────────────────

/// Request body for `POST /v1/messages`.
#[derive(Clone, Debug, Serialize)]
pub struct MessagesRequest {
    pub model: String,
    pub max_tokens: u32,
    pub system: String,
    pub messages: Vec<Turn>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolSchema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<ToolChoice>,
}

/// Tool-choice mode sent with each request.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct ToolChoice {
    #[serde(rename = "type")]
    pub choice_type: ToolChoiceType,
}

#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolChoiceType {
    Auto,
}

impl ToolChoice {
    pub fn auto() -> Self {
        ToolChoice {
            choice_type: ToolChoiceType::Auto,
        }
    }
}

/// Response from the model after one `/v1/messages` call.
///
/// Unknown response fields (`id`, `usage`, …) are ignored on deserialization;
/// the loop only depends on the ordered content blocks and the stop reason.
#[derive(Clone, Debug, Deserialize)]
pub struct ModelResponse {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    pub stop_reason: Option<StopReason>,
}

impl ModelResponse {
    /// Concatenated text of all text blocks, preserving order.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(ContentBlock::as_text)
            .collect()
    }

    /// All tool-use blocks, in the order the model requested them.
    pub fn tool_uses(&self) -> Vec<&ContentBlock> {
        self.content.iter().filter(|b| b.is_tool_use()).collect()
    }

    pub fn has_tool_uses(&self) -> bool {
        self.content.iter().any(ContentBlock::is_tool_use)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
