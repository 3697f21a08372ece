//! Tool outcomes — the tagged result every executor returns.
//!
//! One discriminant (`status`) plus tool-specific payload fields, so the
//! session loop treats all tools identically. Serialized to a JSON string as
//! the `tool_result` block content the model reads.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The uniform result of executing one tool call.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ToolOutcome {
    /// The tool did its job; payload fields are tool-specific
    /// (`content`, `files`, `stdout`, …).
    Success {
        #[serde(flatten)]
        payload: Map<String, Value>,
    },

    /// The tool failed; `error` describes why. Shell failures also carry
    /// captured `stdout`/`stderr` in the payload.
    Error {
        error: String,
        #[serde(flatten)]
        payload: Map<String, Value>,
    },

    /// The user refused the action. Not an error — the model is expected to
    /// handle this conversationally.
    Declined { message: String },
}

impl ToolOutcome {
    /// A success with the given payload fields.
    pub fn success(fields: &[(&str, Value)]) -> Self {
        ToolOutcome::Success {
            payload: to_map(fields),
        }
    }

    /// An error with no extra payload.
    pub fn error(message: impl Into<String>) -> Self {
        ToolOutcome::Error {
            error: message.into(),
            payload: Map::new(),
        }
    }

    /// An error carrying extra payload fields.
    pub fn error_with(message: impl Into<String>, fields: &[(&str, Value)]) -> Self {
        ToolOutcome::Error {
            error: message.into(),
            payload: to_map(fields),
        }
    }

    pub fn declined(message: impl Into<String>) -> Self {
        ToolOutcome::Declined {
            message: message.into(),
        }
    }

    /// The status discriminant as a string.
    pub fn status(&self) -> &'static str {
        match self {
            ToolOutcome::Success { .. } => "success",
            ToolOutcome::Error { .. } => "error",
            ToolOutcome::Declined { .. } => "declined",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ToolOutcome::Success { .. })
    }

    /// A payload field, if present.
    pub fn field(&self, key: &str) -> Option<&Value> {
        match self {
            ToolOutcome::Success { payload } | ToolOutcome::Error { payload, .. } => {
                payload.get(key)
            }
            ToolOutcome::Declined { .. } => None,
        }
    }

    /// Serialize into the string form carried inside a `tool_result` block.
    pub fn to_content(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| format!(r#"{{"status":"{}"}}"#, self.status()))
    }
}

fn to_map(fields: &[(&str, Value)]) -> Map<String, Value> {
    fields
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_serializes_with_status_tag() {
        let outcome = ToolOutcome::success(&[("content", json!("file body"))]);
        let value: Value = serde_json::from_str(&outcome.to_content()).unwrap();

        assert_eq!(value["status"], "success");
        assert_eq!(value["content"], "file body");
    }

    #[test]
    fn error_serializes_message_and_payload() {
        let outcome = ToolOutcome::error_with(
            "Command 'false' failed with exit code 1.",
            &[("stdout", json!("")), ("stderr", json!("oops"))],
        );
        let value: Value = serde_json::from_str(&outcome.to_content()).unwrap();

        assert_eq!(value["status"], "error");
        assert_eq!(value["error"], "Command 'false' failed with exit code 1.");
        assert_eq!(value["stderr"], "oops");
    }

    #[test]
    fn declined_serializes_message() {
        let outcome = ToolOutcome::declined("User declined to execute the command.");
        let value: Value = serde_json::from_str(&outcome.to_content()).unwrap();

        assert_eq!(value["status"], "declined");
        assert_eq!(value["message"], "User declined to execute the command.");
    }

    #[test]
    fn status_discriminants() {
        assert_eq!(ToolOutcome::success(&[]).status(), "success");
        assert_eq!(ToolOutcome::error("x").status(), "error");
        assert_eq!(ToolOutcome::declined("x").status(), "declined");
        assert!(ToolOutcome::success(&[]).is_success());
        assert!(!ToolOutcome::declined("x").is_success());
    }

    #[test]
    fn field_lookup() {
        let outcome = ToolOutcome::success(&[("path", json!("a.txt"))]);
        assert_eq!(outcome.field("path"), Some(&json!("a.txt")));
        assert_eq!(outcome.field("missing"), None);
        assert_eq!(ToolOutcome::declined("no").field("path"), None);
    }

    #[test]
    fn round_trip() {
        let outcome = ToolOutcome::error_with("bad", &[("stdout", json!("s"))]);
        let back: ToolOutcome = serde_json::from_str(&outcome.to_content()).unwrap();
        assert_eq!(outcome, back);
    }
}
