//! Tool trait — the interface every executor implements.
//!
//! A tool is two things: a schema the model is told about, and an executor
//! that turns structured input into a `ToolOutcome`. Executors may also
//! return `Err` for malformed input; the registry converts that to an error
//! outcome so nothing escapes the tool boundary.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

use quill_core::types::ToolSchema;

use super::outcome::ToolOutcome;

// ─────────────────────────────────────────────
// Tool trait
// ─────────────────────────────────────────────

/// Every agent tool implements this trait.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name the model uses to call this tool (e.g. `"read_file"`).
    fn name(&self) -> &str;

    /// Human-readable description shown to the model.
    fn description(&self) -> &str;

    /// JSON Schema describing the accepted input object.
    ///
    /// Must be `{"type": "object", "properties": {...}, "required": [...]}`.
    fn input_schema(&self) -> Value;

    /// Execute the tool with the given input fields.
    ///
    /// Expected failures (bad path, nonzero exit, declined) are data:
    /// return the matching `ToolOutcome`. `Err` is reserved for input the
    /// executor cannot even interpret.
    async fn execute(&self, params: HashMap<String, Value>) -> anyhow::Result<ToolOutcome>;

    /// Build the schema sent to the model.
    fn to_schema(&self) -> ToolSchema {
        ToolSchema::new(self.name(), self.description(), self.input_schema())
    }
}

// ─────────────────────────────────────────────
// Param helpers
// ─────────────────────────────────────────────

/// Extract a required string param, with a user-friendly error.
pub fn require_string(params: &HashMap<String, Value>, key: &str) -> anyhow::Result<String> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| anyhow::anyhow!("Missing required parameter: {key}"))
}

/// Extract an optional string param.
pub fn optional_string(params: &HashMap<String, Value>, key: &str) -> Option<String> {
    params.get(key).and_then(|v| v.as_str()).map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn require_string_present() {
        let mut params = HashMap::new();
        params.insert("path".into(), json!("notes.txt"));
        assert_eq!(require_string(&params, "path").unwrap(), "notes.txt");
    }

    #[test]
    fn require_string_missing() {
        let params = HashMap::new();
        let err = require_string(&params, "path").unwrap_err();
        assert!(err.to_string().contains("path"));
    }

    #[test]
    fn require_string_wrong_type() {
        let mut params = HashMap::new();
        params.insert("path".into(), json!(42));
        assert!(require_string(&params, "path").is_err());
    }

    #[test]
    fn optional_string_lookup() {
        let mut params = HashMap::new();
        params.insert("path".into(), json!("src"));
        assert_eq!(optional_string(&params, "path"), Some("src".into()));
        assert_eq!(optional_string(&params, "other"), None);
    }

    #[tokio::test]
    async fn to_schema_default() {
        struct DummyTool;

        #[async_trait]
        impl Tool for DummyTool {
            fn name(&self) -> &str {
                "dummy"
            }
            fn description(&self) -> &str {
                "A test tool"
            }
            fn input_schema(&self) -> Value {
                json!({
                    "type": "object",
                    "properties": { "msg": { "type": "string" } },
                    "required": ["msg"]
                })
            }
            async fn execute(
                &self,
                _params: HashMap<String, Value>,
            ) -> anyhow::Result<ToolOutcome> {
                Ok(ToolOutcome::success(&[]))
            }
        }

        let schema = DummyTool.to_schema();
        assert_eq!(schema.name, "dummy");
        assert_eq!(schema.description, "A test tool");
        assert_eq!(schema.input_schema["type"], "object");
    }
}
