//! Turn observer — the presentation seam between the loop and the console.
//!
//! The session loop owns no I/O; everything the user should see goes through
//! whatever observer was injected. Default method bodies are empty so
//! implementations only override what they present.

use serde_json::Value;

use crate::tools::ToolOutcome;

/// Receives user-facing events as a turn progresses.
pub trait TurnObserver: Send + Sync {
    /// Assistant text, verbatim, in response order.
    fn assistant_text(&self, _text: &str) {}

    /// A tool call is about to execute.
    fn tool_started(&self, _name: &str, _input: &Value) {}

    /// A tool call finished with the given outcome.
    fn tool_finished(&self, _name: &str, _outcome: &ToolOutcome) {}

    /// An out-of-band notice (anomalous stop, round cap reached).
    fn notice(&self, _message: &str) {}
}

/// Observer that presents nothing.
pub struct NullObserver;

impl TurnObserver for NullObserver {}
