//! Session — the conversation/tool-execution loop.
//!
//! Owns conversation history, drives the request/response loop with the
//! model backend, executes requested tools strictly in order, and folds the
//! results back into history as a synthetic user turn. One `run_turn` call
//! handles one line of user input, including any multi-step tool chain the
//! model needs before its final answer.

use std::sync::Arc;

use anyhow::Result;
use serde_json::Value;
use tracing::{debug, info, warn};

use quill_backend::traits::{ModelBackend, RequestConfig};
use quill_core::types::{ContentBlock, ToolSchema, Turn};

use crate::confirm::ConfirmationGate;
use crate::observer::TurnObserver;
use crate::status::StatusReporter;
use crate::tools::filesystem::{EditFileTool, ListFilesTool, ReadFileTool};
use crate::tools::shell::RunShellCommandTool;
use crate::tools::ToolRegistry;

/// History is trimmed to this many most-recent turns after each user turn.
const HISTORY_LIMIT: usize = 30;

/// Maximum model ↔ tool rounds within one user turn. The history trim alone
/// would not stop a model that keeps requesting tools forever.
const DEFAULT_MAX_ROUNDS: usize = 20;

/// System instructions sent with every request.
const SYSTEM_PROMPT: &str = "\
You are a helpful AI assistant with access to tools for working with the \
user's file system and running shell commands. All requests relate to the \
codebase in the current working directory.\n\
\n\
When a request needs a tool, think step by step: pick the tool, determine \
its parameters, then call it. Ask clarifying questions first if you need \
to. Summarize successful tool results for the user in a readable way rather \
than echoing raw data, unless they ask for the raw output. If a tool fails \
or the user declines a command, state the outcome plainly and ask how they \
would like to proceed.";

// ─────────────────────────────────────────────
// Session
// ─────────────────────────────────────────────

/// An interactive conversation session.
pub struct Session {
    /// Model backend.
    backend: Arc<dyn ModelBackend>,
    /// Model identifier to request.
    model: String,
    /// Per-call request parameters.
    request_config: RequestConfig,
    /// Tool registry (fixed set, built at construction).
    tools: ToolRegistry,
    /// Activity animation seam.
    reporter: Arc<dyn StatusReporter>,
    /// Presentation seam.
    observer: Arc<dyn TurnObserver>,
    /// Ordered conversation history, bounded to `HISTORY_LIMIT` turns.
    history: Vec<Turn>,
    /// Inner-loop bound.
    max_rounds: usize,
}

impl Session {
    /// Create a session with the standard four tools registered.
    pub fn new(
        backend: Arc<dyn ModelBackend>,
        model: impl Into<String>,
        gate: Arc<dyn ConfirmationGate>,
        reporter: Arc<dyn StatusReporter>,
        observer: Arc<dyn TurnObserver>,
    ) -> Self {
        let mut tools = ToolRegistry::new();
        tools.register(Arc::new(ReadFileTool));
        tools.register(Arc::new(ListFilesTool));
        tools.register(Arc::new(EditFileTool));
        tools.register(Arc::new(RunShellCommandTool::new(gate, reporter.clone())));

        let model = model.into();
        info!(model = %model, tools = tools.len(), "session initialized");

        Self {
            backend,
            model,
            request_config: RequestConfig::default(),
            tools,
            reporter,
            observer,
            history: Vec::new(),
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }

    /// Override the inner-loop bound.
    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// The conversation history accumulated so far.
    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    /// The tool registry (for inspection).
    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// The model this session requests.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Process one line of user input to completion.
    ///
    /// On `Err` (backend/API failure) the turn is abandoned but all history
    /// appended so far — including the user's message and any completed tool
    /// rounds — is kept, so the session can continue.
    pub async fn run_turn(&mut self, input: &str) -> Result<()> {
        self.history.push(Turn::user_text(input));
        let result = self.drive().await;
        self.trim_history();
        result
    }

    /// The inner loop: call the model, execute requested tools, repeat until
    /// the model answers without tool calls (or a bound is hit).
    async fn drive(&mut self) -> Result<()> {
        let schemas: Vec<ToolSchema> = self.tools.schemas();

        for round in 0..self.max_rounds {
            debug!(round, history = self.history.len(), "model call");

            let messages: Vec<Turn> = self
                .history
                .iter()
                .filter(|t| t.has_content())
                .cloned()
                .collect();

            // Stop the animation on every exit path, including `Err`.
            self.reporter.start("Model thinking");
            let result = self
                .backend
                .complete(
                    &self.model,
                    SYSTEM_PROMPT,
                    &messages,
                    &schemas,
                    &self.request_config,
                )
                .await;
            self.reporter.stop();
            let response = result?;

            let text = response.text();
            if !text.is_empty() {
                self.observer.assistant_text(&text);
            }

            if response.content.is_empty() {
                // Nothing actionable came back. Signal if the stop reason is
                // anomalous, then end the turn rather than retry.
                let anomalous = !response.stop_reason.is_some_and(|r| r.is_expected());
                if anomalous {
                    let shown = response
                        .stop_reason
                        .map(|r| r.to_string())
                        .unwrap_or_else(|| "none".into());
                    warn!(stop_reason = %shown, "model returned no content");
                    self.observer.notice(&format!(
                        "Model response ended unexpectedly with no content (stop reason: {shown})."
                    ));
                }
                return Ok(());
            }

            let tool_uses: Vec<(String, String, Value)> = response
                .content
                .iter()
                .filter_map(|block| match block {
                    ContentBlock::ToolUse { id, name, input } => {
                        Some((id.clone(), name.clone(), input.clone()))
                    }
                    _ => None,
                })
                .collect();

            // Raw assistant content goes into history as-is, text and
            // tool-use blocks alike.
            self.history.push(Turn::assistant(response.content));

            if tool_uses.is_empty() {
                return Ok(());
            }

            // Execute in the requested order, one at a time; later calls may
            // depend on earlier side effects.
            let mut results = Vec::with_capacity(tool_uses.len());
            for (id, name, input) in tool_uses {
                info!(tool = %name, round, "executing tool call");
                self.observer.tool_started(&name, &input);

                self.reporter.start(&format!("Executing {name}"));
                let outcome = self.tools.execute(&name, &input).await;
                self.reporter.stop();

                debug!(tool = %name, status = outcome.status(), "tool finished");
                self.observer.tool_finished(&name, &outcome);

                results.push(ContentBlock::ToolResult {
                    tool_use_id: id,
                    content: outcome.to_content(),
                });
            }
            self.history.push(Turn::tool_results(results));
        }

        warn!(max_rounds = self.max_rounds, "tool round limit reached");
        self.observer.notice(&format!(
            "Stopped after {} consecutive tool rounds without a final answer.",
            self.max_rounds
        ));
        Ok(())
    }

    /// Keep only the most recent `HISTORY_LIMIT` turns.
    fn trim_history(&mut self) {
        if self.history.len() > HISTORY_LIMIT {
            let excess = self.history.len() - HISTORY_LIMIT;
            self.history.drain(..excess);
            debug!(dropped = excess, "trimmed history");
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
