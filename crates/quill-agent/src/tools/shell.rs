//! Shell tool — execute a command through the host shell.
//!
//! The only tool with a human-in-the-loop gate: the injected
//! `ConfirmationGate` must approve every command before the shell is
//! touched, and the status reporter is paused around the prompt so spinner
//! output never interleaves with it.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::process::Command;
use tracing::info;

use crate::confirm::ConfirmationGate;
use crate::status::StatusReporter;

use super::base::{require_string, Tool};
use super::outcome::ToolOutcome;

// ─────────────────────────────────────────────
// RunShellCommandTool
// ─────────────────────────────────────────────

/// Runs a confirmed command via `sh -c` (or `cmd /C` on Windows) and captures
/// its output.
pub struct RunShellCommandTool {
    gate: Arc<dyn ConfirmationGate>,
    reporter: Arc<dyn StatusReporter>,
}

impl RunShellCommandTool {
    pub fn new(gate: Arc<dyn ConfirmationGate>, reporter: Arc<dyn StatusReporter>) -> Self {
        Self { gate, reporter }
    }
}

#[async_trait]
impl Tool for RunShellCommandTool {
    fn name(&self) -> &str {
        "run_shell_command"
    }

    fn description(&self) -> &str {
        "Execute a shell command. IMPORTANT: This tool will ask for user \
         confirmation before running any command."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "command": {
                    "type": "string",
                    "description": "The command to execute."
                }
            },
            "required": ["command"]
        })
    }

    async fn execute(&self, params: HashMap<String, Value>) -> anyhow::Result<ToolOutcome> {
        let command = require_string(&params, "command")?;

        // The prompt must not fight the spinner for the terminal.
        self.reporter.pause();
        let confirmed = self.gate.confirm(&command).await;
        self.reporter.resume();

        if !confirmed? {
            return Ok(ToolOutcome::declined(
                "User declined to execute the command.",
            ));
        }

        info!(command = %command, "executing shell command");

        let output = if cfg!(target_os = "windows") {
            Command::new("cmd").args(["/C", command.as_str()]).output()
        } else {
            Command::new("sh").args(["-c", command.as_str()]).output()
        }
        .await;

        let output = match output {
            Ok(o) => o,
            Err(e) => {
                return Ok(ToolOutcome::error(format!(
                    "Failed to run command '{command}': {e}"
                )))
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if output.status.success() {
            Ok(ToolOutcome::success(&[
                ("stdout", json!(stdout)),
                ("stderr", json!(stderr)),
            ]))
        } else {
            let code = output.status.code().unwrap_or(-1);
            Ok(ToolOutcome::error_with(
                format!("Command '{command}' failed with exit code {code}."),
                &[("stdout", json!(stdout)), ("stderr", json!(stderr))],
            ))
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
