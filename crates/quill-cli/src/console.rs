//! Terminal presentation — prints turn events and asks the y/n question
//! before shell commands run.

use async_trait::async_trait;
use colored::Colorize;
use serde_json::Value;
use tracing::debug;

use quill_agent::{ConfirmationGate, ToolOutcome, TurnObserver};

// ─────────────────────────────────────────────
// Banner
// ─────────────────────────────────────────────

/// Print the banner shown at REPL start.
pub fn print_banner(model: &str) {
    let version = env!("CARGO_PKG_VERSION");
    println!();
    println!("{}  v{}", "✒ Quill".cyan().bold(), version.dimmed());
    println!("{}", format!("model: {model}").dimmed());
    println!("{}", "Type a message, or \"exit\" to quit.".dimmed());
    println!();
}

// ─────────────────────────────────────────────
// ConsoleObserver
// ─────────────────────────────────────────────

/// Prints assistant text and tool activity to the terminal.
pub struct ConsoleObserver;

impl TurnObserver for ConsoleObserver {
    fn assistant_text(&self, text: &str) {
        println!();
        println!("{}", "✒ Quill".cyan().bold());
        println!("{text}");
        println!();
    }

    fn tool_started(&self, name: &str, input: &Value) {
        let args = summarize_input(input);
        if args.is_empty() {
            println!("{}", format!("→ {name}").yellow());
        } else {
            println!("{}", format!("→ {name} ({args})").yellow());
        }
    }

    fn tool_finished(&self, name: &str, outcome: &ToolOutcome) {
        let line = match outcome.status() {
            "success" => format!("✓ {name}").green(),
            "declined" => format!("⊘ {name} declined").yellow(),
            _ => format!("✗ {name} failed").red(),
        };
        println!("{line}");
    }

    fn notice(&self, message: &str) {
        println!("{}", message.dimmed());
    }
}

/// One-line rendering of a tool's input for the activity log. Long values
/// are truncated so a big edit does not flood the terminal.
fn summarize_input(input: &Value) -> String {
    let Some(obj) = input.as_object() else {
        return String::new();
    };
    obj.iter()
        .map(|(k, v)| {
            let shown = match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            let shown = if shown.chars().count() > 40 {
                let head: String = shown.chars().take(40).collect();
                format!("{head}…")
            } else {
                shown
            };
            format!("{k}={shown}")
        })
        .collect::<Vec<_>>()
        .join(", ")
}

// ─────────────────────────────────────────────
// TerminalGate
// ─────────────────────────────────────────────

/// Asks the user on the terminal before a shell command is executed.
pub struct TerminalGate;

#[async_trait]
impl ConfirmationGate for TerminalGate {
    async fn confirm(&self, command: &str) -> anyhow::Result<bool> {
        println!();
        println!("{} {}", "Model wants to run:".bold(), command.yellow());
        print!("{}", "Execute? [y/N] ".bold());

        // Blocking stdin read must come off the async runtime.
        let answer = tokio::task::spawn_blocking(|| {
            use std::io::{BufRead, Write};
            std::io::stdout().flush()?;
            let mut line = String::new();
            std::io::stdin().lock().read_line(&mut line)?;
            Ok::<String, std::io::Error>(line)
        })
        .await??;

        let approved = matches!(answer.trim().to_lowercase().as_str(), "y" | "yes");
        debug!(command, approved, "confirmation answered");
        Ok(approved)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn summarize_short_input() {
        let s = summarize_input(&json!({"path": "notes.txt"}));
        assert_eq!(s, "path=notes.txt");
    }

    #[test]
    fn summarize_truncates_long_values() {
        let long = "x".repeat(100);
        let s = summarize_input(&json!({ "old_str": long }));
        assert!(s.chars().count() < 60);
        assert!(s.ends_with('…'));
    }

    #[test]
    fn summarize_non_object() {
        assert_eq!(summarize_input(&json!("bare")), "");
    }
}
