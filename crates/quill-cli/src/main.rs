//! Quill CLI — entry point.
//!
//! A terminal AI assistant with file and shell tools. Runs an interactive
//! REPL by default, or a single message with `-m`.

mod console;
mod repl;
mod spinner;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use quill_agent::{NullReporter, Session, StatusReporter};
use quill_backend::anthropic::AnthropicBackend;
use quill_core::config::Config;

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// ✒ Quill — terminal AI assistant with file and shell tools
#[derive(Parser)]
#[command(name = "quill", version, about, long_about = None)]
struct Cli {
    /// Single message (non-interactive). Omit for REPL mode.
    #[arg(short, long)]
    message: Option<String>,

    /// Model to use (overrides ANTHROPIC_DEFAULT_MODEL).
    #[arg(long)]
    model: Option<String>,

    /// Enable debug logging (disables the spinner).
    #[arg(long, default_value_t = false)]
    logs: bool,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.logs);

    let config = Config::from_env().context("configuration error")?;
    let model = cli.model.unwrap_or(config.model);

    let backend = Arc::new(AnthropicBackend::new(config.api_key));

    // Log lines and spinner redraws fight over the same terminal.
    let reporter: Arc<dyn StatusReporter> = if cli.logs {
        Arc::new(NullReporter)
    } else {
        Arc::new(spinner::SpinnerReporter::new())
    };

    let mut session = Session::new(
        backend,
        model,
        Arc::new(console::TerminalGate),
        reporter,
        Arc::new(console::ConsoleObserver),
    );

    match cli.message {
        Some(msg) => {
            // Single-shot mode
            info!("processing single message");
            session.run_turn(&msg).await
        }
        None => repl::run(session).await,
    }
}

/// Initialize tracing/logging.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("quill=debug,info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
