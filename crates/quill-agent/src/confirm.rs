//! Confirmation gate — the human-in-the-loop capability for shell commands.
//!
//! The shell tool never reads the terminal itself; it asks whatever gate was
//! injected at construction. This keeps the tool usable behind front ends
//! that aren't a terminal.

use async_trait::async_trait;

/// Asks a human whether a proposed command may run.
#[async_trait]
pub trait ConfirmationGate: Send + Sync {
    /// Present `command` for approval. `Ok(true)` means run it.
    async fn confirm(&self, command: &str) -> anyhow::Result<bool>;
}

/// Gate that answers every request the same way. Used in tests and
/// non-interactive harnesses.
pub struct StaticGate(pub bool);

#[async_trait]
impl ConfirmationGate for StaticGate {
    async fn confirm(&self, _command: &str) -> anyhow::Result<bool> {
        Ok(self.0)
    }
}
