//! Status reporter — the "thinking" animation seam.
//!
//! The session loop starts the reporter before every blocking backend call or
//! tool execution and stops it on every exit path. `pause`/`resume` bracket
//! interactive prompts so animation output never interleaves with them.

/// Reports long-running activity to the user.
///
/// Implementations must tolerate redundant calls: `stop` on an idle reporter
/// and `start` on a running one are both no-ops or restarts, never panics.
pub trait StatusReporter: Send + Sync {
    /// Begin showing activity with the given message.
    fn start(&self, message: &str);

    /// Stop showing activity and clear any output.
    fn stop(&self);

    /// Suspend output ahead of an interactive prompt.
    fn pause(&self);

    /// Resume output after a prompt, with the message from before the pause.
    fn resume(&self);
}

/// Reporter that shows nothing. Used in tests and non-interactive runs.
pub struct NullReporter;

impl StatusReporter for NullReporter {
    fn start(&self, _message: &str) {}
    fn stop(&self) {}
    fn pause(&self) {}
    fn resume(&self) {}
}
