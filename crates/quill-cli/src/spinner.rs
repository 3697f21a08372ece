//! Terminal spinner — a `StatusReporter` drawing a braille animation on
//! stderr while the agent waits on the model or a tool.
//!
//! Pause/resume exists so the shell confirmation prompt can take over the
//! terminal without the animation writing over it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

use quill_agent::StatusReporter;

const FRAMES: &[&str] = &["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];
const FRAME_INTERVAL: Duration = Duration::from_millis(100);

// ─────────────────────────────────────────────
// SpinnerReporter
// ─────────────────────────────────────────────

pub struct SpinnerReporter {
    state: Arc<SpinnerState>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

struct SpinnerState {
    running: AtomicBool,
    paused: AtomicBool,
    message: Mutex<String>,
}

impl SpinnerReporter {
    pub fn new() -> Self {
        Self {
            state: Arc::new(SpinnerState {
                running: AtomicBool::new(false),
                paused: AtomicBool::new(false),
                message: Mutex::new(String::new()),
            }),
            handle: Mutex::new(None),
        }
    }

    fn clear_line() {
        // Wide enough for any status message we draw.
        eprint!("\r{}\r", " ".repeat(60));
    }
}

impl Default for SpinnerReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusReporter for SpinnerReporter {
    fn start(&self, message: &str) {
        if let Ok(mut m) = self.state.message.lock() {
            message.clone_into(&mut m);
        }
        if self.state.running.swap(true, Ordering::SeqCst) {
            // Already animating, just the message changed.
            return;
        }
        self.state.paused.store(false, Ordering::SeqCst);

        let state = self.state.clone();
        let task = tokio::spawn(async move {
            let mut frame = 0usize;
            while state.running.load(Ordering::SeqCst) {
                if !state.paused.load(Ordering::SeqCst) {
                    let message = state
                        .message
                        .lock()
                        .map(|m| m.clone())
                        .unwrap_or_default();
                    eprint!("\r{} {}...", FRAMES[frame % FRAMES.len()], message);
                    frame += 1;
                }
                tokio::time::sleep(FRAME_INTERVAL).await;
            }
        });

        if let Ok(mut handle) = self.handle.lock() {
            if let Some(old) = handle.replace(task) {
                old.abort();
            }
        }
    }

    fn stop(&self) {
        self.state.running.store(false, Ordering::SeqCst);
        if let Ok(mut handle) = self.handle.lock() {
            if let Some(task) = handle.take() {
                task.abort();
            }
        }
        Self::clear_line();
    }

    fn pause(&self) {
        self.state.paused.store(true, Ordering::SeqCst);
        Self::clear_line();
    }

    fn resume(&self) {
        self.state.paused.store(false, Ordering::SeqCst);
    }
}

impl Drop for SpinnerReporter {
    fn drop(&mut self) {
        self.state.running.store(false, Ordering::SeqCst);
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn start_stop_leaves_no_task() {
        let spinner = SpinnerReporter::new();
        spinner.start("Working");
        tokio::time::sleep(Duration::from_millis(250)).await;
        spinner.stop();
        assert!(spinner.handle.lock().unwrap().is_none());
        assert!(!spinner.state.running.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn restart_replaces_message() {
        let spinner = SpinnerReporter::new();
        spinner.start("First");
        spinner.start("Second");
        assert_eq!(*spinner.state.message.lock().unwrap(), "Second");
        spinner.stop();
    }

    #[tokio::test]
    async fn pause_and_resume_toggle_flag() {
        let spinner = SpinnerReporter::new();
        spinner.start("Working");
        spinner.pause();
        assert!(spinner.state.paused.load(Ordering::SeqCst));
        spinner.resume();
        assert!(!spinner.state.paused.load(Ordering::SeqCst));
        spinner.stop();
    }

    #[tokio::test]
    async fn stop_without_start_is_harmless() {
        let spinner = SpinnerReporter::new();
        spinner.stop();
        spinner.stop();
    }
}
