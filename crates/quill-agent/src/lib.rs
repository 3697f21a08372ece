//! Quill agent — session loop, tools, and injected capabilities.
//!
//! This crate contains:
//! - **tools**: Tool trait, registry, outcomes, and the built-in executors
//!   (filesystem, shell)
//! - **confirm**: the human-confirmation gate capability
//! - **status**: the status-reporter capability (spinner seam)
//! - **observer**: the presentation seam for assistant output
//! - **session**: the conversation/tool-execution loop

pub mod confirm;
pub mod observer;
pub mod session;
pub mod status;
pub mod tools;

pub use confirm::{ConfirmationGate, StaticGate};
pub use observer::{NullObserver, TurnObserver};
pub use session::Session;
pub use status::{NullReporter, StatusReporter};
pub use tools::{Tool, ToolOutcome, ToolRegistry};
