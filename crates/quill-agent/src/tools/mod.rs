//! Agent tools: trait, outcomes, registry, and built-in executors.

pub mod base;
pub mod filesystem;
pub mod outcome;
pub mod registry;
pub mod shell;

pub use base::Tool;
pub use outcome::ToolOutcome;
pub use registry::ToolRegistry;
