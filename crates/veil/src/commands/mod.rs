//! CLI command handlers.

pub mod algorithms;
pub mod config;
pub mod start;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Verbose output enabled.
    pub verbose: bool,
    /// Logs as JSON lines instead of human-readable text.
    pub json_logs: bool,
}
