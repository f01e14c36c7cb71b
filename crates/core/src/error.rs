//! Error types for the second-opinion domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error type; fatal ones convert into
//! the top-level [`Error`].

use thiserror::Error;

/// The top-level error type for all fatal second-opinion failures.
#[derive(Debug, Error)]
pub enum Error {
    // --- Provider errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Argument errors ---
    #[error("Invalid arguments: {0}")]
    Argument(String),

    // --- Output ---
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Terminal failures of one bounded network call.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed with status {status}")]
    Api { status: u16, body: String },

    #[error("Request timed out after {after_ms}ms")]
    Timeout { after_ms: u64 },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

impl ProviderError {
    /// The raw response body for HTTP failures, if any.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Api { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// A single context file that could not be read.
///
/// Recovered locally by the prompt assembler: the file's block is omitted
/// and the diagnostic is reported on the side.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Could not read file {path}: {reason}")]
pub struct ContextReadError {
    /// The path as the caller supplied it.
    pub path: String,
    pub reason: String,
}
