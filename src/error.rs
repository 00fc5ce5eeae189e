//! Content Studio error types

use thiserror::Error;

/// Content Studio error type
#[derive(Error, Debug)]
pub enum Error {
    /// Agent backend error (transport failure, non-success status, or timeout)
    #[error("Agent backend error: {0}")]
    Agent(String),

    /// Page rendering error
    #[error("Render error: {0}")]
    Render(#[from] minijinja::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Content Studio operations
pub type Result<T> = std::result::Result<T, Error>;
