//! Host interface error types.

use thiserror::Error;

/// Result type for host operations.
pub type HostResult<T> = Result<T, HostError>;

/// Errors that can occur while talking to the host.
#[derive(Debug, Error)]
pub enum HostError {
    /// Host data call failed.
    #[error("Host call failed: {0}")]
    Unavailable(String),

    /// Session already closed.
    #[error("Plugin session is closed")]
    Closed,

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
