//! Error types for backend operations.

use thiserror::Error;

/// Errors that can occur while invoking an LLM backend.
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    /// The backend is not configured or temporarily unavailable.
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// The backend could not be constructed from its configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The request never reached the backend or the connection broke.
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with an error or an unreadable payload.
    #[error("processing failed: {0}")]
    ProcessingFailed(String),

    /// The call did not finish within the dispatch timeout.
    #[error("backend call timed out")]
    Timeout,
}
