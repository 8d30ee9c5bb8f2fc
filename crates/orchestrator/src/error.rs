//! Error types for orchestrator operations.

use database::{DatabaseError, ValidationError};
use llm_core::{BackendError, LlmModel};
use thiserror::Error;

/// Errors that can occur while serving a prompt request.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// Unknown template key or other bad configuration input.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The request payload failed validation.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A prompt or related record does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The prompt belongs to a different user.
    #[error("prompt {prompt_id} is not owned by the requesting user")]
    Forbidden { prompt_id: i64 },

    /// The write would move a prompt's lifecycle backwards.
    #[error("invalid state transition: {0}")]
    InvalidTransition(String),

    /// A single required backend call failed.
    #[error("{model} backend failed: {source}")]
    Backend {
        model: LlmModel,
        #[source]
        source: BackendError,
    },

    /// Every requested model failed.
    #[error("all requested models failed: {0}")]
    AllBackendsFailed(String),

    /// Persistence failure.
    #[error("database error: {0}")]
    Database(DatabaseError),
}

impl From<DatabaseError> for OrchestratorError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound { entity, id } => OrchestratorError::NotFound { entity, id },
            DatabaseError::InvalidTransition { .. } => {
                OrchestratorError::InvalidTransition(err.to_string())
            }
            DatabaseError::AlreadyExists { .. } => OrchestratorError::InvalidRequest(err.to_string()),
            other => OrchestratorError::Database(other),
        }
    }
}

impl From<ValidationError> for OrchestratorError {
    fn from(err: ValidationError) -> Self {
        OrchestratorError::InvalidRequest(err.to_string())
    }
}

/// Result type for orchestrator operations.
pub type Result<T> = std::result::Result<T, OrchestratorError>;
