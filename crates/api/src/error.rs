//! Error types for the HTTP layer.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use orchestrator::OrchestratorError;
use thiserror::Error;

/// Errors returned by route handlers and middleware.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or unknown bearer token.
    #[error("Unauthorized")]
    Unauthorized,

    /// Malformed path, query or JSON body.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Orchestration failure.
    #[error(transparent)]
    Orchestrator(#[from] OrchestratorError),

    /// Database error outside the orchestrator (token lookup).
    #[error("Database error: {0}")]
    Database(#[from] database::DatabaseError),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Orchestrator(err) => match err {
                OrchestratorError::Configuration(_) | OrchestratorError::InvalidRequest(_) => {
                    StatusCode::BAD_REQUEST
                }
                OrchestratorError::Forbidden { .. } => StatusCode::FORBIDDEN,
                OrchestratorError::NotFound { .. } => StatusCode::NOT_FOUND,
                OrchestratorError::InvalidTransition(_) => StatusCode::CONFLICT,
                OrchestratorError::Backend { .. } | OrchestratorError::AllBackendsFailed(_) => {
                    StatusCode::BAD_GATEWAY
                }
                OrchestratorError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %message, "Request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %message, "Request rejected");
        }

        let body = serde_json::json!({
            "error": message
        });

        (status, Json(body)).into_response()
    }
}

/// Result type for handlers.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use llm_core::{BackendError, LlmModel};

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ApiError::Unauthorized, StatusCode::UNAUTHORIZED),
            (ApiError::BadRequest("missing field".into()), StatusCode::BAD_REQUEST),
            (
                OrchestratorError::Configuration("unknown template".into()).into(),
                StatusCode::BAD_REQUEST,
            ),
            (
                OrchestratorError::InvalidRequest("empty".into()).into(),
                StatusCode::BAD_REQUEST,
            ),
            (OrchestratorError::Forbidden { prompt_id: 1 }.into(), StatusCode::FORBIDDEN),
            (
                OrchestratorError::NotFound {
                    entity: "Prompt",
                    id: "1".into(),
                }
                .into(),
                StatusCode::NOT_FOUND,
            ),
            (
                OrchestratorError::InvalidTransition("answered -> optimized".into()).into(),
                StatusCode::CONFLICT,
            ),
            (
                OrchestratorError::Backend {
                    model: LlmModel::Gpt,
                    source: BackendError::Timeout,
                }
                .into(),
                StatusCode::BAD_GATEWAY,
            ),
            (
                OrchestratorError::AllBackendsFailed("gpt: timeout".into()).into(),
                StatusCode::BAD_GATEWAY,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.status(), expected, "{}", error);
        }
    }
}
