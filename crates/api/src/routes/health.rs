//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use llm_core::LlmModel;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct Health {
    pub status: String,
    /// Models with a registered backend.
    pub models: Vec<LlmModel>,
}

/// Health check endpoint.
pub async fn health(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
        models: state.service.available_models(),
    })
}
