//! Application state shared across handlers.

use std::sync::Arc;

use database::Database;
use orchestrator::PromptService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection, used for token lookup.
    pub db: Database,
    /// Prompt orchestration service.
    pub service: Arc<PromptService>,
}

impl AppState {
    /// Create new application state.
    pub fn new(db: Database, service: PromptService) -> Self {
        Self {
            db,
            service: Arc::new(service),
        }
    }
}
