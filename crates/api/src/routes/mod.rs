//! Route handlers for the prompt server.

pub mod health;
pub mod prompt;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;

use crate::auth::require_user;
use crate::state::AppState;

/// Build the router with all routes.
pub fn router(state: AppState) -> Router {
    let prompt_routes = Router::new()
        .route("/side-bar/list", get(prompt::sidebar_list))
        .route("/side-bar/details", get(prompt::sidebar_details))
        .route("/create-best-prompt", post(prompt::create_best_prompt))
        .route("/get-best/organized", post(prompt::organized_answers))
        .route("/optimized-prompt-list", get(prompt::optimized_prompt_list))
        .route("/crosscheck-list", get(prompt::crosscheck_list))
        .route("/:prompt_id", get(prompt::prompt_detail))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_user));

    Router::new()
        // Health check
        .route("/health", get(health::health))
        // Authenticated prompt API
        .nest("/prompt", prompt_routes)
        .with_state(state)
}
