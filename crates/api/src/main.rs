//! Truth-AI prompt server binary.

use api::backends::registry_from_env;
use api::{router, AppState, Config};
use database::Database;
use orchestrator::{Dispatcher, PromptService, PromptStore};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!(addr = %config.addr, "Starting prompt server");

    // Connect to database
    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;

    // Register backends
    let registry = registry_from_env()?;
    if registry.is_empty() {
        warn!("No LLM backends configured; set OPENAI_API_KEY, ANTHROPIC_API_KEY or GROK_API_KEY");
    }
    if registry.get(config.optimizer_model).is_none() {
        warn!(model = %config.optimizer_model, "Optimizer model has no registered backend");
    }
    info!(models = ?registry.models(), timeout_secs = config.llm_timeout.as_secs(), "Backends ready");

    // Build application state
    let dispatcher = Dispatcher::with_timeout(registry, config.llm_timeout);
    let service = PromptService::new(PromptStore::new(db.clone()), dispatcher)
        .with_optimizer_model(config.optimizer_model);
    let state = AppState::new(db, service);

    // Build router
    let app = router(state).layer(TraceLayer::new_for_http());

    // Start server
    info!(addr = %config.addr, "Prompt server listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
