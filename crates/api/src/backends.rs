//! Backend registry built from environment credentials.

use std::env;

use claude_backend::{ClaudeBackend, ClaudeBackendConfig};
use llm_core::{BackendError, LlmModel};
use openai_backend::{OpenAiBackend, OpenAiBackendConfig};
use orchestrator::BackendRegistry;
use tracing::info;

fn key_set(var: &str) -> bool {
    env::var(var).map(|v| !v.trim().is_empty()).unwrap_or(false)
}

/// Register a backend for every model whose API key is present.
///
/// | Model | Key | Other variables |
/// |-------|-----|-----------------|
/// | `gpt` | `OPENAI_API_KEY` | `OPENAI_API_URL`, `OPENAI_MODEL` |
/// | `claude` | `ANTHROPIC_API_KEY` | `ANTHROPIC_API_URL`, `ANTHROPIC_MODEL` |
/// | `grok` | `GROK_API_KEY` | `GROK_API_URL`, `GROK_MODEL` |
pub fn registry_from_env() -> Result<BackendRegistry, BackendError> {
    let mut registry = BackendRegistry::new();

    if key_set("OPENAI_API_KEY") {
        let backend = OpenAiBackend::new(OpenAiBackendConfig::from_env()?)?;
        info!(model = %backend.config().model, "Registered GPT backend");
        registry.register(LlmModel::Gpt, backend);
    }

    if key_set("ANTHROPIC_API_KEY") {
        let backend = ClaudeBackend::new(ClaudeBackendConfig::from_env()?)?;
        info!(model = %backend.config().model, "Registered Claude backend");
        registry.register(LlmModel::Claude, backend);
    }

    if key_set("GROK_API_KEY") {
        let backend = OpenAiBackend::new(OpenAiBackendConfig::grok_from_env()?)?;
        info!(model = %backend.config().model, "Registered Grok backend");
        registry.register(LlmModel::Grok, backend);
    }

    Ok(registry)
}
