//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use llm_core::LlmModel;

/// Prompt server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// SQLite database URL.
    pub database_url: String,
    /// Per-backend call timeout.
    pub llm_timeout: Duration,
    /// Model that rewrites questions into optimized prompts.
    pub optimizer_model: LlmModel,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `PROMPT_ADDR` | Server bind address | `127.0.0.1:8790` |
    /// | `SQLITE_PATH` | SQLite database URL | `sqlite:truthai.db?mode=rwc` |
    /// | `LLM_TIMEOUT_SECS` | Per-backend timeout in seconds | `60` |
    /// | `OPTIMIZER_MODEL` | `gpt`, `claude` or `grok` | `gpt` |
    ///
    /// Backend credentials are read by [`crate::backends::registry_from_env`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env::var("PROMPT_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8790".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let database_url = database_url_from_env();

        let llm_timeout = match env::var("LLM_TIMEOUT_SECS") {
            Ok(value) => {
                let secs: u64 = value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidTimeout(value.clone()))?;
                if secs == 0 {
                    return Err(ConfigError::InvalidTimeout(value));
                }
                Duration::from_secs(secs)
            }
            Err(_) => orchestrator::DEFAULT_DISPATCH_TIMEOUT,
        };

        let optimizer_model = match env::var("OPTIMIZER_MODEL") {
            Ok(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidOptimizerModel(value))?,
            Err(_) => LlmModel::Gpt,
        };

        Ok(Self {
            addr,
            database_url,
            llm_timeout,
            optimizer_model,
        })
    }
}

/// `SQLITE_PATH`, or the default database file.
pub fn database_url_from_env() -> String {
    env::var("SQLITE_PATH").unwrap_or_else(|_| "sqlite:truthai.db?mode=rwc".to_string())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid PROMPT_ADDR format")]
    InvalidAddr,

    #[error("Invalid LLM_TIMEOUT_SECS: {0}")]
    InvalidTimeout(String),

    #[error("Invalid OPTIMIZER_MODEL: {0}")]
    InvalidOptimizerModel(String),
}
