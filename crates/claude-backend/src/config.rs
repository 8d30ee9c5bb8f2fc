//! Configuration for ClaudeBackend.

use llm_core::BackendError;
use std::env;

/// Default Anthropic API URL.
pub const ANTHROPIC_API_URL: &str = "https://api.anthropic.com";

/// API version header value sent with every request.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Configuration for ClaudeBackend.
#[derive(Debug, Clone)]
pub struct ClaudeBackendConfig {
    /// Anthropic API URL.
    pub api_url: String,

    /// API key for authentication.
    pub api_key: String,

    /// Model name to use.
    pub model: String,

    /// Maximum tokens for response. The Messages API requires it.
    pub max_tokens: u32,

    /// Temperature for generation (0.0 - 1.0).
    pub temperature: Option<f32>,
}

impl Default for ClaudeBackendConfig {
    fn default() -> Self {
        Self {
            api_url: ANTHROPIC_API_URL.to_string(),
            api_key: String::new(),
            model: "claude-sonnet-4-5".to_string(),
            max_tokens: 1024,
            temperature: Some(0.7),
        }
    }
}

impl ClaudeBackendConfig {
    /// Create configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `ANTHROPIC_API_KEY` - API key for authentication
    ///
    /// Optional environment variables:
    /// - `ANTHROPIC_API_URL` - API URL (default: https://api.anthropic.com)
    /// - `ANTHROPIC_MODEL` - Model name (default: claude-sonnet-4-5)
    /// - `ANTHROPIC_MAX_TOKENS` - Max tokens (default: 1024)
    /// - `ANTHROPIC_TEMPERATURE` - Temperature (default: 0.7)
    pub fn from_env() -> Result<Self, BackendError> {
        let api_key = env::var("ANTHROPIC_API_KEY")
            .map_err(|_| BackendError::Configuration("ANTHROPIC_API_KEY not set".to_string()))?;

        let api_url =
            env::var("ANTHROPIC_API_URL").unwrap_or_else(|_| ANTHROPIC_API_URL.to_string());

        let model =
            env::var("ANTHROPIC_MODEL").unwrap_or_else(|_| "claude-sonnet-4-5".to_string());

        let max_tokens = env::var("ANTHROPIC_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1024);

        let temperature = env::var("ANTHROPIC_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(Some(0.7));

        Ok(Self {
            api_url,
            api_key,
            model,
            max_tokens,
            temperature,
        })
    }

    /// Create a new config builder.
    pub fn builder() -> ClaudeBackendConfigBuilder {
        ClaudeBackendConfigBuilder::default()
    }
}

/// Builder for ClaudeBackendConfig.
#[derive(Debug, Default)]
pub struct ClaudeBackendConfigBuilder {
    config: ClaudeBackendConfig,
}

impl ClaudeBackendConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Set the API URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the model name.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the max tokens.
    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.config.max_tokens = tokens;
        self
    }

    /// Set the temperature.
    pub fn temperature(mut self, temp: f32) -> Self {
        self.config.temperature = Some(temp);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ClaudeBackendConfig {
        self.config
    }
}
