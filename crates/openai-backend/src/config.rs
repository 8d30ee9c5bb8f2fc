//! Configuration for OpenAiBackend.

use llm_core::BackendError;
use std::env;

/// Default OpenAI API URL.
pub const OPENAI_API_URL: &str = "https://api.openai.com";

/// Default xAI API URL.
pub const GROK_API_URL: &str = "https://api.x.ai";

/// Configuration for an OpenAI-compatible backend.
#[derive(Debug, Clone)]
pub struct OpenAiBackendConfig {
    /// Backend display name used in logs.
    pub name: String,

    /// API base URL.
    pub api_url: String,

    /// API key for authentication.
    pub api_key: String,

    /// Model name to use.
    pub model: String,

    /// Optional system prompt, prepended when the payload carries none.
    pub system_prompt: Option<String>,

    /// Maximum tokens for response.
    pub max_tokens: Option<u32>,

    /// Temperature for generation (0.0 - 2.0).
    pub temperature: Option<f32>,
}

impl Default for OpenAiBackendConfig {
    fn default() -> Self {
        Self {
            name: "OpenAiBackend".to_string(),
            api_url: OPENAI_API_URL.to_string(),
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            system_prompt: None,
            max_tokens: Some(1024),
            temperature: Some(0.7),
        }
    }
}

impl OpenAiBackendConfig {
    /// Create the GPT configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `OPENAI_API_KEY` - API key for authentication
    ///
    /// Optional environment variables:
    /// - `OPENAI_API_URL` - API URL (default: https://api.openai.com)
    /// - `OPENAI_MODEL` - Model name (default: gpt-4o-mini)
    /// - `OPENAI_SYSTEM_PROMPT` - System prompt
    /// - `OPENAI_MAX_TOKENS` - Max tokens (default: 1024)
    /// - `OPENAI_TEMPERATURE` - Temperature (default: 0.7)
    pub fn from_env() -> Result<Self, BackendError> {
        Self::from_env_prefix("OPENAI", Self::default())
    }

    /// Create the Grok configuration from `GROK_*` environment variables.
    ///
    /// Same variables as [`OpenAiBackendConfig::from_env`], with defaults
    /// pointing at xAI (`https://api.x.ai`, model `grok-4-1-fast`).
    pub fn grok_from_env() -> Result<Self, BackendError> {
        let defaults = Self::builder()
            .name("GrokBackend")
            .api_url(GROK_API_URL)
            .model("grok-4-1-fast")
            .build();
        Self::from_env_prefix("GROK", defaults)
    }

    fn from_env_prefix(prefix: &str, defaults: Self) -> Result<Self, BackendError> {
        let var = |suffix: &str| env::var(format!("{}_{}", prefix, suffix));

        let api_key = var("API_KEY")
            .map_err(|_| BackendError::Configuration(format!("{}_API_KEY not set", prefix)))?;

        let api_url = var("API_URL").unwrap_or(defaults.api_url);
        let model = var("MODEL").unwrap_or(defaults.model);
        let system_prompt = var("SYSTEM_PROMPT").ok().or(defaults.system_prompt);

        let max_tokens = var("MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(defaults.max_tokens);

        let temperature = var("TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(defaults.temperature);

        Ok(Self {
            name: defaults.name,
            api_url,
            api_key,
            model,
            system_prompt,
            max_tokens,
            temperature,
        })
    }

    /// Create a new config builder.
    pub fn builder() -> OpenAiBackendConfigBuilder {
        OpenAiBackendConfigBuilder::default()
    }
}

/// Builder for OpenAiBackendConfig.
#[derive(Debug, Default)]
pub struct OpenAiBackendConfigBuilder {
    config: OpenAiBackendConfig,
}

impl OpenAiBackendConfigBuilder {
    /// Set the display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

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

    /// Set the system prompt.
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = Some(prompt.into());
        self
    }

    /// Set the max tokens.
    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.config.max_tokens = Some(tokens);
        self
    }

    /// Set the temperature.
    pub fn temperature(mut self, temp: f32) -> Self {
        self.config.temperature = Some(temp);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> OpenAiBackendConfig {
        self.config
    }
}
