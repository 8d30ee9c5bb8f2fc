//! ClaudeBackend implementation using the Anthropic Messages API.

use std::time::Instant;

use llm_core::{async_trait, BackendError, LlmBackend, Message, RawResponse, Role, TokenUsage};
use reqwest::Client;
use tracing::{debug, info};

use crate::api_types::{AnthropicMessage, ApiError, MessagesRequest, MessagesResponse};
use crate::config::{ClaudeBackendConfig, ANTHROPIC_VERSION};

/// A backend that sends prompts to Anthropic's Claude models.
pub struct ClaudeBackend {
    client: Client,
    config: ClaudeBackendConfig,
}

impl ClaudeBackend {
    /// Create a new ClaudeBackend with the given configuration.
    pub fn new(config: ClaudeBackendConfig) -> Result<Self, BackendError> {
        let client = Client::builder().build().map_err(|e| {
            BackendError::Configuration(format!("Failed to create HTTP client: {}", e))
        })?;

        info!("ClaudeBackend initialized with model: {}", config.model);

        Ok(Self { client, config })
    }

    /// Get the configuration.
    pub fn config(&self) -> &ClaudeBackendConfig {
        &self.config
    }

    fn build_request(&self, messages: &[Message]) -> MessagesRequest {
        let system = messages
            .iter()
            .filter(|m| m.role == Role::System)
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        let messages = messages
            .iter()
            .filter(|m| m.role != Role::System)
            .map(|m| AnthropicMessage {
                role: m.role.as_str().to_string(),
                content: m.content.clone(),
            })
            .collect();

        MessagesRequest {
            model: self.config.model.clone(),
            max_tokens: self.config.max_tokens,
            system: (!system.is_empty()).then_some(system),
            messages,
            temperature: self.config.temperature,
        }
    }

    async fn send(&self, request: MessagesRequest) -> Result<MessagesResponse, BackendError> {
        let url = format!("{}/v1/messages", self.config.api_url);

        debug!("Sending request to Anthropic API: {:?}", request);

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| BackendError::Network(format!("Failed to send request: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&error_text)
                .map(|e| e.error.message)
                .unwrap_or(error_text);

            return Err(BackendError::ProcessingFailed(format!(
                "API error ({}): {}",
                status.as_u16(),
                message
            )));
        }

        response.json().await.map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to parse response: {}", e))
        })
    }
}

#[async_trait]
impl LlmBackend for ClaudeBackend {
    async fn invoke(&self, messages: &[Message]) -> Result<RawResponse, BackendError> {
        let request = self.build_request(messages);
        if request.messages.is_empty() {
            return Err(BackendError::ProcessingFailed(
                "Claude requires at least one user message".to_string(),
            ));
        }

        let started = Instant::now();
        let response = self.send(request).await?;
        let latency_ms = started.elapsed().as_millis() as u64;

        let content = response.text();
        if content.trim().is_empty() {
            return Err(BackendError::ProcessingFailed(
                "No content in response".to_string(),
            ));
        }

        Ok(RawResponse {
            content,
            model_version: Some(response.model),
            finish_reason: response.stop_reason,
            usage: response.usage.map(|u| TokenUsage {
                prompt_tokens: u.input_tokens,
                completion_tokens: u.output_tokens,
            }),
            latency_ms,
        })
    }

    fn name(&self) -> &str {
        "ClaudeBackend"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend() -> ClaudeBackend {
        let config = ClaudeBackendConfig::builder().api_key("test-key").build();
        ClaudeBackend::new(config).unwrap()
    }

    #[test]
    fn test_build_request_lifts_system_messages() {
        let request = backend().build_request(&[
            Message::system("Answer briefly."),
            Message::user("What is the capital of France?"),
        ]);

        assert_eq!(request.system.as_deref(), Some("Answer briefly."));
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, "user");
        assert_eq!(request.max_tokens, 1024);
    }

    #[test]
    fn test_build_request_without_system() {
        let request = backend().build_request(&[Message::user("hi")]);

        assert!(request.system.is_none());
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("system").is_none());
    }

    #[tokio::test]
    async fn test_invoke_rejects_system_only_payload() {
        let result = backend().invoke(&[Message::system("only rules")]).await;
        assert!(matches!(result, Err(BackendError::ProcessingFailed(_))));
    }

    #[test]
    fn test_backend_name() {
        assert_eq!(backend().name(), "ClaudeBackend");
    }
}
