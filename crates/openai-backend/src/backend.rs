//! OpenAiBackend implementation over the chat-completions API.

use std::time::Instant;

use llm_core::{async_trait, BackendError, LlmBackend, Message, RawResponse, Role, TokenUsage};
use reqwest::Client;
use tracing::{debug, info};

use crate::api_types::{ApiError, ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use crate::config::OpenAiBackendConfig;

/// A backend that sends prompts to an OpenAI-compatible chat-completions API.
pub struct OpenAiBackend {
    client: Client,
    config: OpenAiBackendConfig,
}

impl OpenAiBackend {
    /// Create a new OpenAiBackend with the given configuration.
    pub fn new(config: OpenAiBackendConfig) -> Result<Self, BackendError> {
        let client = Client::builder().build().map_err(|e| {
            BackendError::Configuration(format!("Failed to create HTTP client: {}", e))
        })?;

        info!(
            "{} initialized with model: {}, url: {}",
            config.name, config.model, config.api_url
        );

        Ok(Self { client, config })
    }

    /// Get the configuration.
    pub fn config(&self) -> &OpenAiBackendConfig {
        &self.config
    }

    /// Build the wire messages, prepending the configured system prompt
    /// unless the payload already carries one.
    fn build_messages(&self, messages: &[Message]) -> Vec<ChatMessage> {
        let mut wire = Vec::with_capacity(messages.len() + 1);

        let has_system = messages.iter().any(|m| m.role == Role::System);
        if let (Some(prompt), false) = (self.config.system_prompt.as_ref(), has_system) {
            wire.push(ChatMessage::system(prompt.clone()));
        }

        wire.extend(messages.iter().map(ChatMessage::from));
        wire
    }

    async fn chat_completion(
        &self,
        messages: Vec<ChatMessage>,
    ) -> Result<ChatCompletionResponse, BackendError> {
        let url = format!("{}/v1/chat/completions", self.config.api_url);

        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        debug!("Sending request to {}: {:?}", self.config.name, request);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| BackendError::Network(format!("Failed to send request: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            // Try to parse as API error
            if let Ok(api_error) = serde_json::from_str::<ApiError>(&error_text) {
                return Err(BackendError::ProcessingFailed(format!(
                    "API error ({}): {}",
                    status.as_u16(),
                    api_error.error.message
                )));
            }

            return Err(BackendError::ProcessingFailed(format!(
                "API error ({}): {}",
                status.as_u16(),
                error_text
            )));
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to parse response: {}", e))
        })?;

        debug!("Received response from {}: {:?}", self.config.name, completion);

        Ok(completion)
    }
}

/// Convert a completion into a raw response, failing when no text came back.
fn into_raw_response(
    completion: ChatCompletionResponse,
    latency_ms: u64,
) -> Result<RawResponse, BackendError> {
    let choice = completion
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| BackendError::ProcessingFailed("No choices in response".to_string()))?;

    let content = choice
        .message
        .content
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| BackendError::ProcessingFailed("No content in response".to_string()))?;

    Ok(RawResponse {
        content,
        model_version: Some(completion.model),
        finish_reason: choice.finish_reason,
        usage: completion.usage.map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
        }),
        latency_ms,
    })
}

#[async_trait]
impl LlmBackend for OpenAiBackend {
    async fn invoke(&self, messages: &[Message]) -> Result<RawResponse, BackendError> {
        let started = Instant::now();
        let completion = self.chat_completion(self.build_messages(messages)).await?;
        let latency_ms = started.elapsed().as_millis() as u64;

        if let Some(ref usage) = completion.usage {
            debug!(
                "Token usage - prompt: {}, completion: {}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        into_raw_response(completion, latency_ms)
    }

    fn name(&self) -> &str {
        &self.config.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_types::{Choice, ResponseMessage, Usage};

    fn backend(system_prompt: Option<&str>) -> OpenAiBackend {
        let mut builder = OpenAiBackendConfig::builder().api_key("test-key");
        if let Some(prompt) = system_prompt {
            builder = builder.system_prompt(prompt);
        }
        OpenAiBackend::new(builder.build()).unwrap()
    }

    fn completion(content: Option<&str>) -> ChatCompletionResponse {
        ChatCompletionResponse {
            model: "gpt-4o-mini".to_string(),
            choices: vec![Choice {
                message: ResponseMessage {
                    content: content.map(str::to_string),
                },
                finish_reason: Some("stop".to_string()),
            }],
            usage: Some(Usage {
                prompt_tokens: 10,
                completion_tokens: 3,
            }),
        }
    }

    #[test]
    fn test_build_messages_prepends_system_prompt() {
        let backend = backend(Some("Be precise"));
        let wire = backend.build_messages(&[Message::user("hello")]);

        assert_eq!(wire.len(), 2);
        assert_eq!(wire[0].role, "system");
        assert_eq!(wire[0].content, "Be precise");
        assert_eq!(wire[1].role, "user");
    }

    #[test]
    fn test_build_messages_keeps_payload_system_prompt() {
        let backend = backend(Some("Be precise"));
        let wire = backend.build_messages(&[Message::system("Custom"), Message::user("hello")]);

        assert_eq!(wire.len(), 2);
        assert_eq!(wire[0].content, "Custom");
    }

    #[test]
    fn test_into_raw_response() {
        let raw = into_raw_response(completion(Some("Paris")), 42).unwrap();

        assert_eq!(raw.content, "Paris");
        assert_eq!(raw.model_version.as_deref(), Some("gpt-4o-mini"));
        assert_eq!(raw.finish_reason.as_deref(), Some("stop"));
        assert_eq!(raw.usage.unwrap().total(), 13);
        assert_eq!(raw.latency_ms, 42);
    }

    #[test]
    fn test_into_raw_response_empty_content_fails() {
        let result = into_raw_response(completion(None), 0);
        assert!(matches!(result, Err(BackendError::ProcessingFailed(_))));
    }

    #[test]
    fn test_backend_name() {
        assert_eq!(backend(None).name(), "OpenAiBackend");
    }
}
