//! Echo backend implementation - echoes the last user message back.

use llm_core::{async_trait, BackendError, LlmBackend, Message, RawResponse, Role};

/// A simple backend that echoes the last user message.
///
/// Useful for testing the dispatch flow without any model calls.
#[derive(Debug, Clone, Default)]
pub struct EchoBackend {
    /// Optional prefix to add before the echo.
    prefix: Option<String>,
}

impl EchoBackend {
    /// Create a new EchoBackend with no prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new EchoBackend with a custom prefix.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mock_backend::EchoBackend;
    ///
    /// let backend = EchoBackend::with_prefix("Echo: ");
    /// // Will respond with "Echo: <last user message>"
    /// ```
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }
}

#[async_trait]
impl LlmBackend for EchoBackend {
    async fn invoke(&self, messages: &[Message]) -> Result<RawResponse, BackendError> {
        let last_user = messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
            .ok_or_else(|| BackendError::ProcessingFailed("no user message".to_string()))?;

        let text = match &self.prefix {
            Some(prefix) => format!("{}{}", prefix, last_user),
            None => last_user.to_string(),
        };

        Ok(RawResponse::text(text).with_model_version("echo"))
    }

    fn name(&self) -> &str {
        "EchoBackend"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_echo_no_prefix() {
        let backend = EchoBackend::new();
        let response = backend.invoke(&[Message::user("Hello!")]).await.unwrap();
        assert_eq!(response.content, "Hello!");
        assert_eq!(response.model_version.as_deref(), Some("echo"));
    }

    #[tokio::test]
    async fn test_echo_with_prefix_uses_last_user_message() {
        let backend = EchoBackend::with_prefix("Echo: ");
        let response = backend
            .invoke(&[
                Message::system("rules"),
                Message::user("first"),
                Message::assistant("ok"),
                Message::user("second"),
            ])
            .await
            .unwrap();
        assert_eq!(response.content, "Echo: second");
    }

    #[tokio::test]
    async fn test_echo_without_user_message_fails() {
        let backend = EchoBackend::new();
        let result = backend.invoke(&[Message::system("rules")]).await;
        assert!(result.is_err());
    }
}
