//! Failing backend implementation - every call returns an error.

use llm_core::{async_trait, BackendError, LlmBackend, Message, RawResponse};

/// A backend that always fails with the configured error.
#[derive(Debug, Clone)]
pub struct FailingBackend {
    error: BackendError,
}

impl FailingBackend {
    /// Create a backend that fails with `error`.
    pub fn new(error: BackendError) -> Self {
        Self { error }
    }

    /// Create a backend that reports itself unavailable.
    pub fn unavailable() -> Self {
        Self::new(BackendError::Unavailable("mock outage".to_string()))
    }
}

#[async_trait]
impl LlmBackend for FailingBackend {
    async fn invoke(&self, _messages: &[Message]) -> Result<RawResponse, BackendError> {
        Err(self.error.clone())
    }

    fn name(&self) -> &str {
        "FailingBackend"
    }

    async fn is_ready(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_failing_backend() {
        let backend = FailingBackend::unavailable();
        let result = backend.invoke(&[Message::user("hi")]).await;
        assert!(matches!(result, Err(BackendError::Unavailable(_))));
        assert!(!backend.is_ready().await);
    }
}
