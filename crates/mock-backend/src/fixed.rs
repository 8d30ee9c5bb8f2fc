//! Fixed backend implementation - always answers with the same text.

use llm_core::{async_trait, BackendError, LlmBackend, Message, RawResponse};

/// A backend that ignores its input and returns a canned answer.
#[derive(Debug, Clone)]
pub struct FixedBackend {
    answer: String,
    model_version: String,
}

impl FixedBackend {
    /// Create a backend that always answers `answer`.
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            model_version: "fixed".to_string(),
        }
    }

    /// Override the reported model version.
    pub fn with_model_version(mut self, version: impl Into<String>) -> Self {
        self.model_version = version.into();
        self
    }
}

#[async_trait]
impl LlmBackend for FixedBackend {
    async fn invoke(&self, _messages: &[Message]) -> Result<RawResponse, BackendError> {
        Ok(RawResponse::text(self.answer.clone()).with_model_version(self.model_version.clone()))
    }

    fn name(&self) -> &str {
        "FixedBackend"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixed_answer() {
        let backend = FixedBackend::new("Paris").with_model_version("gpt-test");
        let response = backend.invoke(&[Message::user("anything")]).await.unwrap();
        assert_eq!(response.content, "Paris");
        assert_eq!(response.model_version.as_deref(), Some("gpt-test"));
    }
}
