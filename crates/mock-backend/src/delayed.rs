//! Slow backend: answers through an inner backend after a fixed pause.

use std::time::Duration;

use llm_core::{async_trait, BackendError, LlmBackend, Message, RawResponse};
use tokio::time::sleep;

/// Simulates a slow model by pausing before delegating to `inner`.
///
/// The pause is added to whatever latency the inner backend reports, so
/// aggregated results look like a real slow call. Dropping the future
/// mid-pause (as a dispatch timeout does) never reaches the inner backend.
pub struct DelayedBackend<B> {
    inner: B,
    pause: Duration,
}

impl<B: LlmBackend> DelayedBackend<B> {
    pub fn new(inner: B, pause: Duration) -> Self {
        Self { inner, pause }
    }

    pub fn with_millis(inner: B, millis: u64) -> Self {
        Self::new(inner, Duration::from_millis(millis))
    }

    pub fn with_secs(inner: B, secs: u64) -> Self {
        Self::new(inner, Duration::from_secs(secs))
    }

    /// Pause applied before every call.
    pub fn pause(&self) -> Duration {
        self.pause
    }
}

#[async_trait]
impl<B: LlmBackend> LlmBackend for DelayedBackend<B> {
    async fn invoke(&self, messages: &[Message]) -> Result<RawResponse, BackendError> {
        sleep(self.pause).await;

        let response = self.inner.invoke(messages).await?;
        let latency_ms = response.latency_ms + self.pause.as_millis() as u64;
        Ok(response.with_latency_ms(latency_ms))
    }

    fn name(&self) -> &str {
        "DelayedBackend"
    }

    async fn is_ready(&self) -> bool {
        self.inner.is_ready().await
    }
}
