//! Raw backend responses.

use serde::{Deserialize, Serialize};

/// Token usage reported by a backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl TokenUsage {
    /// Total tokens billed for the call.
    pub fn total(&self) -> u32 {
        self.prompt_tokens + self.completion_tokens
    }
}

/// A backend's answer as it came off the wire.
///
/// Only lives for the duration of a dispatch round; the orchestrator
/// normalizes it before anything is persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawResponse {
    /// Generated text.
    pub content: String,
    /// Model version reported by the backend (e.g. "gpt-4o-mini").
    pub model_version: Option<String>,
    /// Why generation stopped, if reported.
    pub finish_reason: Option<String>,
    /// Token usage, if reported.
    pub usage: Option<TokenUsage>,
    /// Wall-clock latency of the call in milliseconds.
    pub latency_ms: u64,
}

impl RawResponse {
    /// Create a response carrying only text.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    /// Set the reported model version.
    pub fn with_model_version(mut self, version: impl Into<String>) -> Self {
        self.model_version = Some(version.into());
        self
    }

    /// Set the measured latency.
    pub fn with_latency_ms(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }
}
