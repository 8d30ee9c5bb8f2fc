//! Database models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user of the prompt server, authenticated by bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Stable user identifier (UUID string).
    pub id: String,
    /// Display name
    pub name: String,
    /// Bearer token presented on every request.
    pub api_token: String,
}

/// Lifecycle of a prompt. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PromptStatus {
    /// Only the original question is stored.
    Created,
    /// The optimized rewrite and summary are attached.
    Optimized,
    /// At least one answer round is attached.
    Answered,
}

impl PromptStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptStatus::Created => "created",
            PromptStatus::Optimized => "optimized",
            PromptStatus::Answered => "answered",
        }
    }
}

/// A stored prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Prompt {
    /// Auto-incrementing ID.
    pub id: i64,
    /// Owning user.
    pub user_id: String,
    /// The question as the user typed it.
    pub original_prompt: String,
    /// Optimized rewrite, once attached.
    pub optimized_prompt: Option<String>,
    /// Template used for optimization.
    pub template_key: String,
    /// Short label for listing views.
    pub summary: Option<String>,
    /// Lifecycle status.
    pub status: PromptStatus,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

/// A stored answer from one model in one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PromptAnswer {
    pub id: i64,
    pub prompt_id: i64,
    /// Round number, starting at 1.
    pub round: i64,
    /// Model identity (e.g. "gpt", "claude").
    pub model: String,
    pub answer: String,
    pub model_version: Option<String>,
    /// JSON array of cited URLs.
    pub sources_json: String,
    pub prompt_tokens: Option<i64>,
    pub completion_tokens: Option<i64>,
    pub latency_ms: i64,
    pub created_at: String,
}

impl PromptAnswer {
    /// Decode the cited sources.
    pub fn sources(&self) -> Vec<String> {
        serde_json::from_str(&self.sources_json).unwrap_or_default()
    }
}

/// An answer to insert as part of a round.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewAnswer {
    pub model: String,
    pub answer: String,
    pub model_version: Option<String>,
    pub sources: Vec<String>,
    pub prompt_tokens: Option<i64>,
    pub completion_tokens: Option<i64>,
    pub latency_ms: i64,
}
