//! Read-side DTOs returned by the listing and detail endpoints.
//!
//! Everything here is pure composition over stored records; no I/O.

use std::collections::BTreeMap;

use database::{Prompt, PromptAnswer, PromptStatus};
use llm_core::LlmModel;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::aggregator::PromptResult;

/// One entry of an organized-answers response: `{ "<model>": result }`.
pub type ModelResult = BTreeMap<LlmModel, PromptResult>;

/// Sidebar entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SideBarPromptSummary {
    pub prompt_id: i64,
    pub summary: String,
    pub created_at: String,
}

/// Sidebar detail panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SideBarPromptDetail {
    pub prompt_id: i64,
    pub summary: String,
    pub original_prompt: String,
    pub optimized_prompt: Option<String>,
    pub answers: Vec<StoredAnswer>,
}

/// Row of the optimized-prompt and crosscheck lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptSummary {
    pub prompt_id: i64,
    pub summary: String,
    pub original_prompt: String,
    pub optimized_prompt: Option<String>,
    pub created_at: String,
}

/// Full detail of one prompt, with every stored round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedPromptResult {
    pub prompt_id: i64,
    pub original_prompt: String,
    pub optimized_prompt: Option<String>,
    pub template_key: String,
    pub status: PromptStatus,
    pub answers: Vec<StoredAnswer>,
}

/// A persisted answer with its round and model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredAnswer {
    pub round: i64,
    pub model: LlmModel,
    pub result: PromptResult,
}

/// Returned by `create-best-prompt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedPrompt {
    pub optimized_prompt: String,
    pub prompt_id: i64,
}

fn summary_of(prompt: &Prompt) -> String {
    prompt.summary.clone().unwrap_or_default()
}

impl From<&Prompt> for PromptSummary {
    fn from(prompt: &Prompt) -> Self {
        Self {
            prompt_id: prompt.id,
            summary: summary_of(prompt),
            original_prompt: prompt.original_prompt.clone(),
            optimized_prompt: prompt.optimized_prompt.clone(),
            created_at: prompt.created_at.clone(),
        }
    }
}

impl From<PromptSummary> for SideBarPromptSummary {
    fn from(summary: PromptSummary) -> Self {
        Self {
            prompt_id: summary.prompt_id,
            summary: summary.summary,
            created_at: summary.created_at,
        }
    }
}

impl SideBarPromptDetail {
    pub fn new(prompt: &Prompt, rows: &[PromptAnswer]) -> Self {
        Self {
            prompt_id: prompt.id,
            summary: summary_of(prompt),
            original_prompt: prompt.original_prompt.clone(),
            optimized_prompt: prompt.optimized_prompt.clone(),
            answers: stored_answers(rows),
        }
    }
}

impl OptimizedPromptResult {
    pub fn new(prompt: &Prompt, rows: &[PromptAnswer]) -> Self {
        Self {
            prompt_id: prompt.id,
            original_prompt: prompt.original_prompt.clone(),
            optimized_prompt: prompt.optimized_prompt.clone(),
            template_key: prompt.template_key.clone(),
            status: prompt.status,
            answers: stored_answers(rows),
        }
    }
}

/// Convert stored rows into answers ordered by round, then model.
///
/// Rows naming a model this build does not know are skipped.
pub fn stored_answers(rows: &[PromptAnswer]) -> Vec<StoredAnswer> {
    let mut answers: Vec<StoredAnswer> = rows
        .iter()
        .filter_map(|row| match row.model.parse::<LlmModel>() {
            Ok(model) => Some(StoredAnswer {
                round: row.round,
                model,
                result: PromptResult {
                    answer: row.answer.clone(),
                    model_version: row.model_version.clone(),
                    sources: row.sources(),
                    prompt_tokens: row.prompt_tokens.and_then(|t| u32::try_from(t).ok()),
                    completion_tokens: row.completion_tokens.and_then(|t| u32::try_from(t).ok()),
                    latency_ms: u64::try_from(row.latency_ms).unwrap_or(0),
                },
            }),
            Err(e) => {
                warn!(prompt_id = row.prompt_id, error = %e, "Skipping stored answer");
                None
            }
        })
        .collect();

    answers.sort_by_key(|a| (a.round, a.model));
    answers
}

/// Shape aggregated results as a list of single-entry model maps.
pub fn organized(results: &[(LlmModel, PromptResult)]) -> Vec<ModelResult> {
    results
        .iter()
        .map(|(model, result)| BTreeMap::from([(*model, result.clone())]))
        .collect()
}
