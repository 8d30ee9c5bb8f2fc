//! Normalization of raw backend responses into per-model results.

use llm_core::{BackendError, LlmModel, RawResponse};
use serde::{Deserialize, Serialize};

use crate::dispatcher::DispatchOutcome;

/// Characters stripped from the end of a URL found in running text.
const URL_TRAILING: &[char] = &[')', ']', '>', ',', '.', ';', ':', '"', '\'', '!', '?'];

/// A normalized answer from one model, as persisted and returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptResult {
    pub answer: String,
    pub model_version: Option<String>,
    /// URLs cited in the answer, in order of first appearance.
    #[serde(default)]
    pub sources: Vec<String>,
    pub prompt_tokens: Option<u32>,
    pub completion_tokens: Option<u32>,
    pub latency_ms: u64,
}

impl PromptResult {
    /// Normalize a raw response.
    pub fn normalize(raw: &RawResponse) -> Self {
        let answer = raw.content.trim().to_string();
        let sources = extract_sources(&answer);

        Self {
            answer,
            model_version: raw.model_version.clone(),
            sources,
            prompt_tokens: raw.usage.map(|u| u.prompt_tokens),
            completion_tokens: raw.usage.map(|u| u.completion_tokens),
            latency_ms: raw.latency_ms,
        }
    }
}

/// Collect the successful entries of a dispatch round, sorted by model.
///
/// Failures are dropped; use [`failures`] to report them.
pub fn aggregate(outcome: &DispatchOutcome) -> Vec<(LlmModel, PromptResult)> {
    let mut results: Vec<(LlmModel, PromptResult)> = outcome
        .iter()
        .filter_map(|(model, result)| {
            result
                .as_ref()
                .ok()
                .map(|raw| (*model, PromptResult::normalize(raw)))
        })
        .collect();

    results.sort_by_key(|(model, _)| *model);
    results
}

/// Failed entries of a dispatch round, sorted by model.
pub fn failures(outcome: &DispatchOutcome) -> Vec<(LlmModel, &BackendError)> {
    let mut failed: Vec<(LlmModel, &BackendError)> = outcome
        .iter()
        .filter_map(|(model, result)| result.as_ref().err().map(|e| (*model, e)))
        .collect();

    failed.sort_by_key(|(model, _)| *model);
    failed
}

/// Extract `http://` and `https://` URLs from free text, deduplicated.
pub fn extract_sources(text: &str) -> Vec<String> {
    let mut sources: Vec<String> = Vec::new();

    for token in text.split_whitespace() {
        let Some(start) = token.find("https://").or_else(|| token.find("http://")) else {
            continue;
        };

        let url = token[start..].trim_end_matches(URL_TRAILING);
        let scheme_only = url == "https://" || url == "http://";
        if scheme_only || url.len() <= "http://".len() {
            continue;
        }

        if !sources.iter().any(|s| s == url) {
            sources.push(url.to_string());
        }
    }

    sources
}

#[cfg(test)]
mod tests {
    use super::*;
    use llm_core::TokenUsage;

    fn ok(content: &str) -> Result<RawResponse, BackendError> {
        Ok(RawResponse::text(content).with_model_version("v1"))
    }

    #[test]
    fn test_aggregate_keeps_only_successes() {
        let outcome: DispatchOutcome = [
            (LlmModel::Gpt, ok("Paris")),
            (LlmModel::Claude, Err(BackendError::Timeout)),
        ]
        .into_iter()
        .collect();

        let results = aggregate(&outcome);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].0, LlmModel::Gpt);
        assert_eq!(results[0].1.answer, "Paris");

        let failed = failures(&outcome);
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].0, LlmModel::Claude);
    }

    #[test]
    fn test_aggregate_sorted_and_distinct() {
        let outcome: DispatchOutcome = [
            (LlmModel::Grok, ok("c")),
            (LlmModel::Gpt, ok("a")),
            (LlmModel::Claude, ok("b")),
        ]
        .into_iter()
        .collect();

        let models: Vec<LlmModel> = aggregate(&outcome).into_iter().map(|(m, _)| m).collect();
        assert_eq!(models, vec![LlmModel::Gpt, LlmModel::Claude, LlmModel::Grok]);
    }

    #[test]
    fn test_aggregate_empty() {
        assert!(aggregate(&DispatchOutcome::new()).is_empty());
        assert!(failures(&DispatchOutcome::new()).is_empty());
    }

    #[test]
    fn test_normalize() {
        let raw = RawResponse {
            content: "  See https://en.wikipedia.org/wiki/Paris.  \n".to_string(),
            model_version: Some("gpt-4o-mini".to_string()),
            finish_reason: Some("stop".to_string()),
            usage: Some(TokenUsage {
                prompt_tokens: 12,
                completion_tokens: 7,
            }),
            latency_ms: 420,
        };

        let result = PromptResult::normalize(&raw);

        assert_eq!(result.answer, "See https://en.wikipedia.org/wiki/Paris.");
        assert_eq!(result.sources, vec!["https://en.wikipedia.org/wiki/Paris"]);
        assert_eq!(result.prompt_tokens, Some(12));
        assert_eq!(result.completion_tokens, Some(7));
        assert_eq!(result.latency_ms, 420);
    }

    #[test]
    fn test_extract_sources() {
        let text = "Sources: (https://a.example/x), [http://b.example]; https://a.example/x \
                    and https:// nothing, plus www.c.example";

        assert_eq!(
            extract_sources(text),
            vec!["https://a.example/x", "http://b.example"]
        );
        assert!(extract_sources("no links here").is_empty());
    }

    #[test]
    fn test_prompt_result_json_is_camel_case() {
        let result = PromptResult::normalize(&RawResponse::text("hi").with_model_version("echo"));
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["modelVersion"], "echo");
        assert_eq!(json["latencyMs"], 0);
        assert!(json["promptTokens"].is_null());
        assert_eq!(json["sources"], serde_json::json!([]));
    }
}
