//! Prompt templating: turns a raw question into the message sequence sent
//! to a model, and derives the short label shown in listings.

use std::fmt;
use std::str::FromStr;

use llm_core::{hash_prompt, Message};
use tracing::info;

use crate::error::{OrchestratorError, Result};

/// Placeholder replaced by the user's question.
const QUESTION_PLACEHOLDER: &str = "{question}";

/// Maximum characters kept in a summary before truncation.
pub const MAX_SUMMARY_CHARS: usize = 30;

/// Rewrites the question into an editable, well-structured prompt.
pub const EDITABLE_TEMPLATE: &str = r#"You are an expert prompt engineer. Rewrite the user's question below into a clear, well-structured prompt that another AI model can answer accurately.

Requirements:
- Keep the user's intent and write in the same language as the question.
- State the role the answering model should take, the task, the context it needs, and the expected output format.
- When the question involves facts, ask the answering model to cite its sources as URLs.
- Return only the rewritten prompt as plain text, so the user can edit it before sending.

User question:
{question}"#;

/// System guidelines sent ahead of the question for direct answering.
pub const OPTIMIZED_SYSTEM_TEMPLATE: &str = r#"You are a careful, factual assistant.
- Answer the user's question directly and concisely.
- Separate facts from opinion.
- Cite sources as full URLs when you state facts.
- If you are not sure, say so instead of guessing."#;

/// Selector for the prompt-rewriting scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKey {
    /// Single user message asking the model to produce an editable prompt.
    Editable,
    /// System guidelines followed by the question itself.
    Optimized,
}

impl TemplateKey {
    pub const ALL: [TemplateKey; 2] = [TemplateKey::Editable, TemplateKey::Optimized];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKey::Editable => "editable",
            TemplateKey::Optimized => "optimized",
        }
    }

    fn template_text(&self) -> String {
        match self {
            TemplateKey::Editable => EDITABLE_TEMPLATE.to_string(),
            TemplateKey::Optimized => format!("{}\n{}", OPTIMIZED_SYSTEM_TEMPLATE, QUESTION_PLACEHOLDER),
        }
    }
}

impl fmt::Display for TemplateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateKey {
    type Err = OrchestratorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "editable" => Ok(TemplateKey::Editable),
            "optimized" => Ok(TemplateKey::Optimized),
            other => Err(OrchestratorError::Configuration(format!(
                "unknown template key: {:?}",
                other
            ))),
        }
    }
}

/// Builds prompt payloads from templates. Pure and deterministic.
#[derive(Debug, Clone, Default)]
pub struct PromptOptimizer;

impl PromptOptimizer {
    /// Create an optimizer and log each template's fingerprint.
    pub fn new() -> Self {
        for key in TemplateKey::ALL {
            info!(
                template = key.as_str(),
                fingerprint = %hash_prompt(&key.template_text()),
                "Prompt template loaded"
            );
        }
        Self
    }

    /// Embed `question` into the scaffold chosen by `template`.
    pub fn optimize(&self, question: &str, template: TemplateKey) -> Result<Vec<Message>> {
        let question = question.trim();
        if question.is_empty() {
            return Err(OrchestratorError::InvalidRequest(
                "question cannot be empty".to_string(),
            ));
        }

        let messages = match template {
            TemplateKey::Editable => {
                vec![Message::user(EDITABLE_TEMPLATE.replace(QUESTION_PLACEHOLDER, question))]
            }
            TemplateKey::Optimized => vec![
                Message::system(OPTIMIZED_SYSTEM_TEMPLATE),
                Message::user(question),
            ],
        };

        Ok(messages)
    }

    /// Short human-readable label for listing views.
    pub fn summarize(&self, question: &str) -> String {
        let collapsed = question.split_whitespace().collect::<Vec<_>>().join(" ");

        if collapsed.chars().count() <= MAX_SUMMARY_CHARS {
            return collapsed;
        }

        let truncated: String = collapsed.chars().take(MAX_SUMMARY_CHARS).collect();
        format!("{}...", truncated.trim_end())
    }
}
