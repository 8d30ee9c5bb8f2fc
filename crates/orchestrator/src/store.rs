//! User-scoped persistence of prompts and answer rounds.

use std::collections::HashSet;

use database::{answer, prompt, validation, Database, NewAnswer, Prompt};
use llm_core::LlmModel;
use tracing::{debug, info};

use crate::aggregator::PromptResult;
use crate::context::UserContext;
use crate::error::{OrchestratorError, Result};
use crate::optimizer::TemplateKey;
use crate::views::{OptimizedPromptResult, PromptSummary, SideBarPromptDetail};

/// Minimum number of distinct answering models for the crosscheck list.
pub const CROSSCHECK_MIN_MODELS: i64 = 2;

/// Prompt store. Every operation that addresses a prompt by ID checks that
/// it belongs to the calling user.
#[derive(Debug, Clone)]
pub struct PromptStore {
    db: Database,
}

impl PromptStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Persist a new question in the `created` state.
    pub async fn save_original(
        &self,
        user: &UserContext,
        question: &str,
        template: TemplateKey,
    ) -> Result<i64> {
        validation::validate_question(question)?;

        let id = prompt::create_prompt(self.db.pool(), &user.user_id, question, template.as_str()).await?;
        info!(prompt_id = id, user = %user.name, template = %template, "Saved original prompt");
        Ok(id)
    }

    /// Persist a question together with its optimized rewrite, atomically.
    ///
    /// The prompt lands directly in `optimized`; nothing is written when
    /// either text fails validation.
    pub async fn save_prompt(
        &self,
        user: &UserContext,
        question: &str,
        template: TemplateKey,
        optimized: &str,
        summary: &str,
    ) -> Result<i64> {
        validation::validate_question(question)?;
        validation::validate_optimized_prompt(optimized)?;

        let id = prompt::create_optimized_prompt(
            self.db.pool(),
            &user.user_id,
            question,
            template.as_str(),
            optimized,
            summary,
        )
        .await?;
        info!(prompt_id = id, user = %user.name, template = %template, "Saved optimized prompt");
        Ok(id)
    }

    /// Attach the optimized rewrite and summary.
    pub async fn save_optimized(
        &self,
        user: &UserContext,
        prompt_id: i64,
        optimized: &str,
        summary: &str,
    ) -> Result<()> {
        self.owned_prompt(user, prompt_id).await?;
        validation::validate_optimized_prompt(optimized)?;

        prompt::mark_optimized(self.db.pool(), prompt_id, optimized, summary).await?;
        debug!(prompt_id, "Saved optimized prompt");
        Ok(())
    }

    /// Persist one round of answers and echo them back.
    ///
    /// An empty set is returned as-is without writing a round.
    pub async fn save_answers(
        &self,
        user: &UserContext,
        prompt_id: i64,
        results: Vec<(LlmModel, PromptResult)>,
    ) -> Result<Vec<(LlmModel, PromptResult)>> {
        self.owned_prompt(user, prompt_id).await?;

        let mut seen = HashSet::new();
        if let Some((dup, _)) = results.iter().find(|(model, _)| !seen.insert(*model)) {
            return Err(OrchestratorError::InvalidRequest(format!(
                "duplicate model in result set: {}",
                dup
            )));
        }

        if results.is_empty() {
            return Ok(results);
        }

        let rows: Vec<NewAnswer> = results
            .iter()
            .map(|(model, result)| NewAnswer {
                model: model.as_str().to_string(),
                answer: result.answer.clone(),
                model_version: result.model_version.clone(),
                sources: result.sources.clone(),
                prompt_tokens: result.prompt_tokens.map(i64::from),
                completion_tokens: result.completion_tokens.map(i64::from),
                latency_ms: i64::try_from(result.latency_ms).unwrap_or(i64::MAX),
            })
            .collect();

        let round = answer::insert_round(self.db.pool(), prompt_id, &rows).await?;
        info!(prompt_id, round, answers = rows.len(), "Saved answer round");
        Ok(results)
    }

    /// Load a prompt, failing unless it exists and belongs to `user`.
    pub async fn owned_prompt(&self, user: &UserContext, prompt_id: i64) -> Result<Prompt> {
        let prompt = prompt::get_prompt(self.db.pool(), prompt_id).await?;
        if prompt.user_id != user.user_id {
            return Err(OrchestratorError::Forbidden { prompt_id });
        }
        Ok(prompt)
    }

    /// Full detail of a prompt with every stored round.
    pub async fn get_detail(&self, user: &UserContext, prompt_id: i64) -> Result<OptimizedPromptResult> {
        let prompt = self.owned_prompt(user, prompt_id).await?;
        let rows = answer::list_answers(self.db.pool(), prompt_id).await?;
        Ok(OptimizedPromptResult::new(&prompt, &rows))
    }

    /// Sidebar detail panel for a prompt.
    pub async fn get_sidebar_detail(&self, user: &UserContext, prompt_id: i64) -> Result<SideBarPromptDetail> {
        let prompt = self.owned_prompt(user, prompt_id).await?;
        let rows = answer::list_answers(self.db.pool(), prompt_id).await?;
        Ok(SideBarPromptDetail::new(&prompt, &rows))
    }

    /// Every prompt of the user, most recent first.
    pub async fn list_for_user(&self, user: &UserContext) -> Result<Vec<PromptSummary>> {
        let prompts = prompt::list_prompts_for_user(self.db.pool(), &user.user_id).await?;
        Ok(prompts.iter().map(PromptSummary::from).collect())
    }

    /// Prompts that reached `optimized` or later.
    pub async fn list_optimized(&self, user: &UserContext) -> Result<Vec<PromptSummary>> {
        let prompts = prompt::list_optimized_for_user(self.db.pool(), &user.user_id).await?;
        Ok(prompts.iter().map(PromptSummary::from).collect())
    }

    /// Prompts answered by at least two distinct models.
    pub async fn list_crosscheck(&self, user: &UserContext) -> Result<Vec<PromptSummary>> {
        let prompts =
            prompt::list_multi_model_for_user(self.db.pool(), &user.user_id, CROSSCHECK_MIN_MODELS)
                .await?;
        Ok(prompts.iter().map(PromptSummary::from).collect())
    }
}
