//! Request-level facade composing optimizer, dispatcher, aggregator and store.

use database::validation;
use llm_core::{BackendError, LlmModel, Message};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::aggregator::{aggregate, failures, PromptResult};
use crate::context::UserContext;
use crate::dispatcher::Dispatcher;
use crate::error::{OrchestratorError, Result};
use crate::optimizer::{PromptOptimizer, TemplateKey};
use crate::store::PromptStore;
use crate::views::{
    CreatedPrompt, OptimizedPromptResult, PromptSummary, SideBarPromptDetail, SideBarPromptSummary,
};

fn default_template_key() -> String {
    TemplateKey::Editable.as_str().to_string()
}

/// Body of `create-best-prompt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptPromptRequest {
    pub question: String,
    #[serde(default = "default_template_key")]
    pub template_key: String,
}

/// Body of `get-best/organized`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmRequest {
    #[serde(default)]
    pub models: Vec<LlmModel>,
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// Entry point used by the HTTP layer.
pub struct PromptService {
    store: PromptStore,
    dispatcher: Dispatcher,
    optimizer: PromptOptimizer,
    optimizer_model: LlmModel,
}

impl PromptService {
    /// Create a service that optimizes prompts with GPT.
    pub fn new(store: PromptStore, dispatcher: Dispatcher) -> Self {
        Self {
            store,
            dispatcher,
            optimizer: PromptOptimizer::new(),
            optimizer_model: LlmModel::Gpt,
        }
    }

    /// Use a different model to produce optimized prompts.
    pub fn with_optimizer_model(mut self, model: LlmModel) -> Self {
        self.optimizer_model = model;
        self
    }

    pub fn store(&self) -> &PromptStore {
        &self.store
    }

    pub fn optimizer_model(&self) -> LlmModel {
        self.optimizer_model
    }

    /// Models with a registered backend.
    pub fn available_models(&self) -> Vec<LlmModel> {
        self.dispatcher.registry().models()
    }

    /// Rewrite a question with the optimizer model and store both versions.
    ///
    /// The question is validated before any model call. Nothing is persisted
    /// unless the optimizer returns a usable rewrite.
    #[instrument(skip(self, user, request), fields(user = %user.name))]
    pub async fn create_best_prompt(
        &self,
        user: &UserContext,
        request: OptPromptRequest,
    ) -> Result<CreatedPrompt> {
        let template: TemplateKey = request.template_key.parse()?;
        validation::validate_question(&request.question)?;
        let messages = self.optimizer.optimize(&request.question, template)?;
        let summary = self.optimizer.summarize(&request.question);

        let model = self.optimizer_model;
        let mut outcome = self.dispatcher.dispatch(&messages, &[model]).await;
        let raw = match outcome.remove(&model) {
            Some(Ok(raw)) => raw,
            Some(Err(source)) => return Err(OrchestratorError::Backend { model, source }),
            None => {
                return Err(OrchestratorError::Backend {
                    model,
                    source: BackendError::Unavailable(format!("no result for {}", model)),
                })
            }
        };

        let optimized = raw.content.trim().to_string();
        if optimized.is_empty() {
            return Err(OrchestratorError::Backend {
                model,
                source: BackendError::ProcessingFailed("empty optimized prompt".to_string()),
            });
        }

        validation::validate_optimized_prompt(&optimized).map_err(|e| OrchestratorError::Backend {
            model,
            source: BackendError::ProcessingFailed(e.to_string()),
        })?;

        let prompt_id = self
            .store
            .save_prompt(user, request.question.trim(), template, &optimized, &summary)
            .await?;

        info!(prompt_id, %model, "Created optimized prompt");

        Ok(CreatedPrompt {
            optimized_prompt: optimized,
            prompt_id,
        })
    }

    /// Ask every requested model, store the successful answers as one round
    /// and return them sorted by model.
    #[instrument(skip(self, user, request), fields(user = %user.name, models = ?request.models))]
    pub async fn organized_answers(
        &self,
        user: &UserContext,
        prompt_id: i64,
        request: LlmRequest,
    ) -> Result<Vec<(LlmModel, PromptResult)>> {
        self.store.owned_prompt(user, prompt_id).await?;

        if request.models.is_empty() {
            return Ok(Vec::new());
        }
        if request.messages.is_empty() {
            return Err(OrchestratorError::InvalidRequest(
                "messages cannot be empty".to_string(),
            ));
        }

        let outcome = self.dispatcher.dispatch(&request.messages, &request.models).await;

        let failed = failures(&outcome);
        for (model, error) in &failed {
            warn!(prompt_id, %model, error = %error, "Model failed to answer");
        }

        let results = aggregate(&outcome);
        if results.is_empty() {
            let detail = failed
                .iter()
                .map(|(model, error)| format!("{}: {}", model, error))
                .collect::<Vec<_>>()
                .join("; ");
            return Err(OrchestratorError::AllBackendsFailed(detail));
        }

        self.store.save_answers(user, prompt_id, results).await
    }

    pub async fn sidebar_list(&self, user: &UserContext) -> Result<Vec<SideBarPromptSummary>> {
        let prompts = self.store.list_for_user(user).await?;
        Ok(prompts.into_iter().map(SideBarPromptSummary::from).collect())
    }

    pub async fn sidebar_details(&self, user: &UserContext, prompt_id: i64) -> Result<SideBarPromptDetail> {
        self.store.get_sidebar_detail(user, prompt_id).await
    }

    pub async fn optimized_prompt_list(&self, user: &UserContext) -> Result<Vec<PromptSummary>> {
        self.store.list_optimized(user).await
    }

    pub async fn crosscheck_list(&self, user: &UserContext) -> Result<Vec<PromptSummary>> {
        self.store.list_crosscheck(user).await
    }

    pub async fn prompt_detail(&self, user: &UserContext, prompt_id: i64) -> Result<OptimizedPromptResult> {
        self.store.get_detail(user, prompt_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::BackendRegistry;
    use database::{user, Database, PromptStatus, User};
    use mock_backend::{DelayedBackend, EchoBackend, FailingBackend, FixedBackend};
    use std::time::Duration;

    async fn service(registry: BackendRegistry) -> (PromptService, UserContext, UserContext) {
        let db = Database::in_memory().await.unwrap();
        for id in ["alice", "bob"] {
            user::create_user(
                db.pool(),
                &User {
                    id: id.to_string(),
                    name: id.to_string(),
                    api_token: format!("{}-token", id),
                },
            )
            .await
            .unwrap();
        }

        let dispatcher = Dispatcher::with_timeout(registry, Duration::from_millis(100));
        (
            PromptService::new(PromptStore::new(db), dispatcher),
            UserContext::new("alice", "alice"),
            UserContext::new("bob", "bob"),
        )
    }

    fn create_request(question: &str) -> OptPromptRequest {
        OptPromptRequest {
            question: question.to_string(),
            template_key: "editable".to_string(),
        }
    }

    fn ask(models: &[LlmModel]) -> LlmRequest {
        LlmRequest {
            models: models.to_vec(),
            messages: vec![Message::user("What is the capital of France?")],
        }
    }

    #[tokio::test]
    async fn test_create_best_prompt() {
        let registry = BackendRegistry::new()
            .with(LlmModel::Gpt, FixedBackend::new("  Name the capital city of France.  "));
        let (service, alice, _) = service(registry).await;

        let created = service
            .create_best_prompt(&alice, create_request("What is the capital of France?"))
            .await
            .unwrap();

        assert_eq!(created.optimized_prompt, "Name the capital city of France.");

        let detail = service.prompt_detail(&alice, created.prompt_id).await.unwrap();
        assert_eq!(detail.status, PromptStatus::Optimized);
        assert_eq!(detail.original_prompt, "What is the capital of France?");
        assert_eq!(detail.template_key, "editable");

        let sidebar = service.sidebar_list(&alice).await.unwrap();
        assert_eq!(sidebar[0].summary, "What is the capital of France?");
    }

    #[tokio::test]
    async fn test_create_best_prompt_uses_configured_model() {
        let registry = BackendRegistry::new()
            .with(LlmModel::Gpt, FixedBackend::new("from gpt"))
            .with(LlmModel::Claude, FixedBackend::new("from claude"));
        let (service, alice, _) = service(registry).await;
        let service = service.with_optimizer_model(LlmModel::Claude);

        let created = service.create_best_prompt(&alice, create_request("q")).await.unwrap();
        assert_eq!(created.optimized_prompt, "from claude");
    }

    #[tokio::test]
    async fn test_create_best_prompt_errors() {
        let registry = BackendRegistry::new().with(LlmModel::Gpt, FailingBackend::unavailable());
        let (service, alice, _) = service(registry).await;

        let err = service.create_best_prompt(&alice, create_request("q")).await.unwrap_err();
        assert!(matches!(err, OrchestratorError::Backend { model: LlmModel::Gpt, .. }));
        assert!(service.sidebar_list(&alice).await.unwrap().is_empty());

        let err = service
            .create_best_prompt(
                &alice,
                OptPromptRequest {
                    question: "q".to_string(),
                    template_key: "fancy".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, OrchestratorError::Configuration(_)));

        let err = service.create_best_prompt(&alice, create_request("  ")).await.unwrap_err();
        assert!(matches!(err, OrchestratorError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_overlong_optimizer_output_stores_nothing() {
        let too_long = "x".repeat(validation::MAX_OPTIMIZED_LENGTH + 1);
        let registry = BackendRegistry::new().with(LlmModel::Gpt, FixedBackend::new(too_long));
        let (service, alice, _) = service(registry).await;

        let err = service.create_best_prompt(&alice, create_request("q")).await.unwrap_err();

        assert!(matches!(
            err,
            OrchestratorError::Backend {
                model: LlmModel::Gpt,
                source: BackendError::ProcessingFailed(_),
            }
        ));
        assert!(service.sidebar_list(&alice).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_overlong_question_rejected_before_dispatch() {
        // A failing optimizer would surface as Backend if it were called
        let registry = BackendRegistry::new().with(LlmModel::Gpt, FailingBackend::unavailable());
        let (service, alice, _) = service(registry).await;
        let question = "q".repeat(validation::MAX_QUESTION_LENGTH + 1);

        let err = service.create_best_prompt(&alice, create_request(&question)).await.unwrap_err();

        assert!(matches!(err, OrchestratorError::InvalidRequest(_)));
        assert!(service.sidebar_list(&alice).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_organized_answers_partial_success() {
        let registry = BackendRegistry::new()
            .with(LlmModel::Gpt, EchoBackend::new())
            .with(LlmModel::Claude, DelayedBackend::with_secs(FixedBackend::new("late"), 5));
        let (service, alice, _) = service(registry).await;
        let id = service.create_best_prompt(&alice, create_request("q")).await.unwrap().prompt_id;

        let results = service
            .organized_answers(&alice, id, ask(&[LlmModel::Gpt, LlmModel::Claude]))
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].0, LlmModel::Gpt);
        assert_eq!(results[0].1.answer, "What is the capital of France?");

        let detail = service.prompt_detail(&alice, id).await.unwrap();
        assert_eq!(detail.status, PromptStatus::Answered);
        assert_eq!(detail.answers.len(), 1);
    }

    #[tokio::test]
    async fn test_organized_answers_rounds_accumulate() {
        let registry = BackendRegistry::new()
            .with(LlmModel::Gpt, EchoBackend::new())
            .with(LlmModel::Grok, FixedBackend::new("Paris"));
        let (service, alice, _) = service(registry).await;
        let id = service.create_best_prompt(&alice, create_request("q")).await.unwrap().prompt_id;

        for _ in 0..2 {
            service
                .organized_answers(&alice, id, ask(&[LlmModel::Gpt, LlmModel::Grok]))
                .await
                .unwrap();
        }

        let detail = service.prompt_detail(&alice, id).await.unwrap();
        assert_eq!(detail.answers.len(), 4);
        assert_eq!(detail.answers.last().unwrap().round, 2);

        let crosscheck = service.crosscheck_list(&alice).await.unwrap();
        assert_eq!(crosscheck.len(), 1);
        assert_eq!(crosscheck[0].prompt_id, id);
    }

    #[tokio::test]
    async fn test_organized_answers_all_failed() {
        let registry = BackendRegistry::new()
            .with(LlmModel::Gpt, FixedBackend::new("optimized"))
            .with(LlmModel::Claude, FailingBackend::unavailable());
        let (service, alice, _) = service(registry).await;
        let id = service.create_best_prompt(&alice, create_request("q")).await.unwrap().prompt_id;

        let err = service
            .organized_answers(&alice, id, ask(&[LlmModel::Claude, LlmModel::Grok]))
            .await
            .unwrap_err();

        assert!(matches!(err, OrchestratorError::AllBackendsFailed(_)));
        let detail = service.prompt_detail(&alice, id).await.unwrap();
        assert_eq!(detail.status, PromptStatus::Optimized);
    }

    #[tokio::test]
    async fn test_organized_answers_zero_models() {
        let registry = BackendRegistry::new().with(LlmModel::Gpt, EchoBackend::new());
        let (service, alice, _) = service(registry).await;
        let id = service.create_best_prompt(&alice, create_request("q")).await.unwrap().prompt_id;

        let results = service.organized_answers(&alice, id, LlmRequest::default()).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_organized_answers_requires_messages() {
        let registry = BackendRegistry::new().with(LlmModel::Gpt, EchoBackend::new());
        let (service, alice, _) = service(registry).await;
        let id = service.create_best_prompt(&alice, create_request("q")).await.unwrap().prompt_id;

        let request = LlmRequest {
            models: vec![LlmModel::Gpt],
            messages: vec![],
        };
        let err = service.organized_answers(&alice, id, request).await.unwrap_err();
        assert!(matches!(err, OrchestratorError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_cross_user_access_forbidden() {
        let registry = BackendRegistry::new().with(LlmModel::Gpt, EchoBackend::new());
        let (service, alice, bob) = service(registry).await;
        let id = service.create_best_prompt(&alice, create_request("q")).await.unwrap().prompt_id;

        assert!(matches!(
            service.prompt_detail(&bob, id).await,
            Err(OrchestratorError::Forbidden { .. })
        ));
        assert!(matches!(
            service.sidebar_details(&bob, id).await,
            Err(OrchestratorError::Forbidden { .. })
        ));
        assert!(matches!(
            service.organized_answers(&bob, id, ask(&[LlmModel::Gpt])).await,
            Err(OrchestratorError::Forbidden { .. })
        ));
        assert!(service.optimized_prompt_list(&bob).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_prompt_not_found() {
        let (service, alice, _) = service(BackendRegistry::new()).await;

        assert!(matches!(
            service.organized_answers(&alice, 42, ask(&[LlmModel::Gpt])).await,
            Err(OrchestratorError::NotFound { .. })
        ));
    }
}
