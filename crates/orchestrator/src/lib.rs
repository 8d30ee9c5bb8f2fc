//! Multi-model prompt orchestration.
//!
//! This crate provides the [`PromptService`] type, which turns a user's
//! question into an optimized prompt, fans it out to several model backends
//! in parallel and stores the answers per model.
//!
//! # Features
//!
//! - Template-based prompt optimization with a configurable optimizer model
//! - Parallel dispatch with per-backend timeouts and failure isolation
//! - Normalized per-model results with extracted source URLs
//! - User-scoped storage of prompts and answer rounds
//!
//! # Architecture
//!
//! ```text
//! HTTP request (api crate, UserContext resolved)
//!          ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      PROMPT SERVICE                         │
//! │                                                             │
//! │  1. Optimize question into messages (PromptOptimizer)       │
//! │         ↓                                                   │
//! │  2. Dispatch to each model (Dispatcher, one task per model) │
//! │     • timeout → Timeout entry                               │
//! │     • unregistered model → Unavailable entry                │
//! │         ↓                                                   │
//! │  3. Aggregate successes, sorted by model                    │
//! │         ↓                                                   │
//! │  4. Persist round (PromptStore, ownership checked)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use orchestrator::{BackendRegistry, Dispatcher, PromptService, PromptStore, UserContext};
//!
//! let registry = BackendRegistry::new().with(LlmModel::Gpt, OpenAiBackend::from_env()?);
//! let service = PromptService::new(PromptStore::new(db), Dispatcher::new(registry));
//!
//! let user = UserContext::new("c27fb365", "Bob");
//! let created = service.create_best_prompt(&user, request).await?;
//! ```

pub mod aggregator;
mod context;
pub mod dispatcher;
mod error;
pub mod optimizer;
mod registry;
mod service;
pub mod store;
pub mod views;

pub use aggregator::{aggregate, extract_sources, failures, PromptResult};
pub use context::UserContext;
pub use dispatcher::{DispatchOutcome, Dispatcher, DEFAULT_DISPATCH_TIMEOUT};
pub use error::{OrchestratorError, Result};
pub use optimizer::{PromptOptimizer, TemplateKey};
pub use registry::BackendRegistry;
pub use service::{LlmRequest, OptPromptRequest, PromptService};
pub use store::PromptStore;
pub use views::{
    organized, CreatedPrompt, ModelResult, OptimizedPromptResult, PromptSummary, SideBarPromptDetail,
    SideBarPromptSummary, StoredAnswer,
};

// Re-export core types for convenience
pub use llm_core::{LlmModel, Message, Role};
