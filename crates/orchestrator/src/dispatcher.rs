//! Parallel fan-out of one prompt to several model backends.

use std::collections::{BTreeSet, HashMap};
use std::time::{Duration, Instant};

use futures::future::join_all;
use llm_core::{BackendError, LlmModel, Message, RawResponse};
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::registry::BackendRegistry;

/// Default per-backend timeout (60 seconds).
pub const DEFAULT_DISPATCH_TIMEOUT: Duration = Duration::from_secs(60);

/// Per-model outcome of one dispatch round. Map semantics: no ordering.
pub type DispatchOutcome = HashMap<LlmModel, Result<RawResponse, BackendError>>;

/// Sends the same message sequence to every requested model concurrently.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: BackendRegistry,
    timeout: Duration,
}

impl Dispatcher {
    /// Create a dispatcher with the default timeout.
    pub fn new(registry: BackendRegistry) -> Self {
        Self::with_timeout(registry, DEFAULT_DISPATCH_TIMEOUT)
    }

    /// Create a dispatcher with a custom per-backend timeout.
    pub fn with_timeout(registry: BackendRegistry, timeout: Duration) -> Self {
        Self { registry, timeout }
    }

    pub fn registry(&self) -> &BackendRegistry {
        &self.registry
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Dispatch `messages` to each distinct model in `models`.
    ///
    /// Each model gets its own task. A failure, panic or timeout in one task
    /// is recorded as that model's entry and never affects the others. The
    /// call returns once every task has resolved; the outcome holds exactly
    /// one entry per distinct requested model.
    pub async fn dispatch(&self, messages: &[Message], models: &[LlmModel]) -> DispatchOutcome {
        let requested: BTreeSet<LlmModel> = models.iter().copied().collect();
        debug!(models = ?requested, messages = messages.len(), "Dispatching prompt");

        let tasks = requested.into_iter().map(|model| {
            let backend = self.registry.get(model);
            let messages = messages.to_vec();
            let limit = self.timeout;

            let handle = tokio::spawn(async move {
                let Some(backend) = backend else {
                    return Err(BackendError::Unavailable(format!(
                        "no backend registered for {}",
                        model
                    )));
                };

                let started = Instant::now();
                let result = match timeout(limit, backend.invoke(&messages)).await {
                    Ok(result) => result,
                    Err(_) => Err(BackendError::Timeout),
                };

                match &result {
                    Ok(_) => info!(
                        %model,
                        backend = backend.name(),
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "Backend call succeeded"
                    ),
                    Err(e) => warn!(%model, backend = backend.name(), error = %e, "Backend call failed"),
                }

                result
            });

            async move { (model, handle.await) }
        });

        join_all(tasks)
            .await
            .into_iter()
            .map(|(model, joined)| {
                let result = joined.unwrap_or_else(|e| {
                    Err(BackendError::ProcessingFailed(format!(
                        "dispatch task failed: {}",
                        e
                    )))
                });
                (model, result)
            })
            .collect()
    }
}
