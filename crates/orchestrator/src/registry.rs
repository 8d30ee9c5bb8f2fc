//! Registry of backends keyed by model identity.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use llm_core::{LlmBackend, LlmModel};

/// Maps each [`LlmModel`] to the backend that serves it.
///
/// Built once at startup from configuration. Cloning is cheap: backends are
/// shared behind `Arc`. Registration order is preserved.
#[derive(Clone, Default)]
pub struct BackendRegistry {
    backends: IndexMap<LlmModel, Arc<dyn LlmBackend>>,
}

impl BackendRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a backend for a model, replacing any previous one.
    pub fn register(&mut self, model: LlmModel, backend: impl LlmBackend + 'static) {
        self.register_shared(model, Arc::new(backend));
    }

    /// Register an already shared backend.
    pub fn register_shared(&mut self, model: LlmModel, backend: Arc<dyn LlmBackend>) {
        self.backends.insert(model, backend);
    }

    /// Builder-style registration.
    pub fn with(mut self, model: LlmModel, backend: impl LlmBackend + 'static) -> Self {
        self.register(model, backend);
        self
    }

    /// Look up the backend for a model.
    pub fn get(&self, model: LlmModel) -> Option<Arc<dyn LlmBackend>> {
        self.backends.get(&model).cloned()
    }

    /// Models with a registered backend, in registration order.
    pub fn models(&self) -> Vec<LlmModel> {
        self.backends.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }
}

impl fmt::Debug for BackendRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.backends.iter().map(|(model, backend)| (model, backend.name())))
            .finish()
    }
}
