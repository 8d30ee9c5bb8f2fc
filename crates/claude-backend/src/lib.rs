//! Anthropic Claude backend.
//!
//! Implements [`LlmBackend`] over the Anthropic Messages API. System
//! messages in the payload are lifted into the request's top-level
//! `system` field, since the API does not accept them inline.
//!
//! ```rust,no_run
//! use claude_backend::{ClaudeBackend, ClaudeBackendConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = ClaudeBackend::new(ClaudeBackendConfig::from_env()?)?;
//!     Ok(())
//! }
//! ```

mod api_types;
mod backend;
mod config;

pub use backend::ClaudeBackend;
pub use config::{ClaudeBackendConfig, ClaudeBackendConfigBuilder};

pub use llm_core::{async_trait, BackendError, LlmBackend, Message, RawResponse};
