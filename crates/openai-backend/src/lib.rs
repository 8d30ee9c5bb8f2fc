//! OpenAI-compatible chat-completions backend.
//!
//! This crate provides an [`LlmBackend`] that talks to any service exposing
//! the `/v1/chat/completions` API. The prompt server registers it twice:
//!
//! - as the GPT backend against `https://api.openai.com`
//! - as the Grok backend against xAI's compatible endpoint
//!
//! # Usage
//!
//! ```rust,no_run
//! use openai_backend::{OpenAiBackend, OpenAiBackendConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let gpt = OpenAiBackend::new(OpenAiBackendConfig::from_env()?)?;
//!     let grok = OpenAiBackend::new(OpenAiBackendConfig::grok_from_env()?)?;
//!     Ok(())
//! }
//! ```

mod api_types;
mod backend;
mod config;

pub use backend::OpenAiBackend;
pub use config::{OpenAiBackendConfig, OpenAiBackendConfigBuilder};

// Re-export llm-core types for convenience
pub use llm_core::{async_trait, BackendError, LlmBackend, Message, RawResponse};
