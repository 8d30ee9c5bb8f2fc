//! Core trait and types for LLM backend implementations.
//!
//! This crate provides the shared interface for every model backend the
//! prompt server can dispatch to. It defines:
//!
//! - [`LlmBackend`] - The trait that all backends must implement
//! - [`Message`] / [`Role`] - Role-tagged prompt units sent to a model
//! - [`LlmModel`] - The identity used to key per-model responses
//! - [`RawResponse`] - A backend's answer before normalization
//! - [`BackendError`] - Error types for backend calls
//!
//! # Example
//!
//! ```rust
//! use llm_core::{async_trait, BackendError, LlmBackend, Message, RawResponse};
//!
//! struct ParrotBackend;
//!
//! #[async_trait]
//! impl LlmBackend for ParrotBackend {
//!     async fn invoke(&self, messages: &[Message]) -> Result<RawResponse, BackendError> {
//!         let last = messages.last().map(|m| m.content.clone()).unwrap_or_default();
//!         Ok(RawResponse::text(last))
//!     }
//!
//!     fn name(&self) -> &str {
//!         "ParrotBackend"
//!     }
//! }
//! ```

mod error;
mod message;
mod model;
mod prompt;
mod response;
mod trait_def;

pub use error::BackendError;
pub use message::{Message, Role};
pub use model::{LlmModel, ParseModelError};
pub use prompt::hash_prompt;
pub use response::{RawResponse, TokenUsage};
pub use trait_def::LlmBackend;

// Re-export async_trait for convenience
pub use async_trait::async_trait;
