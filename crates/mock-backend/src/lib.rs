//! Mock LLM backends for prompt dispatch tests.
//!
//! This crate provides mock implementations of the `LlmBackend` trait:
//! - `EchoBackend` - Echoes the last user message back
//! - `FixedBackend` - Always answers with the same text
//! - `FailingBackend` - Always fails with a chosen error
//! - `DelayedBackend` - Wraps another backend with artificial delay
//!
//! For real model calls, use the `openai-backend` or `claude-backend` crates.
//!
//! # Example
//!
//! ```rust
//! use mock_backend::{EchoBackend, LlmBackend, Message};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mock_backend::BackendError> {
//!     let backend = EchoBackend::new();
//!
//!     let response = backend.invoke(&[Message::user("Hello!")]).await?;
//!     assert_eq!(response.content, "Hello!");
//!     Ok(())
//! }
//! ```

mod delayed;
mod echo;
mod failing;
mod fixed;

// Re-export llm-core types for convenience
pub use llm_core::{async_trait, BackendError, LlmBackend, Message, RawResponse};

pub use delayed::DelayedBackend;
pub use echo::EchoBackend;
pub use failing::FailingBackend;
pub use fixed::FixedBackend;
