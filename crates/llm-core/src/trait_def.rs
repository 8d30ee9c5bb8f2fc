//! The LlmBackend trait definition.

use async_trait::async_trait;

use crate::error::BackendError;
use crate::message::Message;
use crate::response::RawResponse;

/// A capability for sending a prompt to one model service.
///
/// Implementations range from HTTP clients for hosted models to test doubles.
/// This trait is object-safe and is stored as `Arc<dyn LlmBackend>` in the
/// dispatcher's registry.
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Send the message sequence to the model and return its answer.
    ///
    /// # Arguments
    ///
    /// * `messages` - The ordered prompt payload.
    ///
    /// # Returns
    ///
    /// The raw response, or an error if the call failed.
    async fn invoke(&self, messages: &[Message]) -> Result<RawResponse, BackendError>;

    /// Get a human-readable name for this backend.
    fn name(&self) -> &str;

    /// Check if the backend is ready to accept calls.
    ///
    /// Default implementation always returns true.
    async fn is_ready(&self) -> bool {
        true
    }
}
