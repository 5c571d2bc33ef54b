//! LlmClient trait — the abstraction over the inference endpoint.
//!
//! The endpoint may stream incremental chunks internally, but the contract
//! observed by the pipeline is a single accumulated text result.

use crate::error::LlmError;
use async_trait::async_trait;

/// Sends a fully-assembled prompt to an inference endpoint and returns the
/// accumulated response text.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// A human-readable name for this client (e.g., "ollama").
    fn name(&self) -> &str;

    /// Generate a completion for `prompt` using `model`.
    async fn generate(&self, prompt: &str, model: &str) -> std::result::Result<String, LlmError>;

    /// Health check — can we reach the endpoint?
    async fn health_check(&self) -> std::result::Result<bool, LlmError> {
        Ok(true)
    }
}
