//! EmbeddingProvider trait — the abstraction over text-to-vector models.
//!
//! Used for both the fixed domain prototypes (embedded once at startup) and
//! every incoming message/query. Implementations: Ollama embeddings API,
//! deterministic fakes in tests.

use crate::error::EmbeddingError;
use async_trait::async_trait;

/// Converts arbitrary text into a fixed-length numeric vector.
///
/// Deterministic for a given model version: the same input must yield the
/// same vector across calls, otherwise routing stops being reproducible.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// A human-readable name for this provider (e.g., "ollama").
    fn name(&self) -> &str;

    /// Embed one text into a fixed-length vector.
    async fn embed(&self, text: &str) -> std::result::Result<Vec<f32>, EmbeddingError>;
}
