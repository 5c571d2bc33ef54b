//! Collaborator clients for Switchboard.
//!
//! One Ollama HTTP client implements both `switchboard_core::LlmClient`
//! (generation) and `switchboard_core::EmbeddingProvider` (embeddings).

pub mod ollama;

pub use ollama::OllamaClient;
