pub mod chat;
pub mod serve;

use std::sync::Arc;
use switchboard_agents::{ChatPipeline, DomainPrototypes, DomainRouter};
use switchboard_config::AppConfig;
use switchboard_context::{InMemoryStore, NoopStore};
use switchboard_core::embedding::EmbeddingProvider;
use switchboard_core::llm::LlmClient;
use switchboard_core::store::ContextStore;
use switchboard_providers::OllamaClient;

/// Wire an in-process pipeline from config. Embeds the domain prototypes
/// up front, so this fails fast when Ollama is unreachable.
pub(crate) async fn build_pipeline(
    config: &AppConfig,
) -> Result<ChatPipeline, Box<dyn std::error::Error>> {
    let ollama = Arc::new(OllamaClient::new(
        &config.ollama.base_url,
        &config.ollama.embedding_model,
    ));
    let embedder: Arc<dyn EmbeddingProvider> = ollama.clone();
    let llm: Arc<dyn LlmClient> = ollama;

    let store: Arc<dyn ContextStore> = match config.context.backend.as_str() {
        "none" => Arc::new(NoopStore),
        _ => Arc::new(InMemoryStore::new(embedder.clone())),
    };

    let prototypes = Arc::new(DomainPrototypes::initialize(embedder.as_ref()).await?);
    let router = DomainRouter::new(embedder, prototypes);

    Ok(ChatPipeline::new(
        router,
        store,
        llm,
        &config.ollama.chat_model,
        config.context.max_results,
    ))
}
