//! HTTP API gateway for Switchboard.
//!
//! Exposes the chat endpoint and a health check. Built on Axum.
//!
//! `POST /chat` takes `{message, session_id?}`; when the session id is
//! omitted a fresh one is minted and returned so the caller can continue
//! the conversation on subsequent requests.

use axum::extract::DefaultBodyLimit;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use switchboard_agents::{ChatPipeline, DomainPrototypes, DomainRouter};
use switchboard_context::{InMemoryStore, NoopStore};
use switchboard_core::embedding::EmbeddingProvider;
use switchboard_core::llm::LlmClient;
use switchboard_core::store::ContextStore;
use switchboard_core::turn::SessionId;
use switchboard_providers::OllamaClient;
use tracing::{error, info};

/// Shared application state for the gateway.
pub struct GatewayState {
    pub pipeline: ChatPipeline,
}

type SharedState = Arc<GatewayState>;

/// Build the Axum router with all gateway routes.
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/chat", post(chat_handler))
        .layer(DefaultBodyLimit::max(64 * 1024))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the gateway HTTP server.
///
/// Builds the Ollama client, embeds the domain prototypes once, wires the
/// store and pipeline, then serves until shutdown.
pub async fn start(config: switchboard_config::AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);

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
    let pipeline = ChatPipeline::new(
        router,
        store,
        llm,
        &config.ollama.chat_model,
        config.context.max_results,
    );

    let state = Arc::new(GatewayState { pipeline });
    let app = build_router(state);

    info!(addr = %addr, "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// --- Handlers ---

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Deserialize)]
struct ChatRequest {
    message: String,
    #[serde(default)]
    session_id: Option<String>,
}

#[derive(Serialize)]
struct ChatResponse {
    message: String,
    session_id: String,
}

async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, StatusCode> {
    if payload.message.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    // A missing session id starts a new conversation; the minted id is
    // returned so the caller can keep the thread going.
    let session_id = match payload.session_id.filter(|s| !s.trim().is_empty()) {
        Some(s) => SessionId::from(&s),
        None => SessionId::new(),
    };

    match state.pipeline.handle(&session_id, &payload.message).await {
        Ok(reply) => Ok(Json(ChatResponse {
            message: reply.text,
            session_id: session_id.0,
        })),
        Err(e) => {
            error!(session = %session_id, error = %e, "Chat request failed");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use switchboard_core::error::{EmbeddingError, LlmError};
    use tower::ServiceExt;

    /// Embedder mapping every text to the same vector: all prototypes tie
    /// at similarity 1.0, so routing deterministically picks the first
    /// domain and never trips the confidence floor.
    struct ConstEmbedder;

    #[async_trait]
    impl EmbeddingProvider for ConstEmbedder {
        fn name(&self) -> &str {
            "const"
        }

        async fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
            Ok(vec![1.0, 0.0])
        }
    }

    struct EchoLlm;

    #[async_trait]
    impl LlmClient for EchoLlm {
        fn name(&self) -> &str {
            "echo"
        }

        async fn generate(&self, _prompt: &str, _model: &str) -> Result<String, LlmError> {
            Ok("echoed response".into())
        }
    }

    async fn test_state() -> SharedState {
        let embedder: Arc<dyn EmbeddingProvider> = Arc::new(ConstEmbedder);
        let prototypes = Arc::new(
            DomainPrototypes::initialize(embedder.as_ref())
                .await
                .unwrap(),
        );
        let router = DomainRouter::new(embedder.clone(), prototypes);
        let store: Arc<dyn ContextStore> = Arc::new(InMemoryStore::new(embedder));
        let pipeline = ChatPipeline::new(router, store, Arc::new(EchoLlm), "test-model", 3);
        Arc::new(GatewayState { pipeline })
    }

    #[tokio::test]
    async fn health_endpoint() {
        let app = build_router(test_state().await);

        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn chat_mints_session_id_when_omitted() {
        let app = build_router(test_state().await);

        let req = Request::builder()
            .method("POST")
            .uri("/chat")
            .header("Content-Type", "application/json")
            .body(Body::from(r#"{"message": "hello"}"#))
            .unwrap();

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed["message"], "echoed response");
        assert!(!parsed["session_id"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn chat_echoes_provided_session_id() {
        let app = build_router(test_state().await);

        let req = Request::builder()
            .method("POST")
            .uri("/chat")
            .header("Content-Type", "application/json")
            .body(Body::from(r#"{"message": "hello", "session_id": "my-session"}"#))
            .unwrap();

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed["session_id"], "my-session");
    }

    #[tokio::test]
    async fn empty_message_rejected() {
        let app = build_router(test_state().await);

        let req = Request::builder()
            .method("POST")
            .uri("/chat")
            .header("Content-Type", "application/json")
            .body(Body::from(r#"{"message": "   "}"#))
            .unwrap();

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
