//! In-memory context store — session-partitioned, append-only.
//!
//! Turns are never mutated or deleted, so concurrent readers and appenders
//! only contend on the short map lock. The embedder is injected rather than
//! global, so tests run against isolated fakes.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use switchboard_core::embedding::EmbeddingProvider;
use switchboard_core::error::StoreError;
use switchboard_core::normalize::strip_scaffolding;
use switchboard_core::store::ContextStore;
use switchboard_core::turn::{ConversationTurn, Role, SessionId};
use tokio::sync::RwLock;
use tracing::debug;

use crate::vector::rank_by_similarity;

/// An in-memory store keeping turns in per-session Vecs.
pub struct InMemoryStore {
    embedder: Arc<dyn EmbeddingProvider>,
    sessions: RwLock<HashMap<SessionId, Vec<ConversationTurn>>>,
}

impl InMemoryStore {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            embedder,
            sessions: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl ContextStore for InMemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn store(
        &self,
        session_id: &SessionId,
        text: &str,
        role: Role,
    ) -> Result<Option<String>, StoreError> {
        if !role.is_conversational() {
            debug!(session = %session_id, ?role, "Dropping non-conversational turn");
            return Ok(None);
        }
        if text.trim().is_empty() {
            debug!(session = %session_id, "Dropping empty turn");
            return Ok(None);
        }

        let embedding = self
            .embedder
            .embed(text)
            .await
            .map_err(|e| StoreError::Storage(e.to_string()))?;

        let turn = ConversationTurn::new(session_id.clone(), role, text, embedding);
        let id = turn.id.clone();

        let mut sessions = self.sessions.write().await;
        sessions.entry(session_id.clone()).or_default().push(turn);

        Ok(Some(id))
    }

    async fn retrieve(
        &self,
        session_id: &SessionId,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<ConversationTurn>, StoreError> {
        let query = strip_scaffolding(query);
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let query_embedding = self
            .embedder
            .embed(&query)
            .await
            .map_err(|e| StoreError::QueryFailed(e.to_string()))?;

        let sessions = self.sessions.read().await;
        let Some(turns) = sessions.get(session_id) else {
            return Ok(Vec::new());
        };

        Ok(rank_by_similarity(turns, &query_embedding, max_results))
    }

    async fn recent(
        &self,
        session_id: &SessionId,
        limit: usize,
    ) -> Result<Vec<ConversationTurn>, StoreError> {
        let sessions = self.sessions.read().await;
        let Some(turns) = sessions.get(session_id) else {
            return Ok(Vec::new());
        };

        let start = turns.len().saturating_sub(limit);
        Ok(turns[start..].to_vec())
    }

    async fn count(&self, session_id: &SessionId) -> Result<usize, StoreError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(session_id).map_or(0, Vec::len))
    }
}
