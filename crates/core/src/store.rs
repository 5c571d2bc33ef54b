//! ContextStore trait — session-partitioned conversation memory.
//!
//! The store owns every `ConversationTurn` and the embedding computation
//! for them: callers hand over raw text, the store embeds and appends.
//! Retrieval is scoped strictly to one session and ranked purely by
//! embedding similarity — never by recency.

use crate::error::StoreError;
use crate::turn::{ConversationTurn, Role, SessionId};
use async_trait::async_trait;

/// Session-keyed conversation storage with similarity-based retrieval.
///
/// Implementations must support concurrent reads and appends; the
/// append-only, never-mutated turn model makes that cheap.
#[async_trait]
pub trait ContextStore: Send + Sync {
    /// The backend name (e.g., "memory", "none").
    fn name(&self) -> &str;

    /// Embed `text` and append a turn under `session_id`.
    ///
    /// Returns the new turn id, or `None` when the input was dropped:
    /// empty/whitespace-only text and non-conversational roles are silently
    /// ignored rather than persisted.
    async fn store(
        &self,
        session_id: &SessionId,
        text: &str,
        role: Role,
    ) -> std::result::Result<Option<String>, StoreError>;

    /// Return up to `max_results` stored turns for `session_id`, ranked by
    /// embedding similarity to `query` (nearest first).
    ///
    /// The query is normalized (scaffolding stripped) before embedding.
    /// A session with no turns is not an error — it yields an empty vec.
    async fn retrieve(
        &self,
        session_id: &SessionId,
        query: &str,
        max_results: usize,
    ) -> std::result::Result<Vec<ConversationTurn>, StoreError>;

    /// Return up to `limit` of the most recent turns for `session_id`, in
    /// insertion order (oldest of the window first). Feeds the history
    /// block of the assembled prompt.
    async fn recent(
        &self,
        session_id: &SessionId,
        limit: usize,
    ) -> std::result::Result<Vec<ConversationTurn>, StoreError>;

    /// Number of turns stored for `session_id`.
    async fn count(&self, session_id: &SessionId) -> std::result::Result<usize, StoreError>;
}
