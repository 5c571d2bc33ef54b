//! No-op context store — disables conversational context entirely.

use async_trait::async_trait;
use switchboard_core::error::StoreError;
use switchboard_core::store::ContextStore;
use switchboard_core::turn::{ConversationTurn, Role, SessionId};

/// A no-op store that persists nothing and retrieves nothing.
pub struct NoopStore;

#[async_trait]
impl ContextStore for NoopStore {
    fn name(&self) -> &str {
        "none"
    }

    async fn store(
        &self,
        _session_id: &SessionId,
        _text: &str,
        _role: Role,
    ) -> Result<Option<String>, StoreError> {
        Ok(None)
    }

    async fn retrieve(
        &self,
        _session_id: &SessionId,
        _query: &str,
        _max_results: usize,
    ) -> Result<Vec<ConversationTurn>, StoreError> {
        Ok(Vec::new())
    }

    async fn recent(
        &self,
        _session_id: &SessionId,
        _limit: usize,
    ) -> Result<Vec<ConversationTurn>, StoreError> {
        Ok(Vec::new())
    }

    async fn count(&self, _session_id: &SessionId) -> Result<usize, StoreError> {
        Ok(0)
    }
}
