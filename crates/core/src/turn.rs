//! Conversation turn domain types.
//!
//! These are the value objects that flow through the pipeline:
//! a user message arrives → becomes a turn → is embedded and stored →
//! is retrieved later as context for follow-up messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier grouping turns into one conversation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    /// Mint a fresh session id for callers that didn't supply one.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from(s: &str) -> Self {
        Self(s.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The role of a turn's author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end user
    User,
    /// The AI assistant
    Assistant,
    /// Scaffolding authored by the system itself — never persisted as a turn
    System,
}

impl Role {
    /// Whether turns with this role belong in the conversation record.
    pub fn is_conversational(&self) -> bool {
        matches!(self, Role::User | Role::Assistant)
    }

    /// Label used when formatting history lines ("User:" / "Assistant:").
    pub fn history_label(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Assistant => "Assistant",
            Role::System => "System",
        }
    }
}

/// A single stored message within a session.
///
/// Turns are created once and never mutated; the embedding is computed from
/// `text` at insertion time and is immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// Unique id, derived from the session and creation timestamp
    pub id: String,

    /// Which conversation this turn belongs to
    pub session_id: SessionId,

    /// Who authored the turn
    pub role: Role,

    /// Raw message content (always non-empty once stored)
    pub text: String,

    /// Embedding of `text`, computed at insertion time
    #[serde(skip)]
    pub embedding: Vec<f32>,

    /// Creation time — used only to derive `id`, never for ranking
    pub created_at: DateTime<Utc>,

    /// Similarity score set by retrieval operations
    #[serde(default)]
    pub score: f32,
}

impl ConversationTurn {
    /// Create a new turn. The id follows the `{session}_{timestamp_nanos}`
    /// scheme so ids stay unique without coordination.
    pub fn new(session_id: SessionId, role: Role, text: impl Into<String>, embedding: Vec<f32>) -> Self {
        let created_at = Utc::now();
        let nanos = created_at.timestamp_nanos_opt().unwrap_or_default();
        Self {
            id: format!("{}_{}", session_id.0, nanos),
            session_id,
            role,
            text: text.into(),
            embedding,
            created_at,
            score: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_ids_are_unique() {
        assert_ne!(SessionId::new().0, SessionId::new().0);
    }

    #[test]
    fn role_conversational_check() {
        assert!(Role::User.is_conversational());
        assert!(Role::Assistant.is_conversational());
        assert!(!Role::System.is_conversational());
    }

    #[test]
    fn turn_id_embeds_session() {
        let turn = ConversationTurn::new(
            SessionId::from("sess-1"),
            Role::User,
            "hello",
            vec![0.1, 0.2],
        );
        assert!(turn.id.starts_with("sess-1_"));
        assert_eq!(turn.text, "hello");
    }

    #[test]
    fn turn_serialization_skips_embedding() {
        let turn = ConversationTurn::new(
            SessionId::from("s"),
            Role::Assistant,
            "an answer",
            vec![1.0; 384],
        );
        let json = serde_json::to_string(&turn).unwrap();
        assert!(json.contains("an answer"));
        assert!(!json.contains("embedding"));
    }
}
