//! Shared test fakes for router and pipeline tests.

use async_trait::async_trait;
use std::sync::Mutex;
use switchboard_core::embedding::EmbeddingProvider;
use switchboard_core::error::{EmbeddingError, LlmError, StoreError};
use switchboard_core::llm::LlmClient;
use switchboard_core::store::ContextStore;
use switchboard_core::turn::{ConversationTurn, Role, SessionId};

/// Deterministic embedder that projects text onto four fixed axes by
/// keyword: concordia, AI, general chit-chat, and "other". The three
/// prototype descriptions land cleanly on the first three axes, so routing
/// outcomes are exactly predictable.
pub struct KeywordEmbedder;

#[async_trait]
impl EmbeddingProvider for KeywordEmbedder {
    fn name(&self) -> &str {
        "keyword-fake"
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let t = text.to_lowercase();
        let mut v = vec![0.0f32; 4];

        for kw in ["concordia", "admission", "co-op", "tuition"] {
            if t.contains(kw) {
                v[0] += 1.0;
            }
        }
        for kw in [
            "artificial intelligence",
            "machine learning",
            "neural",
            "deep learning",
            "computer vision",
        ] {
            if t.contains(kw) {
                v[1] += 1.0;
            }
        }
        for kw in ["general conversation", "greetings", "small talk"] {
            if t.contains(kw) {
                v[2] += 1.0;
            }
        }

        if v.iter().all(|&x| x == 0.0) {
            v[3] = 1.0;
        }
        Ok(v)
    }
}

/// In-memory fake store with switchable read/write failure, so pipeline
/// degradation paths are testable in isolation.
pub struct FakeStore {
    turns: Mutex<Vec<ConversationTurn>>,
    fail_reads: bool,
    fail_writes: bool,
}

impl FakeStore {
    pub fn new() -> Self {
        Self {
            turns: Mutex::new(Vec::new()),
            fail_reads: false,
            fail_writes: false,
        }
    }

    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn turns(&self) -> Vec<ConversationTurn> {
        self.turns.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContextStore for FakeStore {
    fn name(&self) -> &str {
        "fake"
    }

    async fn store(
        &self,
        session_id: &SessionId,
        text: &str,
        role: Role,
    ) -> Result<Option<String>, StoreError> {
        if self.fail_writes {
            return Err(StoreError::Storage("fake write failure".into()));
        }
        if !role.is_conversational() || text.trim().is_empty() {
            return Ok(None);
        }
        let turn = ConversationTurn::new(session_id.clone(), role, text, Vec::new());
        let id = turn.id.clone();
        self.turns.lock().unwrap().push(turn);
        Ok(Some(id))
    }

    async fn retrieve(
        &self,
        session_id: &SessionId,
        _query: &str,
        max_results: usize,
    ) -> Result<Vec<ConversationTurn>, StoreError> {
        if self.fail_reads {
            return Err(StoreError::Unreachable("fake backend down".into()));
        }
        let turns = self.turns.lock().unwrap();
        Ok(turns
            .iter()
            .filter(|t| &t.session_id == session_id)
            .take(max_results)
            .cloned()
            .collect())
    }

    async fn recent(
        &self,
        session_id: &SessionId,
        limit: usize,
    ) -> Result<Vec<ConversationTurn>, StoreError> {
        if self.fail_reads {
            return Err(StoreError::Unreachable("fake backend down".into()));
        }
        let turns = self.turns.lock().unwrap();
        let session_turns: Vec<_> = turns
            .iter()
            .filter(|t| &t.session_id == session_id)
            .cloned()
            .collect();
        let start = session_turns.len().saturating_sub(limit);
        Ok(session_turns[start..].to_vec())
    }

    async fn count(&self, session_id: &SessionId) -> Result<usize, StoreError> {
        let turns = self.turns.lock().unwrap();
        Ok(turns.iter().filter(|t| &t.session_id == session_id).count())
    }
}

/// LLM fake that records every prompt and returns a scripted response,
/// or fails when built with [`ScriptedLlm::failing`].
pub struct ScriptedLlm {
    response: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedLlm {
    pub fn new(response: &str) -> Self {
        Self {
            response: Some(response.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            response: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, prompt: &str, _model: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.response {
            Some(text) => Ok(text.clone()),
            None => Err(LlmError::Network("fake endpoint unreachable".into())),
        }
    }
}
