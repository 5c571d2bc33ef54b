//! The chat pipeline — route, retrieve, assemble, generate, persist.
//!
//! Each request runs these steps strictly in sequence on the task that
//! received it; the steps depend on each other's output, so there is no
//! intra-request parallelism. Failure policy per step:
//!
//! - routing (embedding) failure is fatal for the request
//! - retrieval/history failure degrades to an empty context
//! - generation failure is surfaced to the caller
//! - persist failure is logged and swallowed — the user already has
//!   their answer

use crate::assembler::{assemble, HISTORY_WINDOW};
use crate::router::DomainRouter;
use std::sync::Arc;
use switchboard_core::domain::Domain;
use switchboard_core::error::Result;
use switchboard_core::llm::LlmClient;
use switchboard_core::store::ContextStore;
use switchboard_core::turn::{Role, SessionId};
use tracing::{debug, info, warn};

/// The response to one chat message.
#[derive(Debug, Clone)]
pub struct ChatReply {
    /// The generated response text
    pub text: String,
    /// Which persona answered
    pub domain: Domain,
}

/// Orchestrates one chat request end-to-end.
pub struct ChatPipeline {
    router: DomainRouter,
    store: Arc<dyn ContextStore>,
    llm: Arc<dyn LlmClient>,
    chat_model: String,
    max_context_results: usize,
}

impl ChatPipeline {
    pub fn new(
        router: DomainRouter,
        store: Arc<dyn ContextStore>,
        llm: Arc<dyn LlmClient>,
        chat_model: impl Into<String>,
        max_context_results: usize,
    ) -> Self {
        Self {
            router,
            store,
            llm,
            chat_model: chat_model.into(),
            max_context_results,
        }
    }

    /// Process one user message within a session.
    pub async fn handle(&self, session_id: &SessionId, message: &str) -> Result<ChatReply> {
        // 1. Route. No fallback without an embedding — this aborts.
        let decision = self.router.route(message).await?;
        let domain = decision.selected;
        info!(session = %session_id, %domain, "Message routed");

        // 2. Retrieve similar prior turns; a broken store degrades to
        //    an empty context rather than failing the request.
        let context = match self
            .store
            .retrieve(session_id, message, self.max_context_results)
            .await
        {
            Ok(turns) => turns.into_iter().map(|t| t.text).collect::<Vec<_>>(),
            Err(e) => {
                warn!(session = %session_id, error = %e, "Context retrieval failed, continuing without context");
                Vec::new()
            }
        };

        // 3. Recent history for the conversation block, same degradation.
        let history = match self.store.recent(session_id, HISTORY_WINDOW).await {
            Ok(turns) => turns
                .into_iter()
                .map(|t| (t.role, t.text))
                .collect::<Vec<_>>(),
            Err(e) => {
                warn!(session = %session_id, error = %e, "History lookup failed, continuing without history");
                Vec::new()
            }
        };

        // 4. Assemble the prompt.
        let prompt = assemble(domain, message, &context, &history);
        debug!(
            session = %session_id,
            prompt_len = prompt.len(),
            context_turns = context.len(),
            history_turns = history.len(),
            "Prompt assembled"
        );

        // 5. Generate. Failures surface to the caller.
        let text = self.llm.generate(&prompt, &self.chat_model).await?;

        // 6. Persist both sides of the exchange. The response is already
        //    in hand, so a write failure must not fail the request.
        if let Err(e) = self.store.store(session_id, message, Role::User).await {
            warn!(session = %session_id, error = %e, "Failed to persist user turn");
        }
        if let Err(e) = self.store.store(session_id, &text, Role::Assistant).await {
            warn!(session = %session_id, error = %e, "Failed to persist assistant turn");
        }

        Ok(ChatReply { text, domain })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::DomainPrototypes;
    use crate::test_helpers::{FakeStore, KeywordEmbedder, ScriptedLlm};
    use switchboard_core::error::Error;

    async fn pipeline_with(store: Arc<FakeStore>, llm: Arc<ScriptedLlm>) -> ChatPipeline {
        let embedder = Arc::new(KeywordEmbedder);
        let prototypes = Arc::new(
            DomainPrototypes::initialize(embedder.as_ref())
                .await
                .unwrap(),
        );
        let router = DomainRouter::new(embedder, prototypes);
        ChatPipeline::new(router, store, llm, "test-model", 3)
    }

    #[tokio::test]
    async fn happy_path_persists_both_turns() {
        let store = Arc::new(FakeStore::new());
        let llm = Arc::new(ScriptedLlm::new("Admissions require a strong GPA."));
        let pipeline = pipeline_with(store.clone(), llm.clone()).await;

        let session = SessionId::from("s1");
        let reply = pipeline
            .handle(&session, "What are the admission requirements for Concordia?")
            .await
            .unwrap();

        assert_eq!(reply.text, "Admissions require a strong GPA.");
        assert_eq!(reply.domain, Domain::Concordia);

        let turns = store.turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, Role::User);
        assert_eq!(turns[1].role, Role::Assistant);
        assert_eq!(turns[1].text, "Admissions require a strong GPA.");
    }

    #[tokio::test]
    async fn greeting_is_answered_by_general_persona() {
        let store = Arc::new(FakeStore::new());
        let llm = Arc::new(ScriptedLlm::new("Hi there!"));
        let pipeline = pipeline_with(store, llm.clone()).await;

        let reply = pipeline
            .handle(&SessionId::from("s1"), "hello, how are you?")
            .await
            .unwrap();
        assert_eq!(reply.domain, Domain::General);

        let prompt = llm.last_prompt().unwrap();
        assert!(prompt.starts_with("You are a helpful AI assistant"));
    }

    #[tokio::test]
    async fn empty_session_prompt_carries_no_context_marker() {
        let store = Arc::new(FakeStore::new());
        let llm = Arc::new(ScriptedLlm::new("answer"));
        let pipeline = pipeline_with(store, llm.clone()).await;

        pipeline
            .handle(&SessionId::from("fresh"), "hello, how are you?")
            .await
            .unwrap();

        let prompt = llm.last_prompt().unwrap();
        assert!(prompt.contains(crate::assembler::NO_CONTEXT_MARKER));
    }

    #[tokio::test]
    async fn retrieval_failure_degrades_to_empty_context() {
        let store = Arc::new(FakeStore::new().failing_reads());
        let llm = Arc::new(ScriptedLlm::new("still answered"));
        let pipeline = pipeline_with(store, llm.clone()).await;

        let reply = pipeline
            .handle(&SessionId::from("s1"), "hello, how are you?")
            .await
            .unwrap();
        assert_eq!(reply.text, "still answered");

        let prompt = llm.last_prompt().unwrap();
        assert!(prompt.contains(crate::assembler::NO_CONTEXT_MARKER));
    }

    #[tokio::test]
    async fn persist_failure_is_swallowed() {
        let store = Arc::new(FakeStore::new().failing_writes());
        let llm = Arc::new(ScriptedLlm::new("answered anyway"));
        let pipeline = pipeline_with(store.clone(), llm).await;

        let reply = pipeline
            .handle(&SessionId::from("s1"), "hello, how are you?")
            .await
            .unwrap();
        assert_eq!(reply.text, "answered anyway");
        assert!(store.turns().is_empty());
    }

    #[tokio::test]
    async fn generation_failure_surfaces() {
        let store = Arc::new(FakeStore::new());
        let llm = Arc::new(ScriptedLlm::failing());
        let pipeline = pipeline_with(store.clone(), llm).await;

        let err = pipeline
            .handle(&SessionId::from("s1"), "hello, how are you?")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Llm(_)));
        // Nothing persisted when generation fails.
        assert!(store.turns().is_empty());
    }

    #[tokio::test]
    async fn second_turn_sees_history_of_first() {
        let store = Arc::new(FakeStore::new());
        let llm = Arc::new(ScriptedLlm::new("scripted"));
        let pipeline = pipeline_with(store, llm.clone()).await;

        let session = SessionId::from("s1");
        pipeline
            .handle(&session, "tell me about machine learning")
            .await
            .unwrap();
        pipeline.handle(&session, "and deep learning?").await.unwrap();

        let prompt = llm.last_prompt().unwrap();
        assert!(prompt.contains("Conversation history:"));
        assert!(prompt.contains("User: tell me about machine learning"));
        assert!(prompt.contains("Assistant: scripted"));
    }
}
