//! # Switchboard Core
//!
//! Domain types, traits, and error definitions for the Switchboard chat
//! backend. This crate has **zero framework dependencies** — it defines the
//! domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every collaborator (embedding provider, context store, LLM client) is
//! defined as a trait here. Implementations live in their respective crates.
//! This enables:
//! - Swapping implementations via configuration
//! - Easy testing with deterministic fake implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod domain;
pub mod embedding;
pub mod error;
pub mod llm;
pub mod normalize;
pub mod store;
pub mod turn;

// Re-export key types at crate root for ergonomics
pub use domain::{Domain, DomainPrototype, DomainScore, RoutingDecision, GENERAL_BOOST, MIN_CONFIDENCE};
pub use embedding::EmbeddingProvider;
pub use error::{EmbeddingError, Error, LlmError, Result, StoreError};
pub use llm::LlmClient;
pub use normalize::strip_scaffolding;
pub use store::ContextStore;
pub use turn::{ConversationTurn, Role, SessionId};
