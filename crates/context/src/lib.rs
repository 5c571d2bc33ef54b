//! Context store implementations for Switchboard.

pub mod in_memory;
pub mod noop;
pub mod vector;

pub use in_memory::InMemoryStore;
pub use noop::NoopStore;
pub use vector::{cosine_similarity, rank_by_similarity};
