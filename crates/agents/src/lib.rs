//! Agent routing and prompt assembly for Switchboard.
//!
//! This crate is the heart of the pipeline: deciding which domain persona
//! answers a message, retrieving relevant prior turns, and assembling the
//! final prompt handed to the inference endpoint.

pub mod assembler;
pub mod persona;
pub mod pipeline;
pub mod router;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use assembler::{assemble, HISTORY_WINDOW, NO_CONTEXT_MARKER};
pub use persona::{persona_for, Persona};
pub use pipeline::{ChatPipeline, ChatReply};
pub use router::{DomainPrototypes, DomainRouter};
