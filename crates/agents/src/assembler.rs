//! Prompt assembly — persona, context, history, and the message trailer.
//!
//! Assembly is deterministic: identical inputs always produce identical
//! prompts. No random or time-dependent logic is used.
//!
//! Layout, top to bottom:
//! 1. Persona preamble (always present)
//! 2. Domain background text (internal use, only some personas)
//! 3. Retrieved context block (or an explicit no-context marker)
//! 4. Conversation history, most recent last, capped at [`HISTORY_WINDOW`]
//! 5. `User: {message}\nAssistant:` trailer

use crate::persona::persona_for;
use switchboard_core::domain::Domain;
use switchboard_core::turn::Role;

/// Maximum history entries included in a prompt. Bounds prompt size no
/// matter how long the session runs.
pub const HISTORY_WINDOW: usize = 6;

/// Emitted in place of the context block when retrieval found nothing.
pub const NO_CONTEXT_MARKER: &str = "No relevant context for this conversation.";

/// Assemble the final prompt for the inference endpoint.
///
/// `retrieved_context` is similarity-ordered turn texts; `history` is
/// insertion-ordered (role, text) pairs, of which only the last
/// [`HISTORY_WINDOW`] survive.
pub fn assemble(
    domain: Domain,
    message: &str,
    retrieved_context: &[String],
    history: &[(Role, String)],
) -> String {
    let persona = persona_for(domain);
    let mut prompt = String::new();

    prompt.push_str(persona.preamble);
    prompt.push_str("\n\n");

    if let Some(background) = persona.background {
        prompt.push_str("Background Information (for internal use):\n");
        prompt.push_str(background);
        prompt.push_str("\n\n");
    }

    prompt.push_str("Context information:\n");
    if retrieved_context.is_empty() {
        prompt.push_str(NO_CONTEXT_MARKER);
        prompt.push('\n');
    } else {
        for text in retrieved_context {
            prompt.push_str(text);
            prompt.push('\n');
        }
    }
    prompt.push('\n');

    let start = history.len().saturating_sub(HISTORY_WINDOW);
    let window = &history[start..];
    if !window.is_empty() {
        prompt.push_str("Conversation history:\n");
        for (role, text) in window {
            prompt.push_str(role.history_label());
            prompt.push_str(": ");
            prompt.push_str(text);
            prompt.push('\n');
        }
        prompt.push('\n');
    }

    prompt.push_str("User: ");
    prompt.push_str(message);
    prompt.push_str("\nAssistant:");

    prompt
}
