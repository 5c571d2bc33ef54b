//! Scaffolding normalization — one place, explicit rules.
//!
//! Messages sometimes arrive pre-formatted as prompts ("User: …" /
//! "Assistant:"). Routing and retrieval must operate on the semantic
//! content, not the scaffolding, so both strip it through this single
//! function. The rules only fire on markers at line starts; markers in the
//! middle of a sentence are left untouched.

/// Strip prompt scaffolding from a message.
///
/// Rules, applied in order:
/// 1. If any line starts with a user marker (`User:` or `You:`), keep only
///    the content after the **last** such marker — multi-turn scaffolding
///    resolves to the final user utterance.
/// 2. If the remainder contains a line starting with `Assistant:`, drop
///    that line and everything after it.
/// 3. Trim surrounding whitespace.
pub fn strip_scaffolding(text: &str) -> String {
    let mut content = text;

    if let Some(pos) = last_user_marker_end(content) {
        content = &content[pos..];
    }

    if let Some(pos) = first_assistant_marker(content) {
        content = &content[..pos];
    }

    content.trim().to_string()
}

/// Byte offset just past the last `User:` / `You:` marker found at a line
/// start, or `None` if no line carries one.
fn last_user_marker_end(text: &str) -> Option<usize> {
    const MARKERS: [&str; 2] = ["User:", "You:"];

    let mut best = None;
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        let stripped = line.trim_start();
        let indent = line.len() - stripped.len();
        for marker in MARKERS {
            if stripped.starts_with(marker) {
                best = Some(offset + indent + marker.len());
            }
        }
        offset += line.len();
    }
    best
}

/// Byte offset of the start of the first line beginning with `Assistant:`,
/// or `None`.
fn first_assistant_marker(text: &str) -> Option<usize> {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if line.trim_start().starts_with("Assistant:") {
            return Some(offset);
        }
        offset += line.len();
    }
    None
}
