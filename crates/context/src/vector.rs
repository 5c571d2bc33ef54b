//! Vector similarity utilities.
//!
//! Pure-Rust cosine similarity and similarity ranking over stored turns.

use switchboard_core::turn::ConversationTurn;

/// Compute cosine similarity between two vectors.
///
/// Returns a value in [-1, 1] where 1 = identical, 0 = orthogonal, -1 = opposite.
/// Returns 0.0 if either vector is zero-length or empty.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;

    for (x, y) in a.iter().zip(b.iter()) {
        let x = *x as f64;
        let y = *y as f64;
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < 1e-10 {
        return 0.0;
    }

    (dot / denom) as f32
}

/// Rank turns by cosine similarity to a query embedding.
///
/// Returns turns sorted by descending similarity, with `score` set to the
/// cosine similarity value, truncated to `limit`.
pub fn rank_by_similarity(
    turns: &[ConversationTurn],
    query_embedding: &[f32],
    limit: usize,
) -> Vec<ConversationTurn> {
    let mut scored: Vec<(f32, ConversationTurn)> = turns
        .iter()
        .map(|turn| {
            let sim = cosine_similarity(&turn.embedding, query_embedding);
            let mut t = turn.clone();
            t.score = sim;
            (sim, t)
        })
        .collect();

    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(limit);
    scored.into_iter().map(|(_, t)| t).collect()
}
