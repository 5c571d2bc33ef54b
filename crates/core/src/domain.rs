//! Domain labels, prototypes, and routing decisions.
//!
//! The routable domain set is closed: adding a domain is a compile-time
//! change (new enum variant, new prototype description), not a data change.

use serde::{Deserialize, Serialize};

/// Multiplicative boost applied to the `general` similarity score.
///
/// Biases routing toward the fallback persona so the specialized ones only
/// win when the message is clearly in their territory.
pub const GENERAL_BOOST: f32 = 1.5;

/// Minimum weighted score a winning domain needs. Below this the selection
/// is overridden to `general` regardless of which label nominally won.
pub const MIN_CONFIDENCE: f32 = 0.4;

/// One routable persona/topic. Closed, fixed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    /// Concordia University Computer Science admissions
    Concordia,
    /// Artificial intelligence and machine learning
    Ai,
    /// Everything else — the fallback persona
    General,
}

impl Domain {
    /// All domains, in fixed declaration order. Routing tie-breaks follow
    /// this order, which keeps the router deterministic.
    pub const ALL: [Domain; 3] = [Domain::Concordia, Domain::Ai, Domain::General];

    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Concordia => "concordia",
            Domain::Ai => "ai",
            Domain::General => "general",
        }
    }

    /// Static natural-language description of the domain, embedded once at
    /// process start to form the prototype vector.
    pub fn prototype_description(&self) -> &'static str {
        match self {
            Domain::Concordia => {
                "Questions about Concordia University Computer Science admissions: \
                 application requirements, admission criteria, GPA cutoffs, prerequisites, \
                 program structure, co-op opportunities, tuition, deadlines, and transfer credits."
            }
            Domain::Ai => {
                "Questions about artificial intelligence and machine learning: neural networks, \
                 deep learning, natural language processing, computer vision, reinforcement \
                 learning, AI research, model training, and practical AI applications."
            }
            Domain::General => {
                "General conversation and everyday questions on any topic: greetings, \
                 small talk, facts, advice, and requests for help that fit no specialty."
            }
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A domain's reference description and its precomputed embedding.
///
/// Prototypes are process-wide, read-only, and initialized once — shared
/// across all concurrent requests without locking.
#[derive(Debug, Clone)]
pub struct DomainPrototype {
    pub domain: Domain,
    pub description: &'static str,
    pub embedding: Vec<f32>,
}

/// Raw and weighted similarity for one domain.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DomainScore {
    pub domain: Domain,
    /// Cosine similarity in [-1, 1]
    pub raw: f32,
    /// `raw`, with the general boost applied for `Domain::General`
    pub weighted: f32,
}

/// The outcome of routing one message.
///
/// Invariant: `selected` is always one of the three fixed labels, and the
/// decision is a pure function of the message and the prototype embeddings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingDecision {
    /// Per-domain scores in `Domain::ALL` order
    pub scores: Vec<DomainScore>,
    /// The winning domain after boost and confidence floor
    pub selected: Domain,
    /// Whether the confidence floor forced the selection to `general`
    pub low_confidence: bool,
}

impl RoutingDecision {
    /// The weighted score of the nominally winning domain (before any
    /// low-confidence override).
    pub fn winning_score(&self) -> f32 {
        self.scores
            .iter()
            .map(|s| s.weighted)
            .fold(f32::NEG_INFINITY, f32::max)
    }
}
