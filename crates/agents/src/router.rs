//! Domain router — picks a persona by embedding similarity.
//!
//! Each routable domain has a fixed prototype description embedded once at
//! process start. Routing compares the incoming message's embedding against
//! every prototype, boosts the `general` score, and applies a confidence
//! floor so low-similarity messages always land on the fallback persona.
//!
//! Routing is stateless: the decision is a pure function of the message and
//! the prototype embeddings.

use std::sync::Arc;
use switchboard_context::cosine_similarity;
use switchboard_core::domain::{
    Domain, DomainPrototype, DomainScore, RoutingDecision, GENERAL_BOOST, MIN_CONFIDENCE,
};
use switchboard_core::embedding::EmbeddingProvider;
use switchboard_core::error::EmbeddingError;
use switchboard_core::normalize::strip_scaffolding;
use tracing::{debug, info};

/// The fixed prototype set, embedded once and shared read-only across all
/// concurrent requests.
pub struct DomainPrototypes {
    prototypes: Vec<DomainPrototype>,
}

impl DomainPrototypes {
    /// Embed every domain description. Called once at process start; an
    /// embedding failure here means the service cannot route at all.
    pub async fn initialize(embedder: &dyn EmbeddingProvider) -> Result<Self, EmbeddingError> {
        let mut prototypes = Vec::with_capacity(Domain::ALL.len());
        for domain in Domain::ALL {
            let description = domain.prototype_description();
            let embedding = embedder.embed(description).await?;
            debug!(%domain, dims = embedding.len(), "Embedded domain prototype");
            prototypes.push(DomainPrototype {
                domain,
                description,
                embedding,
            });
        }
        info!(count = prototypes.len(), "Domain prototypes initialized");
        Ok(Self { prototypes })
    }

    /// Build from precomputed prototypes (deterministic setups, tests).
    pub fn from_prototypes(prototypes: Vec<DomainPrototype>) -> Self {
        Self { prototypes }
    }

    pub fn iter(&self) -> impl Iterator<Item = &DomainPrototype> {
        self.prototypes.iter()
    }
}

/// Routes an incoming message to one of the fixed domains.
pub struct DomainRouter {
    embedder: Arc<dyn EmbeddingProvider>,
    prototypes: Arc<DomainPrototypes>,
}

impl DomainRouter {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, prototypes: Arc<DomainPrototypes>) -> Self {
        Self { embedder, prototypes }
    }

    /// Route a message. The message is normalized first so routing sees the
    /// semantic content, not prompt scaffolding.
    ///
    /// An embedding failure is fatal for the request — there is no
    /// fallback routing without an embedding.
    pub async fn route(&self, message: &str) -> Result<RoutingDecision, EmbeddingError> {
        let content = strip_scaffolding(message);
        let embedding = self.embedder.embed(&content).await?;
        let decision = self.decide(&embedding);
        debug!(
            selected = %decision.selected,
            winning_score = decision.winning_score(),
            low_confidence = decision.low_confidence,
            "Routed message"
        );
        Ok(decision)
    }

    /// The scoring policy, separated from I/O so it is trivially testable:
    /// cosine per prototype → general boost → max → confidence floor.
    pub fn decide(&self, message_embedding: &[f32]) -> RoutingDecision {
        let scores: Vec<DomainScore> = self
            .prototypes
            .iter()
            .map(|proto| {
                let raw = cosine_similarity(&proto.embedding, message_embedding);
                let weighted = if proto.domain == Domain::General {
                    raw * GENERAL_BOOST
                } else {
                    raw
                };
                DomainScore {
                    domain: proto.domain,
                    raw,
                    weighted,
                }
            })
            .collect();

        // Ties break toward the earliest prototype in declaration order.
        let mut winner = scores[0];
        for score in &scores[1..] {
            if score.weighted > winner.weighted {
                winner = *score;
            }
        }

        let low_confidence = winner.weighted < MIN_CONFIDENCE;
        let selected = if low_confidence {
            Domain::General
        } else {
            winner.domain
        };

        RoutingDecision {
            scores,
            selected,
            low_confidence,
        }
    }
}
