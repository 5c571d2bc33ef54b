//! Error types for the Switchboard domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each collaborator boundary has its own error variant.

use thiserror::Error;

/// The top-level error type for all Switchboard operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Embedding errors (fatal for the request — no routing without one) ---
    #[error("Embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    // --- Context store errors (degraded or swallowed by the pipeline) ---
    #[error("Context store error: {0}")]
    Store(#[from] StoreError),

    // --- LLM errors (surfaced to the caller) ---
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Collaborator boundary errors ---

/// Failures computing an embedding. Without an embedding there is no
/// routing and no retrieval, so these abort the request.
#[derive(Debug, Clone, Error)]
pub enum EmbeddingError {
    #[error("Embedding request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Embedding model not found: {0}")]
    ModelNotFound(String),

    #[error("Malformed embedding response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    Network(String),
}

/// Failures reading or writing the context store. Retrieval failures
/// degrade to an empty context; persist failures are logged and swallowed.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Store backend unreachable: {0}")]
    Unreachable(String),
}

/// Failures generating a response from the inference endpoint.
#[derive(Debug, Clone, Error)]
pub enum LlmError {
    #[error("Generation request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Stream interrupted: {0}")]
    StreamInterrupted(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedding_error_displays_correctly() {
        let err = Error::Embedding(EmbeddingError::ApiError {
            status_code: 500,
            message: "model overloaded".into(),
        });
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("model overloaded"));
    }

    #[test]
    fn llm_error_displays_correctly() {
        let err = Error::Llm(LlmError::StreamInterrupted("connection reset".into()));
        assert!(err.to_string().contains("connection reset"));
    }

    #[test]
    fn store_error_converts_to_top_level() {
        let err: Error = StoreError::Unreachable("refused".into()).into();
        assert!(matches!(err, Error::Store(_)));
    }
}
