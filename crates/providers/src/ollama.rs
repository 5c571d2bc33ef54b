//! Ollama HTTP client — generation and embeddings against a local server.
//!
//! Generation uses `POST /api/generate` with `stream: true`: the server
//! sends newline-delimited JSON chunks (`{"response": "...", "done": false}`)
//! which are accumulated into one string. The pipeline never sees partial
//! output — the streaming is an implementation detail of this client.
//!
//! Embeddings use `POST /api/embeddings` with a single prompt per call.

use async_trait::async_trait;
use futures::StreamExt;
use serde::Deserialize;
use switchboard_core::embedding::EmbeddingProvider;
use switchboard_core::error::{EmbeddingError, LlmError};
use switchboard_core::llm::LlmClient;
use tracing::{debug, warn};

/// HTTP client for an Ollama server.
pub struct OllamaClient {
    base_url: String,
    embedding_model: String,
    client: reqwest::Client,
}

impl OllamaClient {
    /// Create a new client. `base_url` is the server root
    /// (e.g., `http://localhost:11434`).
    pub fn new(base_url: impl Into<String>, embedding_model: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .unwrap_or_default();

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            embedding_model: embedding_model.into(),
            client,
        }
    }
}

// ── Wire format ────────────────────────────────────────────────────────

/// One NDJSON chunk from `/api/generate`.
#[derive(Debug, Deserialize)]
struct GenerateChunk {
    #[serde(default)]
    response: String,
    #[serde(default)]
    done: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    #[serde(default)]
    embedding: Vec<f32>,
}

/// Parse one NDJSON line into a chunk. Blank lines yield `None`.
fn parse_generate_line(line: &str) -> Result<Option<GenerateChunk>, LlmError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let chunk: GenerateChunk = serde_json::from_str(line).map_err(|e| {
        LlmError::StreamInterrupted(format!("malformed chunk '{line}': {e}"))
    })?;
    if let Some(error) = chunk.error {
        return Err(LlmError::ApiError {
            status_code: 200,
            message: error,
        });
    }
    Ok(Some(chunk))
}

/// Consume complete lines from `buffer`, appending chunk text to `output`.
/// Returns `true` once a `done` chunk was seen.
fn drain_complete_lines(buffer: &mut String, output: &mut String) -> Result<bool, LlmError> {
    let mut done = false;
    while let Some(line_end) = buffer.find('\n') {
        let line = buffer[..line_end].trim_end_matches('\r').to_string();
        buffer.drain(..=line_end);

        if let Some(chunk) = parse_generate_line(&line)? {
            output.push_str(&chunk.response);
            done |= chunk.done;
        }
    }
    Ok(done)
}

// ── LlmClient ──────────────────────────────────────────────────────────

#[async_trait]
impl LlmClient for OllamaClient {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn generate(&self, prompt: &str, model: &str) -> Result<String, LlmError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = serde_json::json!({
            "model": model,
            "prompt": prompt,
            "stream": true,
        });

        debug!(model, prompt_len = prompt.len(), "Sending generation request");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout(e.to_string())
                } else {
                    LlmError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        if status == 404 {
            return Err(LlmError::ModelNotFound(model.to_string()));
        }
        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Ollama returned error");
            return Err(LlmError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        let mut byte_stream = response.bytes_stream();
        let mut buffer = String::new();
        let mut output = String::new();
        let mut done = false;

        while let Some(chunk_result) = byte_stream.next().await {
            let bytes = chunk_result.map_err(|e| LlmError::StreamInterrupted(e.to_string()))?;
            buffer.push_str(&String::from_utf8_lossy(&bytes));
            done |= drain_complete_lines(&mut buffer, &mut output)?;
        }

        // A final chunk without a trailing newline still counts.
        if !buffer.trim().is_empty() {
            if let Some(chunk) = parse_generate_line(&buffer)? {
                output.push_str(&chunk.response);
                done |= chunk.done;
            }
        }

        if !done {
            warn!(model, "Generation stream ended without a done chunk");
        }

        debug!(model, output_len = output.len(), "Generation complete");
        Ok(output)
    }

    async fn health_check(&self) -> Result<bool, LlmError> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| LlmError::Network(e.to_string()))?;
        Ok(response.status().is_success())
    }
}

// ── EmbeddingProvider ──────────────────────────────────────────────────

#[async_trait]
impl EmbeddingProvider for OllamaClient {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let url = format!("{}/api/embeddings", self.base_url);
        let body = serde_json::json!({
            "model": self.embedding_model,
            "prompt": text,
        });

        debug!(model = %self.embedding_model, text_len = text.len(), "Sending embedding request");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| EmbeddingError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if status == 404 {
            return Err(EmbeddingError::ModelNotFound(self.embedding_model.clone()));
        }
        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        let parsed: EmbeddingsResponse = response.json().await.map_err(|e| {
            EmbeddingError::InvalidResponse(format!("failed to parse embedding response: {e}"))
        })?;

        if parsed.embedding.is_empty() {
            return Err(EmbeddingError::InvalidResponse(
                "server returned an empty embedding".into(),
            ));
        }

        Ok(parsed.embedding)
    }
}
