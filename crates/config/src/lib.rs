//! Configuration loading, validation, and management for Switchboard.
//!
//! Loads configuration from `~/.switchboard/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// The root configuration structure.
///
/// Maps directly to `~/.switchboard/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Ollama inference endpoint configuration
    #[serde(default)]
    pub ollama: OllamaConfig,

    /// Context store configuration
    #[serde(default)]
    pub context: ContextConfig,

    /// HTTP gateway configuration
    #[serde(default)]
    pub gateway: GatewayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Base URL of the Ollama server
    #[serde(default = "default_ollama_url")]
    pub base_url: String,

    /// Model used for chat generation
    #[serde(default = "default_chat_model")]
    pub chat_model: String,

    /// Model used for embeddings (prototypes, messages, queries)
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: default_ollama_url(),
            chat_model: default_chat_model(),
            embedding_model: default_embedding_model(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Which store backend to use: "memory" or "none"
    #[serde(default = "default_context_backend")]
    pub backend: String,

    /// How many similar turns to retrieve per request
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            backend: default_context_backend(),
            max_results: default_max_results(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_ollama_url() -> String {
    "http://localhost:11434".into()
}
fn default_chat_model() -> String {
    "llama3.2".into()
}
fn default_embedding_model() -> String {
    "nomic-embed-text".into()
}
fn default_context_backend() -> String {
    "memory".into()
}
fn default_max_results() -> usize {
    3
}
fn default_host() -> String {
    "127.0.0.1".into()
}
fn default_port() -> u16 {
    8000
}

impl AppConfig {
    /// The config directory: `~/.switchboard`.
    pub fn config_dir() -> PathBuf {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".switchboard")
    }

    /// Load config from the default location, falling back to defaults when
    /// no file exists, then apply environment overrides and validate.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_dir().join("config.toml");
        let mut config = if path.exists() {
            Self::load_from(&path)?
        } else {
            debug!(path = %path.display(), "No config file found, using defaults");
            Self::default()
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load config from an explicit path (no env overrides applied).
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&raw)?)
    }

    /// Environment variables take precedence over the file.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("SWITCHBOARD_OLLAMA_URL").or_else(|_| std::env::var("OLLAMA_URL")) {
            self.ollama.base_url = url;
        }
        if let Ok(model) = std::env::var("SWITCHBOARD_CHAT_MODEL") {
            self.ollama.chat_model = model;
        }
        if let Ok(model) = std::env::var("SWITCHBOARD_EMBEDDING_MODEL") {
            self.ollama.embedding_model = model;
        }
        if let Ok(port) = std::env::var("SWITCHBOARD_PORT") {
            if let Ok(port) = port.parse() {
                self.gateway.port = port;
            }
        }
    }

    /// Validate settings that would otherwise fail confusingly at runtime.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.ollama.base_url.starts_with("http://") && !self.ollama.base_url.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "ollama.base_url must be an http(s) URL, got '{}'",
                self.ollama.base_url
            )));
        }
        if self.ollama.chat_model.is_empty() {
            return Err(ConfigError::Invalid("ollama.chat_model must not be empty".into()));
        }
        if self.ollama.embedding_model.is_empty() {
            return Err(ConfigError::Invalid("ollama.embedding_model must not be empty".into()));
        }
        match self.context.backend.as_str() {
            "memory" | "none" => {}
            other => {
                return Err(ConfigError::Invalid(format!(
                    "context.backend must be 'memory' or 'none', got '{other}'"
                )));
            }
        }
        if self.context.max_results == 0 {
            return Err(ConfigError::Invalid("context.max_results must be at least 1".into()));
        }
        Ok(())
    }
}
