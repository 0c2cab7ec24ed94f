//! Backend selection and connection settings

use crate::ollama::{DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT_SECS};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which generation backend to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Deterministic stub, no network access
    #[default]
    #[serde(alias = "mock")]
    Stub,
    /// Local Ollama chat API
    Ollama,
}

impl ProviderKind {
    /// Parse a provider selector, ignoring case
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "stub" | "mock" => Some(ProviderKind::Stub),
            "ollama" => Some(ProviderKind::Ollama),
            _ => None,
        }
    }
}

/// Generation backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Backend selector
    pub provider: ProviderKind,

    /// Base URL of network backends
    pub endpoint: String,

    /// Model identifier for network backends
    pub model: String,

    /// Maximum time for a single generation call (seconds)
    pub timeout_secs: u64,

    /// Sampling temperature
    pub temperature: f32,
}

impl GenerationConfig {
    /// Get the generation timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        if self.provider == ProviderKind::Ollama {
            if self.endpoint.trim().is_empty() {
                return Err("endpoint is required for the ollama provider".to_string());
            }
            if self.model.trim().is_empty() {
                return Err("model is required for the ollama provider".to_string());
            }
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Stub,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}
