//! Glean LLM Provider Layer
//!
//! Pluggable generation backends implementing the `LlmProvider` trait from
//! `glean-domain`.
//!
//! # Providers
//!
//! - `StubProvider`: Deterministic payload, no network access
//! - `OllamaProvider`: Local Ollama chat API integration
//! - `MockProvider`: Scripted responses and failures for testing
//!
//! The running service never names a concrete provider: it builds a
//! [`Backend`] once from [`GenerationConfig`] and hands that to the analyzer.
//!
//! # Examples
//!
//! ```
//! use glean_llm::MockProvider;
//! use glean_domain::traits::LlmProvider;
//!
//! # async fn example() {
//! let provider = MockProvider::new("{\"summary\": \"Hi.\"}");
//! let result = provider.generate("any text").await.unwrap();
//! assert_eq!(result, "{\"summary\": \"Hi.\"}");
//! # }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod ollama;
pub mod prompt;
pub mod stub;

use glean_domain::traits::LlmProvider;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

pub use config::{GenerationConfig, ProviderKind};
pub use ollama::OllamaProvider;
pub use stub::StubProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Request did not complete in time
    #[error("Request timed out")]
    Timeout,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Backend could not be constructed from its configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// The configured generation backend, resolved once at startup
#[derive(Debug, Clone)]
pub enum Backend {
    /// Deterministic stub
    Stub(StubProvider),
    /// Ollama chat API
    Ollama(OllamaProvider),
}

impl Backend {
    /// Build the backend selected by `config`
    pub fn from_config(config: &GenerationConfig) -> Result<Self, LlmError> {
        config.validate().map_err(LlmError::Config)?;

        let backend = match config.provider {
            ProviderKind::Stub => Backend::Stub(StubProvider::new()),
            ProviderKind::Ollama => {
                let provider =
                    OllamaProvider::with_timeout(&config.endpoint, &config.model, config.timeout())?
                        .with_temperature(config.temperature);
                info!("Ollama model {} at {}", provider.model(), provider.endpoint());
                Backend::Ollama(provider)
            }
        };

        info!("Generation backend: {}", backend.name());
        Ok(backend)
    }
}

impl LlmProvider for Backend {
    type Error = LlmError;

    fn name(&self) -> &str {
        match self {
            Backend::Stub(p) => p.name(),
            Backend::Ollama(p) => p.name(),
        }
    }

    async fn generate(&self, text: &str) -> Result<String, Self::Error> {
        match self {
            Backend::Stub(p) => p.generate(text).await,
            Backend::Ollama(p) => p.generate(text).await,
        }
    }
}

#[derive(Debug, Clone)]
enum Scripted {
    Reply(String),
    Fail(String),
}

/// Mock LLM provider for deterministic testing
///
/// Returns pre-configured responses keyed by the input text, without making
/// any network calls.
///
/// # Examples
///
/// ```
/// use glean_llm::MockProvider;
/// use glean_domain::traits::LlmProvider;
///
/// # async fn example() {
/// let mut provider = MockProvider::default();
/// provider.add_response("text one", "response1");
/// provider.add_error("text two", "backend down");
/// assert_eq!(provider.generate("text one").await.unwrap(), "response1");
/// assert!(provider.generate("text two").await.is_err());
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: Scripted,
    responses: HashMap<String, Scripted>,
    call_count: Arc<AtomicUsize>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all texts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: Scripted::Reply(response.into()),
            responses: HashMap::new(),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a MockProvider that fails for every text
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            default_response: Scripted::Fail(message.into()),
            ..Self::default()
        }
    }

    /// Add a specific response for a given text
    pub fn add_response(&mut self, text: impl Into<String>, response: impl Into<String>) {
        self.responses
            .insert(text.into(), Scripted::Reply(response.into()));
    }

    /// Configure to return an error for a specific text
    pub fn add_error(&mut self, text: impl Into<String>, message: impl Into<String>) {
        self.responses
            .insert(text.into(), Scripted::Fail(message.into()));
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProvider for MockProvider {
    type Error = LlmError;

    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, text: &str) -> Result<String, Self::Error> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        match self.responses.get(text).unwrap_or(&self.default_response) {
            Scripted::Reply(response) => Ok(response.clone()),
            Scripted::Fail(message) => Err(LlmError::Other(message.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_provider_specific_responses() {
        let mut provider = MockProvider::default();
        provider.add_response("hello", "world");
        provider.add_response("foo", "bar");

        assert_eq!(provider.generate("hello").await.unwrap(), "world");
        assert_eq!(provider.generate("foo").await.unwrap(), "bar");
        assert_eq!(provider.generate("unknown").await.unwrap(), "Default mock response");
    }

    #[tokio::test]
    async fn test_mock_provider_error() {
        let mut provider = MockProvider::default();
        provider.add_error("bad text", "boom");

        let result = provider.generate("bad text").await;
        assert!(matches!(result, Err(LlmError::Other(m)) if m == "boom"));
    }

    #[tokio::test]
    async fn test_failing_mock_fails_everything() {
        let provider = MockProvider::failing("down");
        assert!(provider.generate("a").await.is_err());
        assert!(provider.generate("b").await.is_err());
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn test_mock_provider_clone_shares_call_count() {
        let provider1 = MockProvider::new("test");
        let provider2 = provider1.clone();

        provider1.generate("test").await.unwrap();

        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }

    #[tokio::test]
    async fn test_backend_from_default_config_is_stub() {
        let backend = Backend::from_config(&GenerationConfig::default()).unwrap();
        assert_eq!(backend.name(), "stub");
        assert!(backend.generate("Some text.").await.unwrap().contains("\"summary\""));
    }

    #[test]
    fn test_backend_from_ollama_config() {
        let config = GenerationConfig {
            provider: ProviderKind::Ollama,
            ..GenerationConfig::default()
        };
        let backend = Backend::from_config(&config).unwrap();
        assert_eq!(backend.name(), "ollama");
    }

    #[test]
    fn test_backend_rejects_invalid_config() {
        let config = GenerationConfig {
            timeout_secs: 0,
            ..GenerationConfig::default()
        };
        assert!(matches!(Backend::from_config(&config), Err(LlmError::Config(_))));
    }
}
