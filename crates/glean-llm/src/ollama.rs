//! Ollama Provider Implementation
//!
//! Provides integration with Ollama's local chat API.
//!
//! # Features
//!
//! - Async HTTP communication with the `/api/chat` endpoint
//! - Configurable endpoint, model and sampling temperature
//! - Request timeout; a single failure is reported, never retried
//!
//! # Examples
//!
//! ```no_run
//! use glean_llm::OllamaProvider;
//!
//! let provider = OllamaProvider::new("http://localhost:11434", "llama3.1:8b").unwrap();
//! ```

use crate::prompt::{user_message, ANALYSIS_INSTRUCTIONS};
use crate::LlmError;
use glean_domain::traits::LlmProvider;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default model
pub const DEFAULT_MODEL: &str = "llama3.1:8b";

/// Default timeout for LLM requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Ollama chat API provider for local LLM inference
#[derive(Debug, Clone)]
pub struct OllamaProvider {
    endpoint: String,
    model: String,
    temperature: f32,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Serialize)]
struct ChatOptions {
    temperature: f32,
}

/// Request body for Ollama chat API
#[derive(Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
    options: ChatOptions,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Response from Ollama chat API
#[derive(Deserialize)]
struct OllamaChatResponse {
    message: ResponseMessage,
}

impl OllamaProvider {
    /// Create a new Ollama provider with the default timeout
    ///
    /// # Parameters
    ///
    /// - `endpoint`: Ollama API endpoint (e.g., "http://localhost:11434")
    /// - `model`: Model to use (e.g., "llama3.1:8b", "mistral")
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        Self::with_timeout(endpoint, model, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a new Ollama provider with an explicit request timeout
    pub fn with_timeout(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            temperature: DEFAULT_TEMPERATURE,
            client,
        })
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Configured model name
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Configured endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request_body<'a>(&'a self, text: &str) -> OllamaChatRequest<'a> {
        OllamaChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: ANALYSIS_INSTRUCTIONS.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user_message(text),
                },
            ],
            stream: false,
            options: ChatOptions {
                temperature: self.temperature,
            },
        }
    }

    /// Send one chat request
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Ollama is not running or the request times out
    /// - Model is not available
    /// - The response is not a chat completion
    async fn chat(&self, text: &str) -> Result<String, LlmError> {
        let url = format!("{}/api/chat", self.endpoint);
        debug!("Calling Ollama model '{}' at {}", self.model, url);

        let response = self
            .client
            .post(&url)
            .json(&self.request_body(text))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout
                } else {
                    LlmError::Communication(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LlmError::ModelNotAvailable(self.model.clone()));
        }
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::Communication(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let chat = response
            .json::<OllamaChatResponse>()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        Ok(chat.message.content)
    }
}

impl LlmProvider for OllamaProvider {
    type Error = LlmError;

    fn name(&self) -> &str {
        "ollama"
    }

    async fn generate(&self, text: &str) -> Result<String, Self::Error> {
        self.chat(text).await
    }
}
