//! Deterministic stub backend
//!
//! Produces a well-formed analysis payload without any network access, so the
//! service runs end to end when no model is available.

use crate::LlmError;
use glean_domain::traits::LlmProvider;
use serde_json::json;

/// Maximum characters of the stub summary
pub const STUB_SUMMARY_MAX_CHARS: usize = 200;

/// Fixed topics reported by the stub
pub const STUB_TOPICS: [&str; 3] = ["text", "analysis", "summary"];

/// No-op backend returning a fixed-shape JSON payload
#[derive(Debug, Clone, Default)]
pub struct StubProvider;

impl StubProvider {
    /// Create a stub provider
    pub fn new() -> Self {
        Self
    }

    /// Render the payload for `text`
    pub fn render(text: &str) -> String {
        json!({
            "title": null,
            "topics": STUB_TOPICS,
            "sentiment": "neutral",
            "summary": first_sentence(text),
        })
        .to_string()
    }
}

/// First sentence of the trimmed text, terminated with a period
fn first_sentence(text: &str) -> String {
    let trimmed = text.trim();
    let head = trimmed.split(". ").next().unwrap_or(trimmed);
    let mut sentence = head.to_string();
    if !sentence.ends_with('.') {
        sentence.push('.');
    }
    sentence.chars().take(STUB_SUMMARY_MAX_CHARS).collect()
}

impl LlmProvider for StubProvider {
    type Error = LlmError;

    fn name(&self) -> &str {
        "stub"
    }

    async fn generate(&self, text: &str) -> Result<String, Self::Error> {
        Ok(Self::render(text))
    }
}
