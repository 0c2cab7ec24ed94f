//! Error types for the analyzer

use thiserror::Error;

/// Errors surfaced to callers of the analyzer
///
/// Generation failures never appear here: they are recovered by the
/// heuristic fallback.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// Input text is empty or whitespace-only
    #[error("Text cannot be empty")]
    EmptyText,

    /// Record store error
    #[error("Store error: {0}")]
    Store(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Why raw generation output could not be turned into an analysis
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoerceError {
    /// Neither the whole output nor its brace block parsed as JSON
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// The output parsed but does not describe an analysis
    #[error("Schema mismatch: {0}")]
    Schema(String),
}

impl From<serde_json::Error> for CoerceError {
    fn from(e: serde_json::Error) -> Self {
        CoerceError::JsonParse(e.to_string())
    }
}
