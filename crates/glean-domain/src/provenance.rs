//! Provenance tracking for analyses

/// Records which path produced the analysis fields of a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    /// Identifier of the configured generation backend (e.g., "stub", "ollama")
    pub provider: String,

    /// True when title, summary, topics and sentiment came from local heuristics
    pub fallback_used: bool,

    /// Why the generation path was abandoned, if it was
    pub error: Option<String>,
}

impl Provenance {
    /// Provenance for an analysis produced by the generation backend
    pub fn generated(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            fallback_used: false,
            error: None,
        }
    }

    /// Provenance for an analysis produced by the heuristic fallback
    pub fn fallback(provider: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            fallback_used: true,
            error: Some(error.into()),
        }
    }
}
