//! Outcome of the generation path

use crate::error::CoerceError;
use glean_domain::Analysis;
use thiserror::Error;

/// Result of attempting backend generation plus coercion
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    /// The backend produced a schema-valid analysis
    Structured(Analysis),

    /// The attempt failed and must be discarded entirely
    Failed(GenerationFailure),
}

/// Why the generation path was abandoned
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationFailure {
    /// Backend or transport error
    #[error("backend error: {0}")]
    Backend(String),

    /// The attempt exceeded the generation timeout
    #[error("generation timed out after {0}s")]
    Timeout(u64),

    /// Output could not be coerced into an analysis
    #[error("unusable output: {0}")]
    Output(#[from] CoerceError),
}
