//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{AnalysisRecord, RecordId};
use std::future::Future;

/// Trait for text-generation backends
///
/// Implemented by the infrastructure layer (glean-llm)
pub trait LlmProvider {
    /// Error type for generation operations
    type Error;

    /// Short identifier of the backend (e.g., "stub", "ollama")
    fn name(&self) -> &str;

    /// Analyze `text` and return the backend's raw output
    ///
    /// The instruction template is owned by the backend; callers only supply
    /// the text to analyze.
    fn generate(&self, text: &str) -> impl Future<Output = Result<String, Self::Error>> + Send;
}

/// Record collections that can be searched by membership
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MembershipField {
    /// The record's topic labels
    Topics,

    /// The record's extracted keywords
    Keywords,
}

impl MembershipField {
    /// Column name used by stores
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipField::Topics => "topics",
            MembershipField::Keywords => "keywords",
        }
    }
}

/// Trait for storing and retrieving analysis records
///
/// Implemented by the infrastructure layer (glean-store)
pub trait RecordStore {
    /// Error type for store operations
    type Error;

    /// Persist a new record and return the stored copy, including any
    /// storage-assigned fields
    fn insert(&mut self, record: &AnalysisRecord) -> Result<AnalysisRecord, Self::Error>;

    /// Get a record by ID
    fn get(&self, id: RecordId) -> Result<Option<AnalysisRecord>, Self::Error>;

    /// All records whose `field` collection contains `value` exactly,
    /// in insertion order
    fn query_by_membership(
        &self,
        field: MembershipField,
        value: &str,
    ) -> Result<Vec<AnalysisRecord>, Self::Error>;
}

/// Coarse part-of-speech classes used for keyword extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartOfSpeech {
    /// Common noun
    Noun,
    /// Proper noun
    ProperNoun,
    /// Verb
    Verb,
    /// Adjective
    Adjective,
    /// Anything else (adverbs, determiners, punctuation, ...)
    Other,
}

/// A token with its part-of-speech tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedToken {
    /// Surface form as it appears in the text
    pub text: String,
    /// Assigned tag
    pub pos: PartOfSpeech,
}

impl TaggedToken {
    /// Create a tagged token
    pub fn new(text: impl Into<String>, pos: PartOfSpeech) -> Self {
        Self {
            text: text.into(),
            pos,
        }
    }
}

/// Trait for part-of-speech taggers backed by a language model
pub trait PosTagger {
    /// Split `text` into tokens and tag each of them
    fn tag(&self, text: &str) -> Vec<TaggedToken>;
}
