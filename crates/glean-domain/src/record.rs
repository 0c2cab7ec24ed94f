//! Record module - the persisted unit of Glean

use crate::{Provenance, Sentiment};
use std::fmt;

/// Unique identifier for an analysis record based on UUIDv7
///
/// UUIDv7 provides:
/// - Chronological sortability (records list in creation order)
/// - 128-bit uniqueness
/// - No coordination required for distributed generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(u128);

impl RecordId {
    /// Generate a new UUIDv7-based RecordId
    ///
    /// # Examples
    ///
    /// ```
    /// use glean_domain::RecordId;
    ///
    /// let id = RecordId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a RecordId from a raw u128 value
    ///
    /// This is primarily for storage layer deserialization.
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a RecordId from its hyphenated UUID string
    ///
    /// # Examples
    ///
    /// ```
    /// use glean_domain::RecordId;
    ///
    /// let id = RecordId::new();
    /// let parsed = RecordId::from_string(&id.to_string()).unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid record id: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// The analysis fields of a record: everything that either the generation
/// backend or the heuristic fallback produces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    /// Short title (placeholder when none was produced)
    pub title: String,

    /// Non-empty summary
    pub summary: String,

    /// Ordered topic labels
    pub topics: Vec<String>,

    /// Overall polarity
    pub sentiment: Sentiment,
}

/// An analysed text, as handed to and returned from the store
///
/// Fields are private so the identifier and the analysed content cannot be
/// changed once the record exists. The only storage-assigned field,
/// `created_at`, is set by building a new copy with [`AnalysisRecord::persisted_at`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRecord {
    id: RecordId,
    text: String,
    analysis: Analysis,
    keywords: Vec<String>,
    provenance: Provenance,
    created_at: Option<u64>,
}

impl AnalysisRecord {
    /// Build a new, not yet persisted record with a fresh identifier
    pub fn new(
        text: impl Into<String>,
        analysis: Analysis,
        keywords: Vec<String>,
        provenance: Provenance,
    ) -> Self {
        Self {
            id: RecordId::new(),
            text: text.into(),
            analysis,
            keywords,
            provenance,
            created_at: None,
        }
    }

    /// Rebuild a record that was previously persisted
    ///
    /// This is primarily for storage layer deserialization.
    pub fn restore(
        id: RecordId,
        text: String,
        analysis: Analysis,
        keywords: Vec<String>,
        provenance: Provenance,
        created_at: u64,
    ) -> Self {
        Self {
            id,
            text,
            analysis,
            keywords,
            provenance,
            created_at: Some(created_at),
        }
    }

    /// Copy of this record stamped with its storage time
    pub fn persisted_at(&self, created_at: u64) -> Self {
        Self {
            created_at: Some(created_at),
            ..self.clone()
        }
    }

    /// Record identifier
    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Original input text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Title of the analysis
    pub fn title(&self) -> &str {
        &self.analysis.title
    }

    /// Summary of the analysis
    pub fn summary(&self) -> &str {
        &self.analysis.summary
    }

    /// Topic labels
    pub fn topics(&self) -> &[String] {
        &self.analysis.topics
    }

    /// Overall polarity
    pub fn sentiment(&self) -> Sentiment {
        self.analysis.sentiment
    }

    /// Most frequent salient terms of the text
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// All analysis fields
    pub fn analysis(&self) -> &Analysis {
        &self.analysis
    }

    /// Which path produced the analysis
    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    /// Seconds since the Unix epoch at which the store accepted the record
    pub fn created_at(&self) -> Option<u64> {
        self.created_at
    }
}
