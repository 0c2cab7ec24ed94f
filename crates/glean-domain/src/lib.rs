//! Glean Domain Layer
//!
//! This crate contains the core domain model for Glean. It depends only on
//! `uuid` and defines the fundamental value objects and the trait interfaces
//! that every other layer depends upon.
//!
//! ## Key Concepts
//!
//! - **AnalysisRecord**: The sole persisted entity - a text plus its analysis
//! - **Analysis**: Title, summary, topics and sentiment produced for a text,
//!   either by a generation backend or by local heuristics
//! - **Provenance**: Which path produced an analysis and why
//! - **Sentiment**: Three-valued polarity
//!
//! ## Architecture
//!
//! - Pure domain logic only
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions (generation backends,
//!   record storage, part-of-speech tagging)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod provenance;
pub mod record;
pub mod sentiment;
pub mod traits;

// Re-exports for convenience
pub use provenance::Provenance;
pub use record::{Analysis, AnalysisRecord, RecordId};
pub use sentiment::Sentiment;
