//! Glean Analyzer
//!
//! Turns free-form text into a structured, persisted analysis record.
//!
//! # Architecture
//!
//! ```text
//! text → LLM → Coercer ─┬─ Structured ─┐
//!                       └─ Failed → Heuristics ─┤
//! text → KeywordExtractor ──────────────────────┴→ AnalysisRecord → RecordStore
//! ```
//!
//! # Key Features
//!
//! - **Tolerant coercion**: whole-output JSON parse, then the brace block
//!   inside surrounding prose, then failure
//! - **Total fallback**: any backend, timeout, parse or schema failure
//!   discards the attempt and re-derives every analysis field heuristically
//! - **Independent keywords**: always extracted from the text itself
//!
//! # Example Usage
//!
//! ```no_run
//! use glean_analyzer::{Analyzer, AnalyzerConfig};
//! use glean_llm::StubProvider;
//! use glean_store::SqliteStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = SqliteStore::new(":memory:")?;
//! let analyzer = Analyzer::new(StubProvider::new(), store, AnalyzerConfig::default())?;
//!
//! let record = analyzer.analyze("Rust makes systems programming approachable.").await?;
//! println!("{}: {:?}", record.title(), record.keywords());
//!
//! let matches = analyzer.search("rust")?;
//! println!("Found {} records", matches.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod analyzer;
mod config;
mod error;
mod types;

pub mod coerce;
pub mod heuristics;
pub mod lexical;


pub use analyzer::Analyzer;
pub use config::AnalyzerConfig;
pub use error::{AnalyzerError, CoerceError};
pub use lexical::{KeywordExtractor, SharedTagger};
pub use types::{GenerationFailure, GenerationOutcome};
