//! Core Analyzer implementation

use crate::coerce::coerce_analysis;
use crate::config::AnalyzerConfig;
use crate::error::AnalyzerError;
use crate::heuristics;
use crate::lexical::{KeywordExtractor, SharedTagger};
use crate::types::{GenerationFailure, GenerationOutcome};
use glean_domain::traits::{LlmProvider, MembershipField, RecordStore};
use glean_domain::{AnalysisRecord, Provenance, RecordId};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// The Analyzer turns free-form text into persisted analysis records
///
/// Built once at startup and shared across requests; it holds no per-request
/// state.
pub struct Analyzer<L, S>
where
    L: LlmProvider,
    S: RecordStore,
{
    llm_provider: Arc<L>,
    store: Arc<Mutex<S>>,
    keywords: KeywordExtractor,
    config: AnalyzerConfig,
}

impl<L, S> Analyzer<L, S>
where
    L: LlmProvider,
    S: RecordStore,
    L::Error: std::fmt::Display,
    S::Error: std::fmt::Display,
{
    /// Create a new Analyzer
    pub fn new(llm_provider: L, store: S, config: AnalyzerConfig) -> Result<Self, AnalyzerError> {
        config.validate().map_err(AnalyzerError::Config)?;

        Ok(Self {
            llm_provider: Arc::new(llm_provider),
            store: Arc::new(Mutex::new(store)),
            keywords: KeywordExtractor::new(config.keyword_count),
            config,
        })
    }

    /// Extract keywords with a part-of-speech tagger (nouns only)
    pub fn with_tagger(mut self, tagger: SharedTagger) -> Self {
        self.keywords = self.keywords.with_tagger(tagger);
        self
    }

    /// Identifier of the configured generation backend
    pub fn provider_name(&self) -> &str {
        self.llm_provider.name()
    }

    /// Active configuration
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze `text` and persist the resulting record
    ///
    /// # Errors
    ///
    /// - [`AnalyzerError::EmptyText`] for empty or whitespace-only text,
    ///   before any stage runs
    /// - [`AnalyzerError::Store`] if the record cannot be persisted
    ///
    /// Generation failures are never returned; they switch the analysis to
    /// the heuristic fallback.
    pub async fn analyze(&self, text: &str) -> Result<AnalysisRecord, AnalyzerError> {
        if text.trim().is_empty() {
            return Err(AnalyzerError::EmptyText);
        }

        info!("Starting analysis, text length {}", text.len());

        let provider = self.provider_name().to_string();
        let (analysis, provenance) = match self.generate(text).await {
            GenerationOutcome::Structured(analysis) => {
                debug!("Generation succeeded with {} topics", analysis.topics.len());
                (analysis, Provenance::generated(provider))
            }
            GenerationOutcome::Failed(reason) => {
                warn!("Generation failed, using heuristic fallback: {}", reason);
                let analysis = heuristics::analyze(
                    text,
                    &self.config.title_placeholder,
                    self.config.topic_count,
                    self.config.summary_max_chars,
                );
                (analysis, Provenance::fallback(provider, reason.to_string()))
            }
        };

        let keywords = self.keywords.extract(text);
        debug!(
            "Extracted {} keywords (pos tagger: {})",
            keywords.len(),
            self.keywords.uses_tagger()
        );

        let record = AnalysisRecord::new(text, analysis, keywords, provenance);

        let stored = {
            let mut store = self
                .store
                .lock()
                .map_err(|e| AnalyzerError::Store(format!("Store lock error: {}", e)))?;
            store
                .insert(&record)
                .map_err(|e| AnalyzerError::Store(e.to_string()))?
        };

        info!(
            "Analysis {} stored (fallback_used: {})",
            stored.id(),
            stored.provenance().fallback_used
        );

        Ok(stored)
    }

    /// Run the backend and coerce its output
    ///
    /// Every failure, including a timeout, is reported as
    /// [`GenerationOutcome::Failed`] with nothing of the attempt retained.
    pub async fn generate(&self, text: &str) -> GenerationOutcome {
        let raw = match timeout(self.config.generation_timeout(), self.llm_provider.generate(text)).await {
            Err(_) => {
                return GenerationOutcome::Failed(GenerationFailure::Timeout(
                    self.config.generation_timeout_secs,
                ))
            }
            Ok(Err(e)) => return GenerationOutcome::Failed(GenerationFailure::Backend(e.to_string())),
            Ok(Ok(raw)) => raw,
        };

        debug!("LLM response length: {} chars", raw.len());

        match coerce_analysis(
            &raw,
            &self.config.title_placeholder,
            self.config.generated_summary_max_chars,
        ) {
            Ok(analysis) => GenerationOutcome::Structured(analysis),
            Err(e) => GenerationOutcome::Failed(e.into()),
        }
    }

    /// All records whose topics or keywords contain `topic` exactly,
    /// oldest first
    pub fn search(&self, topic: &str) -> Result<Vec<AnalysisRecord>, AnalyzerError> {
        let store = self
            .store
            .lock()
            .map_err(|e| AnalyzerError::Store(format!("Store lock error: {}", e)))?;

        let mut seen = HashSet::new();
        let mut records = Vec::new();
        for field in [MembershipField::Topics, MembershipField::Keywords] {
            let matches = store
                .query_by_membership(field, topic)
                .map_err(|e| AnalyzerError::Store(e.to_string()))?;
            records.extend(matches.into_iter().filter(|r| seen.insert(r.id())));
        }
        records.sort_by_key(|r| r.id());

        debug!("Search for '{}' matched {} records", topic, records.len());
        Ok(records)
    }

    /// Get a record by ID
    pub fn get(&self, id: RecordId) -> Result<Option<AnalysisRecord>, AnalyzerError> {
        let store = self
            .store
            .lock()
            .map_err(|e| AnalyzerError::Store(format!("Store lock error: {}", e)))?;
        store.get(id).map_err(|e| AnalyzerError::Store(e.to_string()))
    }
}
