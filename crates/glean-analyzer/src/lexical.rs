//! Keyword extraction by term frequency
//!
//! With a part-of-speech tagger only nouns qualify; without one every word
//! token does. Terms are ranked by descending count, ties broken by first
//! occurrence.

use glean_domain::traits::{PartOfSpeech, PosTagger};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::sync::Arc;

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w+\b").unwrap());

/// Shared tagger handle
pub type SharedTagger = Arc<dyn PosTagger + Send + Sync>;

/// Extracts the most frequent qualifying terms of a text
#[derive(Clone)]
pub struct KeywordExtractor {
    top_k: usize,
    tagger: Option<SharedTagger>,
}

impl KeywordExtractor {
    /// Frequency-only extractor returning at most `top_k` terms
    pub fn new(top_k: usize) -> Self {
        Self { top_k, tagger: None }
    }

    /// Restrict qualifying terms to nouns found by `tagger`
    pub fn with_tagger(mut self, tagger: SharedTagger) -> Self {
        self.tagger = Some(tagger);
        self
    }

    /// Whether a tagger is configured
    pub fn uses_tagger(&self) -> bool {
        self.tagger.is_some()
    }

    /// Extract keywords from `text`
    pub fn extract(&self, text: &str) -> Vec<String> {
        let terms: Vec<String> = match &self.tagger {
            Some(tagger) => tagger
                .tag(text)
                .into_iter()
                .filter(|token| token.pos == PartOfSpeech::Noun)
                .map(|token| token.text.to_lowercase())
                .collect(),
            None => {
                let lower = text.to_lowercase();
                WORD_RE
                    .find_iter(&lower)
                    .map(|m| m.as_str().to_string())
                    .collect()
            }
        };
        most_common(terms, self.top_k)
    }
}

impl std::fmt::Debug for KeywordExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeywordExtractor")
            .field("top_k", &self.top_k)
            .field("tagger", &self.uses_tagger())
            .finish()
    }
}

/// Top `k` terms by count; equal counts keep first-occurrence order
fn most_common(terms: Vec<String>, k: usize) -> Vec<String> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for term in terms {
        match index.get(&term) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(term.clone(), counts.len());
                counts.push((term, 1));
            }
        }
    }

    // stable sort keeps insertion order among ties
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().take(k).map(|(term, _)| term).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glean_domain::traits::TaggedToken;

    /// Tags a fixed vocabulary as nouns and everything else as other
    struct VocabTagger(Vec<&'static str>);

    impl PosTagger for VocabTagger {
        fn tag(&self, text: &str) -> Vec<TaggedToken> {
            text.split_whitespace()
                .map(|w| {
                    let word = w.trim_matches(|c: char| !c.is_alphanumeric());
                    let pos = if self.0.contains(&word.to_lowercase().as_str()) {
                        PartOfSpeech::Noun
                    } else {
                        PartOfSpeech::Other
                    };
                    TaggedToken::new(word, pos)
                })
                .collect()
        }
    }

    #[test]
    fn test_frequency_ranking() {
        let extractor = KeywordExtractor::new(3);
        let text = "the cat and the dog and the bird";
        assert_eq!(extractor.extract(text), vec!["the", "and", "cat"]);
    }

    #[test]
    fn test_ties_keep_first_occurrence_order() {
        let extractor = KeywordExtractor::new(2);
        assert_eq!(extractor.extract("zeta alpha zeta alpha"), vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_tokens_are_lowercased_words() {
        let extractor = KeywordExtractor::new(5);
        assert_eq!(extractor.extract("Hello, HELLO! world..."), vec!["hello", "world"]);
    }

    #[test]
    fn test_fewer_terms_than_top_k() {
        let extractor = KeywordExtractor::new(10);
        assert_eq!(extractor.extract("one two").len(), 2);
        assert!(extractor.extract("  ...  ").is_empty());
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let extractor = KeywordExtractor::new(3);
        let text = "Rust traits and Rust lifetimes make traits useful in Rust";
        assert_eq!(extractor.extract(text), extractor.extract(text));
        assert_eq!(extractor.extract(text), vec!["rust", "traits", "and"]);
    }

    #[test]
    fn test_tagger_restricts_to_nouns() {
        let tagger: SharedTagger = Arc::new(VocabTagger(vec!["cat", "dog"]));
        let extractor = KeywordExtractor::new(3).with_tagger(tagger);
        assert!(extractor.uses_tagger());

        let keywords = extractor.extract("The Dog chased the cat. The dog barked.");
        assert_eq!(keywords, vec!["dog", "cat"]);
    }
}
