//! Deterministic fallback analysis
//!
//! Pure functions over the input text, used whenever the generation path
//! fails. None of them can fail or return an empty summary for non-empty text.

use glean_domain::{Analysis, Sentiment};
use std::collections::HashSet;

/// Marker words checked first; any hit makes the text positive
pub const POSITIVE_WORDS: [&str; 4] = ["good", "great", "happy", "love"];

/// Marker words checked only when no positive marker matched
pub const NEGATIVE_WORDS: [&str; 4] = ["bad", "sad", "angry", "hate"];

/// Words must be longer than this (in characters) to become topics
pub const MIN_TOPIC_CHARS: usize = 4;

/// Appended to truncated summaries
pub const ELLIPSIS: &str = "...";

/// Case-insensitive substring match against the marker word sets
pub fn sentiment(text: &str) -> Sentiment {
    let lower = text.to_lowercase();
    if POSITIVE_WORDS.iter().any(|w| lower.contains(w)) {
        Sentiment::Positive
    } else if NEGATIVE_WORDS.iter().any(|w| lower.contains(w)) {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

/// Distinct lower-cased words longer than [`MIN_TOPIC_CHARS`], at most `top_k`
///
/// Words are whitespace-separated and kept in first-occurrence order.
pub fn topics(text: &str, top_k: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    text.split_whitespace()
        .filter(|w| w.chars().count() > MIN_TOPIC_CHARS)
        .map(str::to_lowercase)
        .filter(|w| seen.insert(w.clone()))
        .take(top_k)
        .collect()
}

/// First `max_chars` characters, plus [`ELLIPSIS`] if the text was longer
pub fn summary(text: &str, max_chars: usize) -> String {
    let mut out: String = text.chars().take(max_chars).collect();
    if text.chars().count() > max_chars {
        out.push_str(ELLIPSIS);
    }
    out
}

/// The full fallback bundle
pub fn analyze(text: &str, title_placeholder: &str, topic_count: usize, summary_max_chars: usize) -> Analysis {
    Analysis {
        title: title_placeholder.to_string(),
        summary: summary(text, summary_max_chars),
        topics: topics(text, topic_count),
        sentiment: sentiment(text),
    }
}
