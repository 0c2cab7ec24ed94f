//! Coerce raw generation output into an analysis
//!
//! Backends often wrap the requested JSON in prose or markdown fences. The
//! output is parsed as a whole first; if that fails, the block from the first
//! `{` to the last `}` is parsed; if that fails too, the parse error is
//! returned.

use crate::error::CoerceError;
use crate::heuristics;
use glean_domain::{Analysis, Sentiment};
use serde_json::{Map, Value};
use tracing::debug;

/// Maximum number of topics kept from generated output
pub const GENERATED_TOPIC_COUNT: usize = 3;

/// Parse raw output into a JSON value, tolerating surrounding prose
pub fn coerce_json(raw: &str) -> Result<Value, CoerceError> {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => Ok(value),
        Err(whole_err) => {
            let Some(block) = brace_block(raw) else {
                return Err(whole_err.into());
            };
            debug!("Whole-output parse failed, retrying on {}-char brace block", block.len());
            Ok(serde_json::from_str::<Value>(block)?)
        }
    }
}

/// Span from the first `{` to the last `}`, if any
///
/// The span is greedy, not the first balanced block: `{"a":1} then {x}`
/// yields the whole text and fails to parse.
fn brace_block(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

/// Parse raw output and check it against the analysis schema
///
/// A missing or null `title` becomes `title_placeholder`, missing `topics`
/// become empty and a missing `sentiment` becomes neutral. `summary` is
/// required and cut to `summary_max_chars` characters plus an ellipsis.
pub fn coerce_analysis(
    raw: &str,
    title_placeholder: &str,
    summary_max_chars: usize,
) -> Result<Analysis, CoerceError> {
    let value = coerce_json(raw)?;
    let obj = value
        .as_object()
        .ok_or_else(|| CoerceError::Schema("Expected JSON object".to_string()))?;

    Ok(Analysis {
        title: parse_title(obj)?.unwrap_or_else(|| title_placeholder.to_string()),
        summary: heuristics::summary(&parse_summary(obj)?, summary_max_chars),
        topics: parse_topics(obj)?,
        sentiment: parse_sentiment(obj)?,
    })
}

/// Non-null field lookup
fn field<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| !v.is_null())
}

fn parse_title(obj: &Map<String, Value>) -> Result<Option<String>, CoerceError> {
    match field(obj, "title") {
        None => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.trim().to_string())),
        Some(_) => Err(CoerceError::Schema("'title' is not a string".to_string())),
    }
}

fn parse_summary(obj: &Map<String, Value>) -> Result<String, CoerceError> {
    field(obj, "summary")
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| CoerceError::Schema("Missing or invalid 'summary'".to_string()))
}

fn parse_topics(obj: &Map<String, Value>) -> Result<Vec<String>, CoerceError> {
    let Some(value) = field(obj, "topics") else {
        return Ok(Vec::new());
    };
    let items = value
        .as_array()
        .ok_or_else(|| CoerceError::Schema("'topics' is not an array".to_string()))?;

    let mut topics = Vec::with_capacity(items.len());
    for item in items {
        let topic = item
            .as_str()
            .ok_or_else(|| CoerceError::Schema("'topics' contains a non-string".to_string()))?
            .trim();
        if !topic.is_empty() {
            topics.push(topic.to_string());
        }
    }
    topics.truncate(GENERATED_TOPIC_COUNT);
    Ok(topics)
}

fn parse_sentiment(obj: &Map<String, Value>) -> Result<Sentiment, CoerceError> {
    match field(obj, "sentiment") {
        None => Ok(Sentiment::Neutral),
        Some(value) => value
            .as_str()
            .and_then(Sentiment::parse)
            .ok_or_else(|| CoerceError::Schema(format!("Invalid 'sentiment': {}", value))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"{
        "title": "Morning Walk",
        "topics": ["lake", "sunrise", "dog"],
        "sentiment": "positive",
        "summary": "A calm walk by the lake."
    }"#;

    #[test]
    fn test_parse_valid_json() {
        let analysis = coerce_analysis(FULL, "Untitled", 500).unwrap();
        assert_eq!(analysis.title, "Morning Walk");
        assert_eq!(analysis.topics, vec!["lake", "sunrise", "dog"]);
        assert_eq!(analysis.sentiment, Sentiment::Positive);
        assert_eq!(analysis.summary, "A calm walk by the lake.");
    }

    #[test]
    fn test_parse_json_wrapped_in_prose() {
        let raw = format!("Sure! Here is the analysis:\n{}\nHope that helps.", FULL);
        let analysis = coerce_analysis(&raw, "Untitled", 500).unwrap();
        assert_eq!(analysis.title, "Morning Walk");
    }

    #[test]
    fn test_parse_json_with_markdown_wrapper() {
        let raw = format!("```json\n{}\n```", FULL);
        let analysis = coerce_analysis(&raw, "Untitled", 500).unwrap();
        assert_eq!(analysis.topics.len(), 3);
    }

    #[test]
    fn test_missing_closing_brace_fails() {
        let raw = r#"Sure! {"title": "X", "summary": "Y." hope that helps"#;
        assert!(matches!(coerce_json(raw), Err(CoerceError::JsonParse(_))));
    }

    #[test]
    fn test_no_json_at_all_fails() {
        assert!(matches!(
            coerce_analysis("This is not JSON", "Untitled", 500),
            Err(CoerceError::JsonParse(_))
        ));
    }

    #[test]
    fn test_brace_block_spans_first_to_last_brace() {
        assert_eq!(brace_block("a {1} b {2} c"), Some("{1} b {2}"));
        assert_eq!(brace_block("} {"), None);
        assert_eq!(brace_block("none"), None);
    }

    #[test]
    fn test_trailing_brace_prose_defeats_block_parse() {
        let raw = r#"{"summary": "A."} then {x}"#;
        assert!(matches!(coerce_json(raw), Err(CoerceError::JsonParse(_))));
    }

    #[test]
    fn test_whole_string_parse_wins() {
        let value = coerce_json(r#"  {"summary": "x"}  "#).unwrap();
        assert_eq!(value["summary"], "x");
    }

    #[test]
    fn test_defaults_for_missing_keys() {
        let analysis = coerce_analysis(r#"{"summary": "Only a summary."}"#, "Untitled", 500).unwrap();
        assert_eq!(analysis.title, "Untitled");
        assert!(analysis.topics.is_empty());
        assert_eq!(analysis.sentiment, Sentiment::Neutral);
    }

    #[test]
    fn test_null_title_uses_placeholder() {
        let analysis =
            coerce_analysis(r#"{"title": null, "summary": "S."}"#, "(no title)", 500).unwrap();
        assert_eq!(analysis.title, "(no title)");
    }

    #[test]
    fn test_missing_summary_is_schema_miss() {
        let result = coerce_analysis(r#"{"title": "X"}"#, "Untitled", 500);
        assert!(matches!(result, Err(CoerceError::Schema(_))));

        let result = coerce_analysis(r#"{"title": "X", "summary": "  "}"#, "Untitled", 500);
        assert!(matches!(result, Err(CoerceError::Schema(_))));
    }

    #[test]
    fn test_non_object_is_schema_miss() {
        assert!(matches!(
            coerce_analysis(r#"["a", "b"]"#, "Untitled", 500),
            Err(CoerceError::Schema(_))
        ));
    }

    #[test]
    fn test_unknown_sentiment_is_schema_miss() {
        let result = coerce_analysis(r#"{"summary": "S.", "sentiment": "mixed"}"#, "Untitled", 500);
        assert!(matches!(result, Err(CoerceError::Schema(_))));
    }

    #[test]
    fn test_sentiment_case_is_ignored() {
        let analysis =
            coerce_analysis(r#"{"summary": "S.", "sentiment": "NEGATIVE"}"#, "Untitled", 500).unwrap();
        assert_eq!(analysis.sentiment, Sentiment::Negative);
    }

    #[test]
    fn test_extra_topics_are_truncated() {
        let raw = r#"{"summary": "S.", "topics": ["a", "b", "c", "d", "e"]}"#;
        let analysis = coerce_analysis(raw, "Untitled", 500).unwrap();
        assert_eq!(analysis.topics, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_long_summary_is_capped() {
        let raw = format!(r#"{{"summary": "{}", "topics": ["a"]}}"#, "x".repeat(50_000));
        let analysis = coerce_analysis(&raw, "Untitled", 500).unwrap();
        assert_eq!(analysis.summary.chars().count(), 503);
        assert!(analysis.summary.ends_with("..."));
    }

    #[test]
    fn test_summary_cap_respects_char_boundaries() {
        let raw = r#"{"summary": "ééééé"}"#;
        let analysis = coerce_analysis(raw, "Untitled", 3).unwrap();
        assert_eq!(analysis.summary, "ééé...");

        let analysis = coerce_analysis(raw, "Untitled", 5).unwrap();
        assert_eq!(analysis.summary, "ééééé");
    }

    #[test]
    fn test_non_string_topic_is_schema_miss() {
        let raw = r#"{"summary": "S.", "topics": ["a", 2, "c"]}"#;
        assert!(matches!(coerce_analysis(raw, "Untitled", 500), Err(CoerceError::Schema(_))));
    }
}
