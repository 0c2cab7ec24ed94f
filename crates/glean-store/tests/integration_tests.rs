//! Integration tests for glean-store
//!
//! These tests verify persistence and membership search for analysis records.

use glean_domain::traits::{MembershipField, RecordStore};
use glean_domain::{Analysis, AnalysisRecord, Provenance, RecordId, Sentiment};
use glean_store::{SqliteStore, StoreError};

fn record(text: &str, topics: &[&str], keywords: &[&str]) -> AnalysisRecord {
    let analysis = Analysis {
        title: "Untitled".to_string(),
        summary: format!("About {}", text),
        topics: topics.iter().map(|s| s.to_string()).collect(),
        sentiment: Sentiment::Neutral,
    };
    AnalysisRecord::new(
        text,
        analysis,
        keywords.iter().map(|s| s.to_string()).collect(),
        Provenance::generated("stub"),
    )
}

#[test]
fn test_store_initialization() {
    let store = SqliteStore::new(":memory:");
    assert!(store.is_ok(), "Store should initialize successfully");
}

#[test]
fn test_insert_and_get_record() {
    let mut store = SqliteStore::new(":memory:").unwrap();

    let original = record("cats and dogs", &["cats", "dogs", "pets"], &["cats", "and", "dogs"]);
    assert!(original.created_at().is_none());

    let stored = store.insert(&original).unwrap();
    assert_eq!(stored.id(), original.id());
    assert!(stored.created_at().is_some());

    let retrieved = store.get(original.id()).unwrap();
    assert_eq!(retrieved, Some(stored));
}

#[test]
fn test_fallback_provenance_round_trip() {
    let mut store = SqliteStore::new(":memory:").unwrap();

    let analysis = Analysis {
        title: "Untitled".to_string(),
        summary: "I hate rain...".to_string(),
        topics: vec!["weather".to_string()],
        sentiment: Sentiment::Negative,
    };
    let original = AnalysisRecord::new(
        "I hate rain",
        analysis,
        vec!["hate".to_string(), "rain".to_string()],
        Provenance::fallback("ollama", "backend error: connection refused"),
    );

    let stored = store.insert(&original).unwrap();
    let retrieved = store.get(original.id()).unwrap().unwrap();

    assert_eq!(retrieved, stored);
    assert_eq!(retrieved.sentiment(), Sentiment::Negative);
    assert!(retrieved.provenance().fallback_used);
    assert_eq!(
        retrieved.provenance().error.as_deref(),
        Some("backend error: connection refused")
    );
}

#[test]
fn test_duplicate_detection() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let original = record("hello world", &[], &["hello", "world"]);

    assert!(store.insert(&original).is_ok());

    let result = store.insert(&original);
    assert!(matches!(result, Err(StoreError::Duplicate(id)) if id == original.id()));
    assert_eq!(store.count().unwrap(), 1);
}

#[test]
fn test_get_nonexistent_record() {
    let store = SqliteStore::new(":memory:").unwrap();
    assert!(store.get(RecordId::new()).unwrap().is_none());
}

#[test]
fn test_membership_is_exact() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    store
        .insert(&record("cats", &["cats", "felines"], &["cats"]))
        .unwrap();
    store
        .insert(&record("concatenate", &["strings"], &["concatenate"]))
        .unwrap();

    assert!(store
        .query_by_membership(MembershipField::Topics, "cat")
        .unwrap()
        .is_empty());
    assert!(store
        .query_by_membership(MembershipField::Keywords, "cat")
        .unwrap()
        .is_empty());
    assert!(store
        .query_by_membership(MembershipField::Topics, "Cats")
        .unwrap()
        .is_empty());

    let found = store
        .query_by_membership(MembershipField::Keywords, "concatenate")
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].text(), "concatenate");
}

#[test]
fn test_membership_is_per_field() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    store
        .insert(&record("one", &["alpha"], &["beta"]))
        .unwrap();

    assert_eq!(
        store.query_by_membership(MembershipField::Topics, "alpha").unwrap().len(),
        1
    );
    assert!(store
        .query_by_membership(MembershipField::Topics, "beta")
        .unwrap()
        .is_empty());
    assert_eq!(
        store.query_by_membership(MembershipField::Keywords, "beta").unwrap().len(),
        1
    );
}

#[test]
fn test_membership_results_in_insertion_order() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let first = store.insert(&record("first", &["shared"], &[])).unwrap();
    store.insert(&record("unrelated", &["other"], &[])).unwrap();
    let third = store.insert(&record("third", &["shared"], &[])).unwrap();

    let found = store
        .query_by_membership(MembershipField::Topics, "shared")
        .unwrap();
    let ids: Vec<_> = found.iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec![first.id(), third.id()]);
}

#[test]
fn test_empty_collections_never_match() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    store.insert(&record("quiet", &[], &[])).unwrap();

    assert!(store
        .query_by_membership(MembershipField::Topics, "")
        .unwrap()
        .is_empty());
}

#[test]
fn test_file_backed_store_persists_across_connections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("glean.db");

    let stored = {
        let mut store = SqliteStore::new(&path).unwrap();
        store.insert(&record("durable", &["disk"], &["durable"])).unwrap()
    };

    let store = SqliteStore::new(&path).unwrap();
    assert_eq!(store.get(stored.id()).unwrap(), Some(stored));
}
