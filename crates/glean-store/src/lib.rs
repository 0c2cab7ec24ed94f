//! Glean Storage Layer
//!
//! Implements the RecordStore trait using SQLite.
//!
//! # Architecture
//!
//! - One `analyses` table; topics and keywords are JSON arrays
//! - Membership search uses SQLite's `json_each`, so a value matches only
//!   when it is an element of the collection, never a substring of one
//! - `created_at` is assigned here on insert
//!
//! # Examples
//!
//! ```no_run
//! use glean_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for record operations
//! ```

#![warn(missing_docs)]

use glean_domain::traits::{MembershipField, RecordStore};
use glean_domain::{Analysis, AnalysisRecord, Provenance, RecordId, Sentiment};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Collection (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A record with the same ID already exists
    #[error("Duplicate record: {0}")]
    Duplicate(RecordId),
}

const RECORD_COLUMNS: &str = "id, text, title, summary, topics, sentiment, keywords, \
                              provider, fallback_used, error, created_at";

/// SQLite-based implementation of RecordStore
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Share a store between tasks
/// behind a mutex.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use glean_store::SqliteStore;
    ///
    /// let store = SqliteStore::new("glean.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    /// Number of stored records
    pub fn count(&self) -> Result<usize, StoreError> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM analyses", [], |row| row.get(0))?;
        Ok(n as usize)
    }

    /// Convert RecordId to bytes for storage
    fn record_id_to_bytes(id: RecordId) -> Vec<u8> {
        id.value().to_be_bytes().to_vec()
    }

    /// Convert bytes to RecordId
    fn bytes_to_record_id(bytes: &[u8]) -> Result<RecordId, StoreError> {
        let arr: [u8; 16] = bytes.try_into().map_err(|_| {
            StoreError::InvalidData(format!("Expected 16 bytes for RecordId, got {}", bytes.len()))
        })?;
        Ok(RecordId::from_value(u128::from_be_bytes(arr)))
    }

    fn now_secs() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }

    /// Wrap a decoding error as a rusqlite conversion failure for `column`
    fn conversion_error<E>(column: usize, ty: rusqlite::types::Type, e: E) -> rusqlite::Error
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        rusqlite::Error::FromSqlConversionFailure(column, ty, Box::new(e))
    }

    fn row_to_record(row: &Row<'_>) -> rusqlite::Result<AnalysisRecord> {
        use rusqlite::types::Type;

        let id_bytes: Vec<u8> = row.get(0)?;
        let id = Self::bytes_to_record_id(&id_bytes)
            .map_err(|e| Self::conversion_error(0, Type::Blob, e))?;

        let topics: String = row.get(4)?;
        let topics: Vec<String> =
            serde_json::from_str(&topics).map_err(|e| Self::conversion_error(4, Type::Text, e))?;

        let sentiment: String = row.get(5)?;
        let sentiment = Sentiment::parse(&sentiment).ok_or_else(|| {
            Self::conversion_error(
                5,
                Type::Text,
                StoreError::InvalidData(format!("Unknown sentiment: {}", sentiment)),
            )
        })?;

        let keywords: String = row.get(6)?;
        let keywords: Vec<String> = serde_json::from_str(&keywords)
            .map_err(|e| Self::conversion_error(6, Type::Text, e))?;

        let analysis = Analysis {
            title: row.get(2)?,
            summary: row.get(3)?,
            topics,
            sentiment,
        };

        let provenance = Provenance {
            provider: row.get(7)?,
            fallback_used: row.get(8)?,
            error: row.get(9)?,
        };

        Ok(AnalysisRecord::restore(
            id,
            row.get(1)?,
            analysis,
            keywords,
            provenance,
            row.get::<_, i64>(10)? as u64,
        ))
    }
}

impl RecordStore for SqliteStore {
    type Error = StoreError;

    fn insert(&mut self, record: &AnalysisRecord) -> Result<AnalysisRecord, Self::Error> {
        let id_bytes = Self::record_id_to_bytes(record.id());

        let exists: bool = self
            .conn
            .query_row(
                "SELECT 1 FROM analyses WHERE id = ?1",
                params![&id_bytes],
                |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false);

        if exists {
            return Err(StoreError::Duplicate(record.id()));
        }

        let created_at = Self::now_secs();
        let provenance = record.provenance();

        self.conn.execute(
            &format!(
                "INSERT INTO analyses ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                RECORD_COLUMNS
            ),
            params![
                &id_bytes,
                record.text(),
                record.title(),
                record.summary(),
                serde_json::to_string(record.topics())?,
                record.sentiment().as_str(),
                serde_json::to_string(record.keywords())?,
                &provenance.provider,
                provenance.fallback_used,
                &provenance.error,
                created_at as i64,
            ],
        )?;

        Ok(record.persisted_at(created_at))
    }

    fn get(&self, id: RecordId) -> Result<Option<AnalysisRecord>, Self::Error> {
        let id_bytes = Self::record_id_to_bytes(id);

        let record = self
            .conn
            .query_row(
                &format!("SELECT {} FROM analyses WHERE id = ?1", RECORD_COLUMNS),
                params![&id_bytes],
                Self::row_to_record,
            )
            .optional()?;

        Ok(record)
    }

    fn query_by_membership(
        &self,
        field: MembershipField,
        value: &str,
    ) -> Result<Vec<AnalysisRecord>, Self::Error> {
        // field names are fixed identifiers, never user input
        let sql = format!(
            "SELECT {cols} FROM analyses
             WHERE EXISTS (SELECT 1 FROM json_each(analyses.{field}) WHERE json_each.value = ?1)
             ORDER BY seq",
            cols = RECORD_COLUMNS,
            field = field.as_str(),
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let records = stmt
            .query_map(params![value], Self::row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }
}
