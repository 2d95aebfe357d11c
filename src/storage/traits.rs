//! Storage trait and error types

use crate::extract::ListingRecord;
use std::collections::HashSet;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Image URL encoding error: {0}")]
    ImageEncoding(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Persistence gateway for listing records, keyed by URL
///
/// Writes are first-write-wins: upserting an existing key silently keeps
/// the stored row.
pub trait ListingStore {
    /// Idempotently ensures the record store and schema exist
    fn init(&self) -> StorageResult<()>;

    /// Inserts the record; returns `true` if a row was inserted, `false`
    /// if the key already existed and the write was discarded
    fn upsert(&self, record: &ListingRecord) -> StorageResult<bool>;

    /// Every persisted key, for membership testing
    fn known_urls(&self) -> StorageResult<HashSet<String>>;

    /// Order-preserving subsequence of `urls` not yet persisted
    fn filter_unknown(&self, urls: &[String]) -> StorageResult<Vec<String>>;

    /// Number of persisted listings
    fn count_listings(&self) -> StorageResult<u64>;
}
