//! Persistence gateway for listing records
//!
//! A single SQLite table keyed by URL. Writes are insert-or-ignore: an
//! existing row is never overwritten, so records are effectively
//! append-only across runs.

mod schema;
mod sqlite;
mod traits;

pub use schema::{initialize_schema, SCHEMA_SQL};
pub use sqlite::SqliteStore;
pub use traits::{ListingStore, StorageError, StorageResult};
