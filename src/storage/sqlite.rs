//! SQLite implementation of the listing store
//!
//! The store holds only a path and opens a connection per operation; no
//! connection is held across the run, so concurrent detail tasks can share
//! one store handle without a lock.

use crate::extract::ListingRecord;
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{ListingStore, StorageResult};
use rusqlite::{params, Connection};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// How long a connection waits for another writer before giving up
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite-backed listing store
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    /// Creates a store handle for the database at `path`
    ///
    /// No file is touched until [`ListingStore::init`] runs.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    fn open(&self) -> StorageResult<Connection> {
        let conn = Connection::open(&self.path)?;
        // Concurrent detail tasks write through separate connections; wait
        // out a held write lock instead of failing with SQLITE_BUSY
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
        ",
        )?;
        Ok(conn)
    }
}

impl ListingStore for SqliteStore {
    fn init(&self) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = self.open()?;
        initialize_schema(&conn)?;
        Ok(())
    }

    fn upsert(&self, record: &ListingRecord) -> StorageResult<bool> {
        let image_urls = serde_json::to_string(&record.image_urls)?;

        let conn = self.open()?;
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO listings
             (url, title, price, published_time, published_date, seller_name,
              location, division, condition, model, brand, features,
              description, image_urls, scraped_date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
            params![
                record.url,
                record.title,
                record.price,
                record.published_time,
                record.published_date,
                record.seller_name,
                record.location,
                record.division,
                record.condition,
                record.model,
                record.brand,
                record.features,
                record.description,
                image_urls,
                record.scraped_date,
            ],
        )?;

        Ok(inserted > 0)
    }

    fn known_urls(&self) -> StorageResult<HashSet<String>> {
        let conn = self.open()?;
        let mut stmt = conn.prepare("SELECT url FROM listings")?;

        let urls = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<HashSet<_>, _>>()?;

        Ok(urls)
    }

    fn filter_unknown(&self, urls: &[String]) -> StorageResult<Vec<String>> {
        let known = self.known_urls()?;
        Ok(urls
            .iter()
            .filter(|url| !known.contains(*url))
            .cloned()
            .collect())
    }

    fn count_listings(&self) -> StorageResult<u64> {
        let conn = self.open()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM listings", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}
