//! Run reports
//!
//! The failed-URL report is a plain newline-delimited file, rewritten each
//! run. A clean run removes any stale report so the file's presence always
//! signals failures from the latest run.

use crate::storage::{ListingStore, StorageResult};
use std::fs;
use std::io;
use std::path::Path;

/// Writes the failed-URL report, or removes a stale one on a clean run
pub fn write_failed_urls(path: &Path, failed: &[String]) -> io::Result<()> {
    if failed.is_empty() {
        match fs::remove_file(path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(path, failed.join("\n"))
}

/// Prints store statistics for the `--stats` mode
pub fn print_store_stats(store: &dyn ListingStore) -> StorageResult<()> {
    let total = store.count_listings()?;
    println!("Persisted listings: {}", total);
    Ok(())
}
