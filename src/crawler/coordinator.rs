//! Run orchestration
//!
//! Wires the collector, known-URL filter, detail fetcher, and failure
//! report into one run: init storage → collect links → filter known →
//! fetch details → report.

use crate::config::Config;
use crate::crawler::collector::collect_links;
use crate::crawler::detail::fetch_details;
use crate::crawler::fetcher::build_http_client;
use crate::output::write_failed_urls;
use crate::storage::{ListingStore, SqliteStore};
use crate::{Result, ScraperError};
use reqwest::Client;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Counters reported at the end of a run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Links collected from index pages (before dedup against the store)
    pub links_found: usize,
    /// Links not yet in the store at the start of the run
    pub new_urls: usize,
    /// Records actually inserted during the run
    pub saved: u64,
    /// URLs that exhausted retries
    pub failed: usize,
}

/// Drives one complete scrape run
pub struct Coordinator {
    config: Arc<Config>,
    store: Arc<SqliteStore>,
    client: Client,
}

impl Coordinator {
    /// Builds the HTTP client and initializes storage
    ///
    /// A storage failure here is fatal and propagates to the caller.
    pub fn new(config: Config) -> Result<Self> {
        let store = SqliteStore::new(Path::new(&config.output.database_path));
        store.init()?;

        let client = build_http_client(&config.http)?;

        Ok(Self {
            config: Arc::new(config),
            store: Arc::new(store),
            client,
        })
    }

    /// Runs collect → filter → fetch → report
    ///
    /// An empty collection still proceeds through filtering; zero new URLs
    /// skips detail fetching entirely.
    pub async fn run(&self) -> Result<RunSummary> {
        let started = Instant::now();
        let count_before = self.store.count_listings()?;

        let links = collect_links(&self.client, &self.config).await?;

        tracing::info!("Filtering against known URLs");
        let new_urls = self.store.filter_unknown(&links)?;
        tracing::info!("Found {} new URLs to process", new_urls.len());

        let failed = if new_urls.is_empty() {
            tracing::info!("No new URLs to process");
            Vec::new()
        } else {
            fetch_details(
                &self.client,
                new_urls.clone(),
                Arc::clone(&self.config),
                Arc::clone(&self.store),
            )
            .await?
        };

        let report_path = Path::new(&self.config.output.failed_urls_path);
        write_failed_urls(report_path, &failed).map_err(|source| ScraperError::Report {
            path: self.config.output.failed_urls_path.clone(),
            source,
        })?;

        if failed.is_empty() {
            tracing::info!("All URLs processed successfully");
        } else {
            tracing::warn!(
                "{} URLs failed after all retries, saved to {}",
                failed.len(),
                self.config.output.failed_urls_path
            );
        }

        let summary = RunSummary {
            links_found: links.len(),
            new_urls: new_urls.len(),
            saved: self.store.count_listings()? - count_before,
            failed: failed.len(),
        };

        tracing::info!(
            "Run finished in {:.1?}: {} links, {} new, {} saved, {} failed",
            started.elapsed(),
            summary.links_found,
            summary.new_urls,
            summary.saved,
            summary.failed
        );

        Ok(summary)
    }
}

/// Convenience entry point: build a coordinator and run it
pub async fn run_scrape(config: Config) -> Result<RunSummary> {
    let coordinator = Coordinator::new(config)?;
    coordinator.run().await
}
