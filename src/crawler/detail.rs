//! Detail-page fetching with bounded retry
//!
//! Each URL gets at most `1 + max_retries` fetch attempts. Timeouts and
//! transport errors are retried after a randomized wait; a non-success
//! HTTP status is a permanent per-URL outcome for the run and is neither
//! retried nor counted as a failure. Retries run on the permit the task
//! already holds, so they never add fan-out.

use crate::config::Config;
use crate::crawler::fetcher::{fetch_page, FetchOutcome};
use crate::extract::extract_listing;
use crate::storage::{ListingStore, SqliteStore};
use crate::Result;
use rand::Rng;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Fetches, extracts, and persists every URL; returns the URLs that
/// exhausted their retries (or could not be persisted)
///
/// Runs under its own concurrency limiter sized by `detail_concurrency`,
/// independent of the index-page limiter. Each task owns its failure; the
/// failed list is only assembled after all tasks complete.
pub async fn fetch_details(
    client: &Client,
    urls: Vec<String>,
    config: Arc<Config>,
    store: Arc<SqliteStore>,
) -> Result<Vec<String>> {
    tracing::info!("Fetching details for {} URLs", urls.len());

    let semaphore = Arc::new(Semaphore::new(config.crawl.detail_concurrency));
    let mut tasks: JoinSet<Option<String>> = JoinSet::new();

    for url in urls {
        let client = client.clone();
        let config = Arc::clone(&config);
        let store = Arc::clone(&store);
        let semaphore = Arc::clone(&semaphore);

        tasks.spawn(async move {
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => return Some(url),
            };
            process_listing(&client, &url, &config, store.as_ref()).await
        });
    }

    let mut failed = Vec::new();
    while let Some(result) = tasks.join_next().await {
        if let Some(url) = result? {
            failed.push(url);
        }
    }

    Ok(failed)
}

/// Processes one listing URL; `Some(url)` marks it failed for this run
async fn process_listing(
    client: &Client,
    url: &str,
    config: &Config,
    store: &SqliteStore,
) -> Option<String> {
    let max_retries = config.crawl.max_retries;

    for attempt in 0..=max_retries {
        match fetch_page(client, url).await {
            FetchOutcome::Success { body } => {
                let now = chrono::Local::now().naive_local();
                let record = extract_listing(&body, url, &config.locale, now);

                match store.upsert(&record) {
                    Ok(true) => {
                        tracing::debug!("Saved listing {}", url);
                        return None;
                    }
                    Ok(false) => {
                        tracing::debug!("Listing {} already stored, keeping existing row", url);
                        return None;
                    }
                    Err(e) => {
                        tracing::error!("Failed to save {}: {}", url, e);
                        return Some(url.to_string());
                    }
                }
            }
            FetchOutcome::HttpStatus(status) => {
                tracing::warn!("Skipping URL {}, HTTP status: {}", url, status);
                return None;
            }
            FetchOutcome::Timeout => {
                tracing::error!(
                    "Timeout error for {} (attempt {}/{})",
                    url,
                    attempt + 1,
                    max_retries + 1
                );
            }
            FetchOutcome::Transport(error) => {
                tracing::error!(
                    "Error scraping {} (attempt {}/{}): {}",
                    url,
                    attempt + 1,
                    max_retries + 1,
                    error
                );
            }
        }

        if attempt < max_retries {
            let wait_secs = rand::thread_rng().gen_range(
                config.crawl.retry_wait_min_secs..=config.crawl.retry_wait_max_secs,
            );
            tracing::info!("Retrying {} in {} seconds...", url, wait_secs);
            tokio::time::sleep(Duration::from_secs(wait_secs)).await;
        }
    }

    tracing::error!("Failed after {} attempts: {}", max_retries + 1, url);
    Some(url.to_string())
}
