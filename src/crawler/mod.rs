//! Crawling pipeline
//!
//! Two bounded fetch stages run back to back: the collector fans out over
//! index pages under one concurrency ceiling, and the detail fetcher fans
//! out over listing pages under a separate, independently sized ceiling.
//! The coordinator ties them together with storage and reporting.

mod collector;
mod coordinator;
mod detail;
mod fetcher;

pub use collector::{collect_links, parse_index_page};
pub use coordinator::{run_scrape, Coordinator, RunSummary};
pub use detail::fetch_details;
pub use fetcher::{build_http_client, fetch_page, FetchOutcome};
