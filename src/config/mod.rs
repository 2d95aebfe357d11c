//! Configuration loading and validation
//!
//! The scraper is driven by a single TOML file describing the target site,
//! HTTP headers, concurrency ceilings, locale translation tables, and
//! output paths. The Bangla tables ship as defaults so a minimal config
//! only needs the site, crawl, and output sections.

mod parser;
mod types;
mod validation;

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use types::{
    Config, CrawlConfig, HttpConfig, LabeledField, LocaleConfig, OutputConfig, SiteConfig,
    TokenPair,
};
pub use validation::validate;
