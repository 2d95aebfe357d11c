//! Haatbazar main entry point
//!
//! Command-line interface for the classified-ads listing scraper.

use clap::Parser;
use haatbazar::config::load_config_with_hash;
use haatbazar::crawler::run_scrape;
use haatbazar::output::print_store_stats;
use haatbazar::storage::{ListingStore, SqliteStore};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Haatbazar: a concurrent classified-ads listing scraper
///
/// Scans a paginated catalog for listing links, fetches each new listing's
/// detail page, extracts structured fields from Bangla-locale markup, and
/// persists records to SQLite.
#[derive(Parser, Debug)]
#[command(name = "haatbazar")]
#[command(version = "0.1.0")]
#[command(about = "A concurrent classified-ads listing scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be scraped without scraping
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show statistics from the listing store and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            cfg
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.stats {
        handle_stats(&config)?;
    } else {
        handle_scrape(config).await?;
    }

    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("haatbazar=info,warn"),
            1 => EnvFilter::new("haatbazar=debug,info"),
            2 => EnvFilter::new("haatbazar=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows the plan
fn handle_dry_run(config: &haatbazar::Config) {
    println!("=== Haatbazar Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);
    println!("  Index template: {}", config.site.index_url_template);

    println!("\nCrawl:");
    println!("  Index pages: {}", config.crawl.max_pages);
    println!("  Page concurrency: {}", config.crawl.page_concurrency);
    println!("  Detail concurrency: {}", config.crawl.detail_concurrency);
    println!("  Max retries: {}", config.crawl.max_retries);
    println!(
        "  Retry wait: {}-{}s",
        config.crawl.retry_wait_min_secs, config.crawl.retry_wait_max_secs
    );
    println!(
        "  Request timeout: {}s",
        config.http.request_timeout_secs
    );

    println!("\nLocale:");
    println!("  Digit table: {}", config.locale.digits);
    println!("  Months: {} entries", config.locale.months.len());
    println!("  Labels: {} entries", config.locale.labels.len());

    println!("\nOutput:");
    println!("  Database: {}", config.output.database_path);
    println!("  Failed-URL report: {}", config.output.failed_urls_path);

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would scan {} index pages for new listings",
        config.crawl.max_pages
    );
}

/// Handles the --stats mode: shows statistics from the listing store
fn handle_stats(config: &haatbazar::Config) -> anyhow::Result<()> {
    use std::path::Path;

    println!("Database: {}\n", config.output.database_path);

    let store = SqliteStore::new(Path::new(&config.output.database_path));
    store.init()?;
    print_store_stats(&store)?;

    Ok(())
}

/// Handles the main scrape operation
async fn handle_scrape(config: haatbazar::Config) -> anyhow::Result<()> {
    tokio::select! {
        result = run_scrape(config) => match result {
            Ok(summary) => {
                tracing::info!(
                    "Scrape completed successfully: {} links found, {} new, {} saved, {} failed",
                    summary.links_found,
                    summary.new_urls,
                    summary.saved,
                    summary.failed
                );
                Ok(())
            }
            Err(e) => {
                tracing::error!("Scrape failed: {}", e);
                Err(e.into())
            }
        },
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("Scrape interrupted by user");
            Ok(())
        }
    }
}
