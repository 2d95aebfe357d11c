//! Listing-link collection from paginated index pages
//!
//! Index pages are cheap to miss: a failed page contributes nothing and is
//! never retried. Coverage is bounded by the configured page count, not
//! catalog exhaustion.

use crate::config::Config;
use crate::crawler::fetcher::{fetch_page, FetchOutcome};
use crate::Result;
use reqwest::Client;
use scraper::{Html, Selector};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use url::Url;

/// Fetches every index page in `[1, max_pages]` and aggregates detail-page
/// URLs
///
/// All page fetches share one concurrency limiter sized by
/// `page_concurrency`. Result order is unspecified.
pub async fn collect_links(client: &Client, config: &Config) -> Result<Vec<String>> {
    tracing::info!(
        "Collecting listing links from {} index pages",
        config.crawl.max_pages
    );

    let base = Url::parse(&config.site.base_url)?;
    let semaphore = Arc::new(Semaphore::new(config.crawl.page_concurrency));
    let mut tasks: JoinSet<Vec<String>> = JoinSet::new();

    for page in 1..=config.crawl.max_pages {
        let client = client.clone();
        let semaphore = Arc::clone(&semaphore);
        let base = base.clone();
        let url = format!("{}{}", config.site.index_url_template, page);

        tasks.spawn(async move {
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => return Vec::new(),
            };
            collect_page(&client, &url, page, &base).await
        });
    }

    let mut links = Vec::new();
    while let Some(result) = tasks.join_next().await {
        links.extend(result?);
    }

    tracing::info!("Total links collected: {}", links.len());
    Ok(links)
}

/// Fetches one index page; any failure yields an empty contribution
async fn collect_page(client: &Client, url: &str, page: u32, base: &Url) -> Vec<String> {
    match fetch_page(client, url).await {
        FetchOutcome::Success { body } => {
            let links = parse_index_page(&body, base);
            tracing::info!("Page {}: found {} links", page, links.len());
            links
        }
        FetchOutcome::HttpStatus(status) => {
            tracing::warn!("Skipping page {}, HTTP status: {}", page, status);
            Vec::new()
        }
        FetchOutcome::Timeout => {
            tracing::error!("Timeout error on page {}", page);
            Vec::new()
        }
        FetchOutcome::Transport(error) => {
            tracing::error!("Error scraping page {}: {}", page, error);
            Vec::new()
        }
    }
}

/// Extracts detail-page URLs from the index list container
///
/// Relative hrefs resolve against the site's base origin.
pub fn parse_index_page(html: &str, base: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    let Ok(list_selector) = Selector::parse(r#"ul[data-testid="list"]"#) else {
        return links;
    };
    let Ok(anchor_selector) = Selector::parse("li a[href]") else {
        return links;
    };

    if let Some(list) = document.select(&list_selector).next() {
        for anchor in list.select(&anchor_selector) {
            if let Some(href) = anchor.value().attr("href") {
                match base.join(href) {
                    Ok(resolved) => links.push(resolved.to_string()),
                    Err(e) => tracing::debug!("Skipping unresolvable href {:?}: {}", href, e),
                }
            }
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://bikroy.com").unwrap()
    }

    #[test]
    fn test_parse_index_page_resolves_relative_hrefs() {
        let html = r#"
            <ul data-testid="list">
                <li><a href="/bn/ad/phone-1">Phone 1</a></li>
                <li><a href="/bn/ad/phone-2">Phone 2</a></li>
            </ul>
        "#;
        let links = parse_index_page(html, &base());
        assert_eq!(
            links,
            vec![
                "https://bikroy.com/bn/ad/phone-1".to_string(),
                "https://bikroy.com/bn/ad/phone-2".to_string(),
            ]
        );
    }

    #[test]
    fn test_parse_index_page_keeps_absolute_hrefs() {
        let html = r#"
            <ul data-testid="list">
                <li><a href="https://other.example/ad/x">X</a></li>
            </ul>
        "#;
        let links = parse_index_page(html, &base());
        assert_eq!(links, vec!["https://other.example/ad/x".to_string()]);
    }

    #[test]
    fn test_parse_index_page_ignores_other_lists() {
        let html = r#"
            <ul class="nav"><li><a href="/nav-item">Nav</a></li></ul>
            <ul data-testid="list"><li><a href="/bn/ad/real">Real</a></li></ul>
        "#;
        let links = parse_index_page(html, &base());
        assert_eq!(links, vec!["https://bikroy.com/bn/ad/real".to_string()]);
    }

    #[test]
    fn test_parse_index_page_without_list_container() {
        let links = parse_index_page("<html><body>no list here</body></html>", &base());
        assert!(links.is_empty());
    }

    #[test]
    fn test_parse_index_page_skips_items_without_anchor() {
        let html = r#"
            <ul data-testid="list">
                <li><span>promoted placeholder</span></li>
                <li><a href="/bn/ad/only">Only</a></li>
            </ul>
        "#;
        let links = parse_index_page(html, &base());
        assert_eq!(links, vec!["https://bikroy.com/bn/ad/only".to_string()]);
    }
}
