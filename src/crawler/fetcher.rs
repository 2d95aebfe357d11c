//! HTTP fetching
//!
//! Builds the shared HTTP client from the configured headers and timeout,
//! and classifies each fetch into the outcomes the retry policy cares about.

use crate::config::HttpConfig;
use crate::ScraperError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER};
use reqwest::Client;
use std::time::Duration;

/// Result of fetching one page
#[derive(Debug)]
pub enum FetchOutcome {
    /// 2xx response with its body
    Success { body: String },

    /// Server answered with a non-success status; never retried
    HttpStatus(u16),

    /// Request or body read timed out; retryable
    Timeout,

    /// Transport-level failure (connection reset, DNS, TLS); retryable
    Transport(String),
}

/// Builds the HTTP client used for both index and detail fetches
pub fn build_http_client(config: &HttpConfig) -> Result<Client, ScraperError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_str(&config.accept)?);
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_str(&config.accept_language)?,
    );
    if let Some(referer) = &config.referer {
        headers.insert(REFERER, HeaderValue::from_str(referer)?);
    }

    let client = Client::builder()
        .user_agent(config.user_agent.clone())
        .default_headers(headers)
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(config.request_timeout_secs.min(10)))
        .gzip(true)
        .brotli(true)
        .build()?;

    Ok(client)
}

/// Fetches a URL and classifies the result
///
/// Retry decisions live with the caller; this function never retries.
pub async fn fetch_page(client: &Client, url: &str) -> FetchOutcome {
    match client.get(url).send().await {
        Ok(response) => {
            let status = response.status();
            if !status.is_success() {
                return FetchOutcome::HttpStatus(status.as_u16());
            }

            match response.text().await {
                Ok(body) => FetchOutcome::Success { body },
                Err(e) if e.is_timeout() => FetchOutcome::Timeout,
                Err(e) => FetchOutcome::Transport(e.to_string()),
            }
        }
        Err(e) if e.is_timeout() => FetchOutcome::Timeout,
        Err(e) => FetchOutcome::Transport(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HttpConfig;

    #[test]
    fn test_build_http_client_with_defaults() {
        let config = HttpConfig::default();
        assert!(build_http_client(&config).is_ok());
    }

    #[test]
    fn test_build_http_client_with_referer() {
        let config = HttpConfig {
            referer: Some("https://bikroy.com/".to_string()),
            ..HttpConfig::default()
        };
        assert!(build_http_client(&config).is_ok());
    }

    #[test]
    fn test_build_http_client_rejects_bad_header() {
        let config = HttpConfig {
            accept: "bad\nvalue".to_string(),
            ..HttpConfig::default()
        };
        assert!(build_http_client(&config).is_err());
    }

    #[tokio::test]
    async fn test_fetch_classifies_http_status() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = build_http_client(&HttpConfig::default()).unwrap();
        let outcome = fetch_page(&client, &server.uri()).await;
        assert!(matches!(outcome, FetchOutcome::HttpStatus(404)));
    }

    #[tokio::test]
    async fn test_fetch_classifies_transport_error() {
        // Nothing listens on this port
        let client = build_http_client(&HttpConfig::default()).unwrap();
        let outcome = fetch_page(&client, "http://127.0.0.1:9/").await;
        assert!(matches!(outcome, FetchOutcome::Transport(_)));
    }
}
