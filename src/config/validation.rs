use crate::config::types::{Config, CrawlConfig, LocaleConfig, OutputConfig, SiteConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_crawl_config(&config.crawl)?;
    validate_locale_config(&config.locale)?;
    validate_output_config(&config.output)?;

    if config.http.request_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "request_timeout_secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates site URLs
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;

    // The template must itself be a valid URL; the page number is appended
    Url::parse(&config.index_url_template)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid index_url_template: {}", e)))?;

    Ok(())
}

/// Validates crawl parameters
fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if config.page_concurrency < 1 || config.page_concurrency > 100 {
        return Err(ConfigError::Validation(format!(
            "page_concurrency must be between 1 and 100, got {}",
            config.page_concurrency
        )));
    }

    if config.detail_concurrency < 1 || config.detail_concurrency > 100 {
        return Err(ConfigError::Validation(format!(
            "detail_concurrency must be between 1 and 100, got {}",
            config.detail_concurrency
        )));
    }

    if config.retry_wait_min_secs > config.retry_wait_max_secs {
        return Err(ConfigError::Validation(format!(
            "retry_wait_min_secs ({}) must be <= retry_wait_max_secs ({})",
            config.retry_wait_min_secs, config.retry_wait_max_secs
        )));
    }

    Ok(())
}

/// Validates the locale translation tables
fn validate_locale_config(config: &LocaleConfig) -> Result<(), ConfigError> {
    let digit_count = config.digits.chars().count();
    if digit_count != 10 {
        return Err(ConfigError::Validation(format!(
            "locale digits must contain exactly 10 characters in 0-9 order, got {}",
            digit_count
        )));
    }

    if config.months.len() != 12 {
        return Err(ConfigError::Validation(format!(
            "locale months must contain exactly 12 entries, got {}",
            config.months.len()
        )));
    }

    if config.posted_marker.is_empty() {
        return Err(ConfigError::Validation(
            "posted_marker cannot be empty".to_string(),
        ));
    }

    if config.labels.is_empty() {
        return Err(ConfigError::Validation(
            "locale labels cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output paths
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database_path cannot be empty".to_string(),
        ));
    }

    if config.failed_urls_path.is_empty() {
        return Err(ConfigError::Validation(
            "failed_urls_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::HttpConfig;

    fn valid_config() -> Config {
        Config {
            site: SiteConfig {
                base_url: "https://bikroy.com".to_string(),
                index_url_template: "https://bikroy.com/bn/ads/bangladesh/mobiles?page="
                    .to_string(),
            },
            http: HttpConfig::default(),
            crawl: CrawlConfig {
                max_pages: 10,
                page_concurrency: 5,
                detail_concurrency: 10,
                max_retries: 3,
                retry_wait_min_secs: 1,
                retry_wait_max_secs: 2,
            },
            locale: LocaleConfig::default(),
            output: OutputConfig {
                database_path: "./data/listings.db".to_string(),
                failed_urls_path: "./data/failed_urls.txt".to_string(),
            },
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_zero_page_concurrency_rejected() {
        let mut config = valid_config();
        config.crawl.page_concurrency = 0;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_inverted_retry_bounds_rejected() {
        let mut config = valid_config();
        config.crawl.retry_wait_min_secs = 10;
        config.crawl.retry_wait_max_secs = 5;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_short_digit_table_rejected() {
        let mut config = valid_config();
        config.locale.digits = "০১২".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let mut config = valid_config();
        config.site.base_url = "not a url".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_empty_database_path_rejected() {
        let mut config = valid_config();
        config.output.database_path = String::new();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }
}
