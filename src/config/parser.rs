use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Used to record which configuration produced a given run.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::LabeledField;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    const MINIMAL_CONFIG: &str = r#"
[site]
base-url = "https://bikroy.com"
index-url-template = "https://bikroy.com/bn/ads/bangladesh/mobiles?page="

[crawl]
max-pages = 5
page-concurrency = 3
detail-concurrency = 6

[output]
database-path = "./data/listings.db"
failed-urls-path = "./data/failed_urls.txt"
"#;

    #[test]
    fn test_load_minimal_config_uses_defaults() {
        let file = create_temp_config(MINIMAL_CONFIG);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawl.max_pages, 5);
        assert_eq!(config.crawl.max_retries, 3);
        assert_eq!(config.crawl.retry_wait_min_secs, 60);
        assert_eq!(config.crawl.retry_wait_max_secs, 120);
        assert_eq!(config.http.request_timeout_secs, 30);

        // Bangla defaults kick in when [locale] is omitted
        assert_eq!(config.locale.digits.chars().count(), 10);
        assert_eq!(config.locale.months.len(), 12);
        assert_eq!(
            config.locale.labels.get("কন্ডিশন:"),
            Some(&LabeledField::Condition)
        );
    }

    #[test]
    fn test_load_config_with_locale_override() {
        let content = format!(
            "{}\n[locale]\nposted-marker = \"Posted on\"\n",
            MINIMAL_CONFIG
        );
        let file = create_temp_config(&content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.locale.posted_marker, "Posted on");
        // The rest of the locale section falls back to defaults
        assert_eq!(config.locale.months.len(), 12);
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let content = MINIMAL_CONFIG.replace("page-concurrency = 3", "page-concurrency = 0");
        let file = create_temp_config(&content);
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }

    #[test]
    fn test_unknown_label_field_rejected() {
        let content = format!(
            "{}\n[locale.labels]\n\"রং:\" = \"color\"\n",
            MINIMAL_CONFIG
        );
        let file = create_temp_config(&content);
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Parse(_)));
    }

    #[test]
    fn test_compute_config_hash() {
        let file = create_temp_config("test content");

        let hash1 = compute_config_hash(file.path()).unwrap();
        let hash2 = compute_config_hash(file.path()).unwrap();

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_different_content_different_hash() {
        let file1 = create_temp_config("content 1");
        let file2 = create_temp_config("content 2");

        let hash1 = compute_config_hash(file1.path()).unwrap();
        let hash2 = compute_config_hash(file2.path()).unwrap();

        assert_ne!(hash1, hash2);
    }
}
