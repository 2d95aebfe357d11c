use serde::Deserialize;
use std::collections::HashMap;

/// Main configuration structure for the scraper
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    #[serde(default)]
    pub http: HttpConfig,
    pub crawl: CrawlConfig,
    #[serde(default)]
    pub locale: LocaleConfig,
    pub output: OutputConfig,
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Base origin used to resolve relative listing hrefs
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Paginated index URL; the page number is appended to this template
    #[serde(rename = "index-url-template")]
    pub index_url_template: String,
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    pub accept: String,

    #[serde(rename = "accept-language")]
    pub accept_language: String,

    pub referer: Option<String>,

    /// Per-request timeout in seconds
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                         AppleWebKit/537.36 (KHTML, like Gecko) \
                         Chrome/142.0.0.0 Safari/537.36"
                .to_string(),
            accept: "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8"
                .to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
            referer: None,
            request_timeout_secs: 30,
        }
    }
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// Number of index pages to scan
    #[serde(rename = "max-pages")]
    pub max_pages: u32,

    /// Concurrency ceiling for index-page fetches
    #[serde(rename = "page-concurrency")]
    pub page_concurrency: usize,

    /// Concurrency ceiling for detail-page fetches
    #[serde(rename = "detail-concurrency")]
    pub detail_concurrency: usize,

    /// Maximum retry attempts after the initial detail fetch
    #[serde(rename = "max-retries", default = "default_max_retries")]
    pub max_retries: u32,

    /// Minimum wait between retries, in seconds
    #[serde(rename = "retry-wait-min-secs", default = "default_retry_wait_min")]
    pub retry_wait_min_secs: u64,

    /// Maximum wait between retries, in seconds
    #[serde(rename = "retry-wait-max-secs", default = "default_retry_wait_max")]
    pub retry_wait_max_secs: u64,
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_wait_min() -> u64 {
    60
}

fn default_retry_wait_max() -> u64 {
    120
}

/// A native-script token and its ASCII replacement
#[derive(Debug, Clone, Deserialize)]
pub struct TokenPair {
    pub native: String,
    pub ascii: String,
}

/// Record fields that can be populated from a labeled attribute block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabeledField {
    Condition,
    Model,
    Brand,
}

/// Locale translation tables and site-specific extraction markers
///
/// Defaults to the Bangla tables used by bikroy.com-style markup; every
/// field can be overridden from the config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    /// The ten native-script digits, in 0-9 order
    pub digits: String,

    /// Phrase that precedes the posted-at timestamp in listing markup
    #[serde(rename = "posted-marker")]
    pub posted_marker: String,

    /// Image URLs starting with this prefix are seller avatars, not photos
    #[serde(rename = "avatar-prefix")]
    pub avatar_prefix: String,

    /// Native month abbreviations and their 3-letter ASCII forms
    pub months: Vec<TokenPair>,

    /// Native AM/PM markers
    pub meridiems: Vec<TokenPair>,

    /// Exact label text to record field, for the attribute block
    pub labels: HashMap<String, LabeledField>,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        let pair = |native: &str, ascii: &str| TokenPair {
            native: native.to_string(),
            ascii: ascii.to_string(),
        };

        let mut labels = HashMap::new();
        labels.insert("কন্ডিশন:".to_string(), LabeledField::Condition);
        labels.insert("মডেল:".to_string(), LabeledField::Model);
        labels.insert("ব্র্যান্ড:".to_string(), LabeledField::Brand);

        Self {
            digits: "০১২৩৪৫৬৭৮৯".to_string(),
            posted_marker: "পোস্ট করা হয়েছে".to_string(),
            avatar_prefix: "https://i.bikroy-st.com/u/".to_string(),
            months: vec![
                pair("জানু", "Jan"),
                pair("ফেব", "Feb"),
                pair("মার্চ", "Mar"),
                pair("এপ্রি", "Apr"),
                pair("মে", "May"),
                pair("জুন", "Jun"),
                pair("জুলা", "Jul"),
                pair("আগ", "Aug"),
                pair("সেপ্ট", "Sep"),
                pair("অক্টো", "Oct"),
                pair("নভে", "Nov"),
                pair("ডিসে", "Dec"),
            ],
            meridiems: vec![pair("এএম", "AM"), pair("পিএম", "PM")],
            labels,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path")]
    pub database_path: String,

    /// Path to the newline-delimited failed-URL report
    #[serde(rename = "failed-urls-path")]
    pub failed_urls_path: String,
}
