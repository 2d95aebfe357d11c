/// A single persisted listing, keyed by URL
///
/// Every field except the URL is best-effort: missing markup leaves the
/// field absent rather than failing record construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingRecord {
    pub url: String,
    pub title: Option<String>,
    pub price: Option<i64>,
    pub published_time: Option<String>,
    pub published_date: Option<String>,
    pub seller_name: Option<String>,
    pub location: Option<String>,
    pub division: Option<String>,
    pub condition: Option<String>,
    pub model: Option<String>,
    pub brand: Option<String>,
    pub features: Option<String>,
    pub description: Option<String>,
    pub image_urls: Vec<String>,
    /// "YYYY-MM-DD" of the scrape, not business data
    pub scraped_date: String,
}
