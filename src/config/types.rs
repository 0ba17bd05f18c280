use serde::Deserialize;

/// Main configuration structure for Wam-Scrape
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Base URL of the building directory; listing and detail URLs are
    /// derived from it
    #[serde(rename = "base-url")]
    pub base_url: String,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of listings walked concurrently
    #[serde(rename = "max-concurrent-listings")]
    pub max_concurrent_listings: u32,

    /// Maximum number of detail pages fetched concurrently
    #[serde(rename = "max-concurrent-details")]
    pub max_concurrent_details: u32,

    /// Per-request timeout in seconds
    #[serde(rename = "request-timeout")]
    pub request_timeout: u64,

    /// Consecutive failed pages after which a listing walk is abandoned
    #[serde(rename = "max-consecutive-page-failures")]
    pub max_consecutive_page_failures: u32,

    /// Hard cap on pages requested per listing
    #[serde(rename = "max-pages-per-listing")]
    pub max_pages_per_listing: u32,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the scraper
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the scraper
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the scraper
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for scraper-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path the exported CSV is written to
    #[serde(rename = "csv-path")]
    pub csv_path: String,
}

impl UserAgentConfig {
    /// Formats the user agent string sent with every request.
    /// Format: CrawlerName/Version (+ContactURL; ContactEmail)
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}
