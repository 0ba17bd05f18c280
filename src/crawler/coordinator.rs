//! Crawl coordinator - main harvest orchestration logic
//!
//! The coordinator owns the two-phase batch pass:
//! 1. Discovery: walk every listing (the global one plus one per letter)
//!    through a bounded worker pool and merge the detail URLs.
//! 2. Extraction: fetch every discovered detail page through a second
//!    bounded pool, collecting successes and logging failures.
//!
//! Workers never share mutable state; each task returns its own results and
//! the coordinator performs the merge.

use crate::building::Building;
use crate::config::Config;
use crate::crawler::detail::extract_building;
use crate::crawler::fetcher::build_http_client;
use crate::crawler::pagination::{append_query, walk_listing};
use crate::ScrapeError;
use reqwest::Client;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Progress log cadence during the extraction phase
const PROGRESS_EVERY: usize = 100;

/// Main harvest coordinator structure
pub struct Coordinator {
    config: Arc<Config>,
    client: Client,
}

impl Coordinator {
    /// Creates a new coordinator from a validated configuration
    pub fn new(config: Config) -> Result<Self, ScrapeError> {
        let client = build_http_client(&config.user_agent, &config.crawler)?;

        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }

    /// The full listing URL set: the unparameterized base listing plus one
    /// listing per letter `a`-`z`.
    pub fn listing_urls(&self) -> Vec<String> {
        let base = &self.config.site.base_url;
        let mut urls = Vec::with_capacity(27);
        urls.push(base.clone());
        for letter in 'a'..='z' {
            urls.push(append_query(base, &format!("letter={}", letter)));
        }
        urls
    }

    /// Runs the full harvest: discover, extract, and return the records
    ///
    /// Listing- and page-level failures are logged and skipped. The returned
    /// collection's ordering is not guaranteed to match discovery order.
    pub async fn run(&self) -> Result<Vec<Building>, ScrapeError> {
        let start_time = std::time::Instant::now();

        let detail_urls = self.discover_detail_urls().await;
        tracing::info!(
            "Finished getting all the building urls. Total urls collected: {}",
            detail_urls.len()
        );

        let buildings = self.extract_buildings(detail_urls).await;
        tracing::info!(
            "Harvest completed: {} buildings extracted in {:?}",
            buildings.len(),
            start_time.elapsed()
        );

        Ok(buildings)
    }

    /// Phase 1: walk every listing concurrently and merge the detail URLs
    ///
    /// Duplicate URLs discovered across listings are collapsed here, first
    /// occurrence wins, so each detail page is fetched at most once.
    async fn discover_detail_urls(&self) -> Vec<String> {
        tracing::info!("Starting to get all building urls");

        let semaphore = Arc::new(Semaphore::new(
            self.config.crawler.max_concurrent_listings as usize,
        ));
        let mut tasks = JoinSet::new();

        for listing_url in self.listing_urls() {
            let semaphore = Arc::clone(&semaphore);
            let client = self.client.clone();
            let config = Arc::clone(&self.config);

            tasks.spawn(async move {
                // Closed only on runtime shutdown
                let _permit = semaphore.acquire_owned().await;
                let urls = walk_listing(
                    &client,
                    &listing_url,
                    &config.site.base_url,
                    &config.crawler,
                )
                .await;
                tracing::info!("Collected {} building urls from {}", urls.len(), listing_url);
                urls
            });
        }

        let mut seen = HashSet::new();
        let mut detail_urls = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(urls) => {
                    for url in urls {
                        if seen.insert(url.clone()) {
                            detail_urls.push(url);
                        }
                    }
                }
                Err(e) => {
                    tracing::error!("Listing walker task failed: {}", e);
                }
            }
        }
        detail_urls
    }

    /// Phase 2: extract every detail page concurrently
    ///
    /// A failed extraction is logged with its URL and excluded; it never
    /// cancels sibling work, and there are no retries.
    async fn extract_buildings(&self, detail_urls: Vec<String>) -> Vec<Building> {
        tracing::info!(
            "Starting to download information for {} buildings",
            detail_urls.len()
        );
        let total = detail_urls.len();

        let semaphore = Arc::new(Semaphore::new(
            self.config.crawler.max_concurrent_details as usize,
        ));
        let mut tasks = JoinSet::new();

        for url in detail_urls {
            let semaphore = Arc::clone(&semaphore);
            let client = self.client.clone();

            tasks.spawn(async move {
                let _permit = semaphore.acquire_owned().await;
                let result = extract_building(&client, &url).await;
                (url, result)
            });
        }

        let mut buildings = Vec::new();
        let mut completed = 0usize;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((_, Ok(building))) => buildings.push(building),
                Ok((url, Err(e))) => {
                    tracing::warn!("Error when parsing {}: {}", url, e);
                }
                Err(e) => {
                    tracing::error!("Extraction task failed: {}", e);
                }
            }

            completed += 1;
            if completed % PROGRESS_EVERY == 0 {
                tracing::info!("Downloaded information from {}/{} buildings", completed, total);
            }
        }

        buildings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CrawlerConfig, OutputConfig, SiteConfig, UserAgentConfig};

    fn create_test_config(base_url: &str) -> Config {
        Config {
            site: SiteConfig {
                base_url: base_url.to_string(),
            },
            crawler: CrawlerConfig {
                max_concurrent_listings: 4,
                max_concurrent_details: 8,
                request_timeout: 5,
                max_consecutive_page_failures: 3,
                max_pages_per_listing: 50,
            },
            user_agent: UserAgentConfig {
                crawler_name: "TestScraper".to_string(),
                crawler_version: "1.0".to_string(),
                contact_url: "https://example.com/about".to_string(),
                contact_email: "admin@example.com".to_string(),
            },
            output: OutputConfig {
                csv_path: "./test-export.csv".to_string(),
            },
        }
    }

    #[test]
    fn test_listing_urls_cover_base_and_alphabet() {
        let config = create_test_config("http://example.com/buildings/");
        let coordinator = Coordinator::new(config).unwrap();

        let urls = coordinator.listing_urls();
        assert_eq!(urls.len(), 27);
        assert_eq!(urls[0], "http://example.com/buildings/");
        assert_eq!(urls[1], "http://example.com/buildings/?letter=a");
        assert_eq!(urls[26], "http://example.com/buildings/?letter=z");
    }

    #[test]
    fn test_listing_urls_respect_existing_query() {
        let config = create_test_config("http://example.com/buildings/?lang=en");
        let coordinator = Coordinator::new(config).unwrap();

        let urls = coordinator.listing_urls();
        assert_eq!(urls[1], "http://example.com/buildings/?lang=en&letter=a");
    }
}
