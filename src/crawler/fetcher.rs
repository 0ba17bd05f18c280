//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the scraper, including:
//! - Building the HTTP client with the configured user agent string
//! - GET requests for listing and detail pages
//! - Classifying transport and status failures into the crate error taxonomy

use crate::config::{CrawlerConfig, UserAgentConfig};
use crate::ScrapeError;
use reqwest::Client;
use std::time::Duration;

/// Builds the shared HTTP client
///
/// The client carries the user agent string, the per-request timeout, and a
/// shorter connect timeout. A single clone-friendly client is shared by all
/// workers, so a stalled request can never hold anything but its own task.
///
/// # Arguments
///
/// * `user_agent` - The user agent configuration
/// * `crawler` - The crawler configuration (timeout source)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    crawler: &CrawlerConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(crawler.request_timeout))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page body
///
/// # Failure classification
///
/// | Condition | Error |
/// |-----------|-------|
/// | Timeout, connect failure, DNS | `Transport` |
/// | Non-2xx status | `HttpStatus` |
/// | Body could not be read | `Parse` |
///
/// No retries: a failed fetch is recorded as a loss for that page.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, ScrapeError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| ScrapeError::Transport {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::HttpStatus {
            url: url.to_string(),
            code: status.as_u16(),
        });
    }

    response.text().await.map_err(|e| ScrapeError::Parse {
        url: url.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_user_agent() -> UserAgentConfig {
        UserAgentConfig {
            crawler_name: "TestScraper".to_string(),
            crawler_version: "1.0".to_string(),
            contact_url: "https://example.com/about".to_string(),
            contact_email: "admin@example.com".to_string(),
        }
    }

    fn create_test_crawler_config() -> CrawlerConfig {
        CrawlerConfig {
            max_concurrent_listings: 4,
            max_concurrent_details: 8,
            request_timeout: 30,
            max_consecutive_page_failures: 3,
            max_pages_per_listing: 500,
        }
    }

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&create_test_user_agent(), &create_test_crawler_config());
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_classifies_connect_failure_as_transport() {
        let client =
            build_http_client(&create_test_user_agent(), &create_test_crawler_config()).unwrap();

        // Reserved TEST-NET-1 address, nothing listens there
        let result = fetch_page(&client, "http://192.0.2.1:9/").await;
        assert!(matches!(result, Err(ScrapeError::Transport { .. })));
    }
}
