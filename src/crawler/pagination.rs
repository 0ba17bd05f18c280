//! Pagination walker
//!
//! Listings are paged; pages are numbered from 1 and retrieved until a page
//! comes back with no rows. Page-level failures are logged and skipped, never
//! fatal to the listing, and two bounds keep a persistently failing listing
//! from looping forever.

use crate::config::CrawlerConfig;
use crate::crawler::listing::parse_listing_page;
use reqwest::Client;

/// Appends a query parameter, using `&` when the URL already carries a query
pub(crate) fn append_query(base_url: &str, param: &str) -> String {
    if base_url.contains('?') {
        format!("{}&{}", base_url, param)
    } else {
        format!("{}?{}", base_url, param)
    }
}

/// The URL of a numbered listing page. Page 1 is the bare listing URL.
fn page_url(listing_url: &str, page: u32) -> String {
    if page <= 1 {
        listing_url.to_string()
    } else {
        append_query(listing_url, &format!("currentpage={}", page))
    }
}

/// Walks every page of one listing and returns all detail URLs found
///
/// Termination: the first page that parses successfully to zero rows. Errors
/// are not the termination signal; the walker logs them and advances to the
/// next page number. However, `max_consecutive_page_failures` consecutive
/// failed pages, or `max_pages_per_listing` pages in total, abandon the
/// listing with a warning.
///
/// Pagination is strictly sequential within a listing: page N+1's URL and
/// the decision to continue both depend on page N.
///
/// Duplicates across pages are preserved in discovery order; the caller
/// decides whether to deduplicate.
pub async fn walk_listing(
    client: &Client,
    listing_url: &str,
    base_url: &str,
    config: &CrawlerConfig,
) -> Vec<String> {
    let mut detail_urls = Vec::new();
    let mut consecutive_failures: u32 = 0;

    for page in 1..=config.max_pages_per_listing {
        let url = page_url(listing_url, page);

        match parse_listing_page(client, &url, base_url).await {
            Ok(urls) => {
                consecutive_failures = 0;
                // Page 1 may legitimately be empty (a letter with no
                // buildings); an empty page always ends the listing.
                if urls.is_empty() {
                    tracing::debug!("Listing {} ended at page {}", listing_url, page);
                    return detail_urls;
                }
                detail_urls.extend(urls);
            }
            Err(e) => {
                tracing::warn!("Error when parsing {}: {}", url, e);
                consecutive_failures += 1;
                if consecutive_failures >= config.max_consecutive_page_failures {
                    tracing::warn!(
                        "Abandoning listing {} after {} consecutive failed pages",
                        listing_url,
                        consecutive_failures
                    );
                    return detail_urls;
                }
            }
        }
    }

    tracing::warn!(
        "Listing {} hit the {}-page cap without an empty page",
        listing_url,
        config.max_pages_per_listing
    );
    detail_urls
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_one_is_bare_url() {
        assert_eq!(
            page_url("http://example.com/buildings/", 1),
            "http://example.com/buildings/"
        );
    }

    #[test]
    fn test_page_two_appends_question_mark() {
        assert_eq!(
            page_url("http://example.com/buildings/", 2),
            "http://example.com/buildings/?currentpage=2"
        );
    }

    #[test]
    fn test_page_param_appends_ampersand_after_existing_query() {
        assert_eq!(
            page_url("http://example.com/buildings/?letter=a", 3),
            "http://example.com/buildings/?letter=a&currentpage=3"
        );
    }

    #[test]
    fn test_append_query_without_existing_query() {
        assert_eq!(
            append_query("http://example.com/buildings/", "letter=z"),
            "http://example.com/buildings/?letter=z"
        );
    }
}
