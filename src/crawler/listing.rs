//! Listing page parser
//!
//! A listing page carries a table of buildings (`#buildings-tbl`); every data
//! row links to one building's detail page. This module turns one listing
//! page into the ordered set of detail URLs it contains.

use crate::crawler::fetcher::fetch_page;
use crate::crawler::text::string_between;
use crate::ScrapeError;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};

/// Fetches a listing page and extracts its detail URLs
///
/// Transport, status, and body failures propagate; individual malformed rows
/// are skipped with a warning and never abort the page. The returned vector
/// may be empty, which is the pagination-termination signal.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `page_url` - The listing page to fetch
/// * `base_url` - Prefix for the href fragments found in the rows
pub async fn parse_listing_page(
    client: &Client,
    page_url: &str,
    base_url: &str,
) -> Result<Vec<String>, ScrapeError> {
    let body = fetch_page(client, page_url).await?;
    Ok(parse_listing_document(&body, base_url))
}

/// Extracts detail URLs from listing page markup
///
/// The table's first element child is the row container; its first row is
/// the header and is always skipped. This is a structural assumption about
/// the target markup, not configurable.
pub fn parse_listing_document(html: &str, base_url: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut urls = Vec::new();

    let Ok(table_selector) = Selector::parse("#buildings-tbl") else {
        return urls;
    };
    let Some(table) = document.select(&table_selector).next() else {
        // No buildings table on the page: zero rows, not an error
        return urls;
    };
    let Some(row_container) = child_elements(table).next() else {
        return urls;
    };

    for (index, row) in child_elements(row_container).enumerate() {
        // Row 0 is the table heading
        if index == 0 {
            continue;
        }

        match detail_href(row) {
            Some(href) => urls.push(format!("{}{}", base_url, href)),
            None => {
                tracing::warn!("Could not parse listing row {}: no quoted href", index);
            }
        }
    }

    urls
}

/// Pulls the href out of a row's first cell
///
/// The cell's inner markup is scanned for the substring between the first
/// `"` and the next `"`, which is the href of the anchor tag. Position
/// dependent, matching the site's markup.
fn detail_href(row: ElementRef) -> Option<String> {
    let cell = child_elements(row).next()?;
    let markup = cell.inner_html();
    let href = string_between(&markup, "\"", "\"");
    if href.is_empty() {
        return None;
    }
    Some(href.to_string())
}

/// Element children of a node, skipping text and comment nodes
pub(crate) fn child_elements<'a>(
    element: ElementRef<'a>,
) -> impl Iterator<Item = ElementRef<'a>> {
    element.children().filter_map(ElementRef::wrap)
}
