//! Crawler module for listing discovery and detail extraction
//!
//! This module contains the core scraping logic, including:
//! - HTTP fetching with failure classification
//! - Listing page parsing and pagination walking
//! - Detail page field extraction
//! - Overall harvest coordination

mod coordinator;
mod detail;
mod fetcher;
mod listing;
mod pagination;
mod text;

pub use coordinator::Coordinator;
pub use detail::{extract_building, extract_building_document};
pub use fetcher::{build_http_client, fetch_page};
pub use listing::{parse_listing_document, parse_listing_page};
pub use pagination::walk_listing;

use crate::building::Building;
use crate::config::Config;
use crate::ScrapeError;

/// Runs a complete harvest operation
///
/// This is the main entry point for a batch pass. It will:
/// 1. Build the HTTP client
/// 2. Walk the global listing and every per-letter listing
/// 3. Extract a record from every discovered detail page
/// 4. Return the collected records, ready for export
///
/// # Arguments
///
/// * `config` - The scraper configuration
///
/// # Returns
///
/// * `Ok(Vec<Building>)` - The harvested records
/// * `Err(ScrapeError)` - Harvest could not start
pub async fn harvest(config: Config) -> Result<Vec<Building>, ScrapeError> {
    let coordinator = Coordinator::new(config)?;
    coordinator.run().await
}
