//! Wam-Scrape main entry point
//!
//! This is the command-line interface for the Wam-Scrape building directory
//! harvester.

use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use wam_scrape::config::load_config;
use wam_scrape::crawler::Coordinator;
use wam_scrape::output::export_buildings;

/// Wam-Scrape: a batch scraper for the World Architecture Map
///
/// Wam-Scrape pages through the site's alphabetical building listings,
/// extracts structured attributes from every building detail page, and
/// exports the aggregated dataset as CSV.
#[derive(Parser, Debug)]
#[command(name = "wam-scrape")]
#[command(version = "1.0.0")]
#[command(about = "Building directory harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = match load_config(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config)?;
    } else {
        handle_harvest(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("wam_scrape=info,warn"),
            1 => EnvFilter::new("wam_scrape=debug,info"),
            2 => EnvFilter::new("wam_scrape=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows the crawl plan
fn handle_dry_run(config: &wam_scrape::Config) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Wam-Scrape Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);

    println!("\nCrawler Configuration:");
    println!(
        "  Max concurrent listings: {}",
        config.crawler.max_concurrent_listings
    );
    println!(
        "  Max concurrent details: {}",
        config.crawler.max_concurrent_details
    );
    println!("  Request timeout: {}s", config.crawler.request_timeout);
    println!(
        "  Max consecutive page failures: {}",
        config.crawler.max_consecutive_page_failures
    );
    println!(
        "  Max pages per listing: {}",
        config.crawler.max_pages_per_listing
    );

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!("  CSV: {}", config.output.csv_path);

    let coordinator = Coordinator::new(config.clone())?;
    let listings = coordinator.listing_urls();
    println!("\nListings to walk ({}):", listings.len());
    for listing in &listings {
        println!("  - {}", listing);
    }

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the main harvest operation
async fn handle_harvest(config: wam_scrape::Config) -> Result<(), Box<dyn std::error::Error>> {
    let csv_path = config.output.csv_path.clone();

    let coordinator = Coordinator::new(config)?;
    let buildings = coordinator.run().await?;

    export_buildings(&buildings, Path::new(&csv_path))?;
    tracing::info!("Data saved in the {} file", csv_path);

    Ok(())
}
