//! Wam-Scrape: a batch scraper for the World Architecture Map building directory
//!
//! This crate crawls the site's alphabetically indexed listing pages to
//! discover every building detail page, extracts structured attributes from
//! each detail page, and exports the aggregated dataset as quoted CSV.

pub mod building;
pub mod config;
pub mod crawler;
pub mod output;

use thiserror::Error;

/// Main error type for Wam-Scrape operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Transport error for {url}: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {code} for {url}")]
    HttpStatus { url: String, code: u16 },

    #[error("Failed to parse response from {url}: {message}")]
    Parse { url: String, message: String },

    #[error("No building found at {url}")]
    BuildingNotFound { url: String },

    #[error("Export error: {0}")]
    Export(#[from] output::ExportError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Wam-Scrape operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use building::Building;
pub use config::Config;
pub use crawler::{harvest, Coordinator};
pub use output::export_buildings;
