//! Delve: a bounded research crawler
//!
//! This crate walks the web from a set of seed URLs through a headless
//! browser session, harvests the visible text of each page, and hands the
//! collected corpus to a result sink. Seeds can be given directly or
//! resolved from a research topic through a web-search API.

pub mod config;
pub mod crawler;
pub mod output;
pub mod search;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Delve operations
///
/// Only failures that make a whole run impossible end up here. Per-page
/// failures are [`crawler::FetchError`] and never leave the traversal.
#[derive(Debug, Error)]
pub enum DelveError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to start browser session: {0}")]
    SessionStart(String),

    #[error("Search error: {0}")]
    Search(#[from] search::SearchError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

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

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Result type alias for Delve operations
pub type Result<T> = std::result::Result<T, DelveError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use crate::config::Config;
pub use crate::crawler::{crawl_seed, crawl_seeds, CrawlReport, CrawlSettings};
pub use crate::state::{PageRecord, VisitOutcome};
pub use crate::url::{extract_domain, parse_seed, DomainPolicy};
