//! Comic-Archiver: a webcomic archive flattener
//!
//! This crate crawls a three-level webcomic archive (archive page → chapter
//! pages → comic pages) and flattens it into an ordered list of chapters,
//! each with its pages and their resolved image URLs.

pub mod config;
pub mod crawler;
pub mod model;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Comic-Archiver operations
///
/// The crawl itself never fails; these errors come from the edges around it
/// (configuration, client construction, target parsing, and persistence).
#[derive(Debug, Error)]
pub enum ArchiverError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

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

    #[error("Invalid CSS selector for {field}: {selector}")]
    InvalidSelector { field: &'static str, selector: String },
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),

    #[error("Invalid comic identifier: {0:?}")]
    InvalidId(String),
}

/// Result type alias for Comic-Archiver operations
pub type Result<T> = std::result::Result<T, ArchiverError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlReport, Crawler};
pub use model::{ArchiveTarget, Chapter, Page};
pub use url::{archive_url_for_id, to_absolute};
