//! Configuration module for Comic-Archiver
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so the crawler runs without any file at all.
//!
//! # Example
//!
//! ```no_run
//! use comic_archiver::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("archiver.toml")).unwrap();
//! println!("Worker budget: {}", config.crawler.max_concurrent_units);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, OutputConfig, PageScope, SiteConfig, UserAgentConfig,
    DEFAULT_BASE_URL, DEFAULT_IMAGE_PREFIX, DEFAULT_WORKER_BUDGET,
};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::{validate, MAX_WORKER_BUDGET};
