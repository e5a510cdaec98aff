//! Output module for persisting crawl results
//!
//! This module handles:
//! - Writing the flattened chapter list to disk
//! - Recording crawl statistics and printing a summary

mod json;
pub mod stats;
mod traits;

pub use json::JsonOutputHandler;
pub use stats::{print_statistics, CrawlStatistics};
pub use traits::{OutputError, OutputHandler, OutputResult};
