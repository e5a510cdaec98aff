//! Output handler traits and types
//!
//! This module defines the trait interface for output handlers and the
//! errors they can report.

use crate::model::Chapter;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output to {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for output handlers
///
/// Output handlers receive the finished chapter list once the crawl has
/// completed. The crawl never calls them itself; the caller decides where
/// results go.
pub trait OutputHandler {
    /// Persists the chapters
    ///
    /// # Arguments
    ///
    /// * `chapters` - Chapters in archive order, pages in chapter order
    fn write(&self, chapters: &[Chapter]) -> OutputResult<()>;

    /// Human-readable description of where output goes
    fn destination(&self) -> String;
}
