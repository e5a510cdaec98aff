//! Crawler module for archive traversal
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the `Fetcher` trait
//! - Marker-based extraction of chapter links, page links, and images
//! - Bounded, order-preserving fan-out
//! - Overall crawl coordination

mod coordinator;
mod extractor;
mod fetcher;
mod scheduler;

pub use coordinator::{CrawlReport, Crawler};
pub use extractor::{
    ChapterExtractor, Extractor, ImageExtractor, NodeRole, PageExtractor, SiteExtractors,
};
pub use fetcher::{build_http_client, fetch_url, FetchResult, Fetcher, HttpFetcher};
pub use scheduler::BatchScheduler;

use crate::config::Config;
use crate::model::ArchiveTarget;
use crate::ArchiverError;

/// Runs a complete crawl operation over HTTP
///
/// This is the main entry point for crawling. It will:
/// 1. Build the HTTP client
/// 2. Fetch the archive and extract chapters
/// 3. Fetch every chapter's page list
/// 4. Resolve every page's image
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `target` - The archive to crawl
///
/// # Returns
///
/// * `Ok(CrawlReport)` - The crawl ran (possibly with degraded units)
/// * `Err(ArchiverError)` - The HTTP client could not be built
pub async fn crawl(config: Config, target: &ArchiveTarget) -> Result<CrawlReport, ArchiverError> {
    let crawler = Crawler::from_config(config)?;
    Ok(crawler.crawl(target).await)
}
