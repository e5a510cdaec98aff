//! Crawl statistics
//!
//! This module counts what a crawl found and what degraded along the way,
//! and renders those counts for the terminal.

use crate::state::{ImageOutcome, UnitFailure};
use chrono::{DateTime, Utc};

/// Crawl statistics summary
#[derive(Debug, Clone)]
pub struct CrawlStatistics {
    /// When the crawl started
    pub started_at: DateTime<Utc>,

    /// When the crawl finished, once it has
    pub finished_at: Option<DateTime<Utc>>,

    /// Why the archive page itself could not be fetched, if it could not
    pub archive_failure: Option<UnitFailure>,

    /// Chapters listed on the archive page
    pub chapters_found: usize,

    /// Chapters whose page list could not be fetched
    pub chapters_failed: usize,

    /// Pages listed across all fetched chapters
    pub pages_found: usize,

    /// Pages with a resolved image
    pub images_resolved: usize,

    /// Pages fetched successfully that held no qualifying image
    pub images_missing: usize,

    /// Pages that could not be fetched
    pub page_fetches_failed: usize,

    /// URL and reason for every unit that failed to fetch
    pub failures: Vec<(String, UnitFailure)>,
}

impl CrawlStatistics {
    /// Starts a new set of statistics stamped with the current time
    pub fn start() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            archive_failure: None,
            chapters_found: 0,
            chapters_failed: 0,
            pages_found: 0,
            images_resolved: 0,
            images_missing: 0,
            page_fetches_failed: 0,
            failures: Vec::new(),
        }
    }

    /// Stamps the finish time
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Wall-clock duration, once the crawl has finished
    pub fn duration(&self) -> Option<chrono::Duration> {
        self.finished_at.map(|finished| finished - self.started_at)
    }

    /// Records a chapter whose page list could not be fetched
    pub fn record_chapter_failure(&mut self, url: &str, failure: UnitFailure) {
        self.chapters_failed += 1;
        self.failures.push((url.to_string(), failure));
    }

    /// Records how one page's image resolved
    pub fn record_image(&mut self, url: &str, outcome: &ImageOutcome) {
        match outcome {
            ImageOutcome::Found(_) => self.images_resolved += 1,
            ImageOutcome::NotFound => self.images_missing += 1,
            ImageOutcome::Failed(failure) => {
                self.page_fetches_failed += 1;
                self.failures.push((url.to_string(), failure.clone()));
            }
        }
    }

    /// Returns true if any unit degraded or the archive was unreachable
    pub fn has_degradation(&self) -> bool {
        self.archive_failure.is_some()
            || self.chapters_failed > 0
            || self.images_missing > 0
            || self.page_fetches_failed > 0
    }

    /// Share of listed pages that ended up with an image, as a percentage
    pub fn image_rate(&self) -> f64 {
        if self.pages_found == 0 {
            return 0.0;
        }
        (self.images_resolved as f64 / self.pages_found as f64) * 100.0
    }
}

impl Default for CrawlStatistics {
    fn default() -> Self {
        Self::start()
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Run:");
    println!("  Started: {}", stats.started_at.to_rfc3339());
    if let Some(finished) = stats.finished_at {
        println!("  Finished: {}", finished.to_rfc3339());
    }
    if let Some(duration) = stats.duration() {
        println!("  Duration: {:.2}s", duration.num_milliseconds() as f64 / 1000.0);
    }
    println!();

    if let Some(failure) = &stats.archive_failure {
        println!("Archive page could not be retrieved: {}", failure);
        return;
    }

    println!("Overview:");
    println!(
        "  Chapters: {} ({} failed)",
        stats.chapters_found, stats.chapters_failed
    );
    println!("  Pages: {}", stats.pages_found);
    println!("  Images resolved: {}", stats.images_resolved);
    println!("  Pages without image: {}", stats.images_missing);
    println!("  Page fetches failed: {}", stats.page_fetches_failed);
    println!();

    if !stats.failures.is_empty() {
        println!("Failed Fetches ({}):", stats.failures.len());
        for (url, failure) in &stats.failures {
            println!("  - {} ({})", url, failure);
        }
        println!();
    }

    println!(
        "Image Rate: {:.1}% ({} / {} pages)",
        stats.image_rate(),
        stats.images_resolved,
        stats.pages_found
    );
}
