//! Crawler coordinator - main crawl orchestration logic
//!
//! This module drives the three-level traversal of a comic archive:
//! - Archive stage: fetch the archive page and extract chapter links
//! - Chapter-pages stage: one unit per chapter fetches its page list
//! - Page-image stage: one unit per page re-fetches the page and resolves
//!   its image
//!
//! Each fan-out joins all of its units before the enclosing step finishes, and
//! every result is written back by discovery index. Failures inside a unit
//! degrade only that unit's slot (empty pages, absent image); nothing a unit
//! does can abort its siblings or the crawl.

use crate::config::{Config, PageScope};
use crate::crawler::extractor::{Extractor, SiteExtractors};
use crate::crawler::fetcher::{Fetcher, HttpFetcher};
use crate::crawler::scheduler::BatchScheduler;
use crate::model::{ArchiveTarget, Chapter, ChapterLink, Page, PageLink};
use crate::output::CrawlStatistics;
use crate::state::{ImageOutcome, PageListOutcome, UnitFailure};
use crate::ArchiverError;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Everything a finished crawl hands back to its caller
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Chapters in archive order, each with its pages in chapter order
    pub chapters: Vec<Chapter>,

    /// Counters describing what succeeded and what degraded
    pub statistics: CrawlStatistics,
}

/// Main crawler structure
pub struct Crawler {
    config: Arc<Config>,
    fetcher: Arc<dyn Fetcher>,
}

/// Per-crawl state shared by every unit
///
/// Built fresh for each call to [`Crawler::crawl`]; nothing survives between
/// crawls.
struct CrawlContext {
    fetcher: Arc<dyn Fetcher>,
    extractors: SiteExtractors,
    budget: usize,
    /// Crawl-wide page permit pool, present only for [`PageScope::Shared`]
    shared_pages: Option<Arc<Semaphore>>,
}

/// A chapter unit's result: how its page list resolved, plus each page's image
struct ChapterResolution {
    listing: Result<(), UnitFailure>,
    pages: Vec<(PageLink, ImageOutcome)>,
}

impl Crawler {
    /// Creates a crawler that fetches through the given fetcher
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    /// * `fetcher` - The markup source (HTTP in production, stubs in tests)
    pub fn new(config: Config, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            config: Arc::new(config),
            fetcher,
        }
    }

    /// Creates a crawler backed by a real HTTP client
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Client built successfully
    /// * `Err(ArchiverError)` - Failed to build the HTTP client
    pub fn from_config(config: Config) -> Result<Self, ArchiverError> {
        let fetcher = HttpFetcher::from_config(&config.user_agent, &config.crawler)?;
        Ok(Self::new(config, Arc::new(fetcher)))
    }

    /// Crawls one archive and returns its flattened chapters
    ///
    /// This never fails: an unreachable archive yields an empty chapter list,
    /// and failing chapters or pages show up as empty `pages` or absent
    /// `image_url` values.
    pub async fn crawl(&self, target: &ArchiveTarget) -> CrawlReport {
        let mut statistics = CrawlStatistics::start();

        let extractors = match SiteExtractors::new(&self.config.site, target.origin()) {
            Ok(extractors) => extractors,
            Err(e) => {
                // Validated configs never get here.
                tracing::error!("Invalid site markup configuration: {}", e);
                statistics.finish();
                return CrawlReport {
                    chapters: Vec::new(),
                    statistics,
                };
            }
        };

        let budget = self.config.crawler.max_concurrent_units as usize;
        let shared_pages = match self.config.crawler.page_scope {
            PageScope::PerChapter => None,
            PageScope::Shared => Some(Arc::new(Semaphore::new(budget.max(1)))),
        };

        let context = Arc::new(CrawlContext {
            fetcher: Arc::clone(&self.fetcher),
            extractors,
            budget,
            shared_pages,
        });

        let chapters = run_crawl(&context, target, &mut statistics).await;

        statistics.finish();
        tracing::info!(
            "Crawl of {} finished: {} chapters, {} pages, {} images",
            target,
            statistics.chapters_found,
            statistics.pages_found,
            statistics.images_resolved
        );

        CrawlReport {
            chapters,
            statistics,
        }
    }
}

/// Runs the archive stage, then fans out over chapters
async fn run_crawl(
    context: &Arc<CrawlContext>,
    target: &ArchiveTarget,
    statistics: &mut CrawlStatistics,
) -> Vec<Chapter> {
    tracing::info!("Scraping chapters from: {}", target);

    let markup = match context.fetcher.fetch(target.url().as_str()).await.into_body() {
        Ok(markup) => markup,
        Err(failure) => {
            tracing::error!(
                url = %target,
                kind = failure.kind(),
                "Failed to retrieve the archive page: {}",
                failure
            );
            statistics.archive_failure = Some(failure);
            return Vec::new();
        }
    };

    let links = context.extractors.chapters.extract(&markup);
    tracing::info!("Found {} chapters.", links.len());
    statistics.chapters_found = links.len();

    if links.is_empty() {
        tracing::warn!(url = %target, "Archive page lists no chapters");
        return Vec::new();
    }

    let scheduler = BatchScheduler::new(context.budget);
    let resolutions = scheduler
        .run(links.clone(), |_, link| {
            let context = Arc::clone(context);
            async move { resolve_chapter(context, link).await }
        })
        .await;

    links
        .into_iter()
        .zip(resolutions)
        .map(|(link, resolution)| assemble_chapter(link, resolution, statistics))
        .collect()
}

/// One chapter unit: fetch the page list, then resolve every page's image
///
/// The page batch runs inside the chapter unit. Under
/// [`PageScope::PerChapter`] it gets its own permit pool, so several chapters'
/// page batches can run side by side and the crawl's instantaneous
/// parallelism can exceed the configured budget.
async fn resolve_chapter(context: Arc<CrawlContext>, link: ChapterLink) -> ChapterResolution {
    let links = match fetch_page_list(&context, &link).await {
        PageListOutcome::Listed(links) => links,
        PageListOutcome::Failed(failure) => {
            return ChapterResolution {
                listing: Err(failure),
                pages: Vec::new(),
            }
        }
    };

    let scheduler = match &context.shared_pages {
        Some(pool) => BatchScheduler::with_semaphore(Arc::clone(pool)),
        None => BatchScheduler::new(context.budget),
    };

    let outcomes = scheduler
        .run(links.clone(), |_, page| {
            let context = Arc::clone(&context);
            async move { resolve_image(&context, &page.page_url).await }
        })
        .await;

    let pages = links
        .into_iter()
        .zip(outcomes)
        .map(|(page, outcome)| {
            let outcome = outcome.unwrap_or_else(ImageOutcome::Failed);
            (page, outcome)
        })
        .collect();

    ChapterResolution {
        listing: Ok(()),
        pages,
    }
}

/// Fetches a chapter page and extracts its page links
async fn fetch_page_list(context: &CrawlContext, link: &ChapterLink) -> PageListOutcome {
    tracing::info!("Scraping pages from chapter: {}", link.url);

    match context.fetcher.fetch(&link.url).await.into_body() {
        Ok(markup) => {
            let pages = context.extractors.pages.extract(&markup);
            tracing::info!("Found {} pages in chapter.", pages.len());
            PageListOutcome::Listed(pages)
        }
        Err(failure) => {
            tracing::warn!(
                url = %link.url,
                kind = failure.kind(),
                "Failed to retrieve the chapter page: {}",
                failure
            );
            PageListOutcome::Failed(failure)
        }
    }
}

/// Re-fetches a comic page and extracts its image URL
async fn resolve_image(context: &CrawlContext, page_url: &str) -> ImageOutcome {
    tracing::debug!("Scraping image from page: {}", page_url);

    match context.fetcher.fetch(page_url).await.into_body() {
        Ok(markup) => match context.extractors.image.extract(&markup) {
            Some(image_url) => ImageOutcome::Found(image_url),
            None => {
                tracing::warn!(url = %page_url, "No comic image found on page");
                ImageOutcome::NotFound
            }
        },
        Err(failure) => {
            tracing::warn!(
                url = %page_url,
                kind = failure.kind(),
                "Failed to retrieve the page: {}",
                failure
            );
            ImageOutcome::Failed(failure)
        }
    }
}

/// Writes a chapter unit's result into its chapter record
fn assemble_chapter(
    link: ChapterLink,
    resolution: Result<ChapterResolution, UnitFailure>,
    statistics: &mut CrawlStatistics,
) -> Chapter {
    let mut chapter = Chapter::from_link(link);

    let resolution = match resolution {
        Ok(resolution) => resolution,
        Err(failure) => ChapterResolution {
            listing: Err(failure),
            pages: Vec::new(),
        },
    };

    if let Err(failure) = resolution.listing {
        statistics.record_chapter_failure(&chapter.url, failure);
        return chapter;
    }

    chapter.pages = resolution
        .pages
        .into_iter()
        .map(|(link, outcome)| {
            let mut page = Page::from_link(link);
            statistics.record_image(&page.page_url, &outcome);
            page.image_url = outcome.into_image_url();
            page
        })
        .collect();

    statistics.pages_found += chapter.pages.len();
    chapter
}
