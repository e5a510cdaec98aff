//! Markup extraction for the three node roles of a comic archive
//!
//! This module turns raw markup into structured stubs:
//! - Chapter links (anchors wrapping the chapter marker element)
//! - Page links (anchors wrapping the page marker element, plus their label)
//! - The page's comic image (first `<img>` under the canonical image prefix)
//!
//! Extraction never fails. Anchors without a usable `href` and images
//! without `src` are skipped, so odd markup just yields fewer results.

use crate::config::SiteConfig;
use crate::model::{ChapterLink, PageLink};
use crate::url::to_absolute;
use crate::ConfigError;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// The kind of node an extractor looks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRole {
    /// Anchor on the archive page leading to a chapter listing
    ChapterLink,
    /// Anchor on a chapter page leading to a comic page
    PageLink,
    /// Comic image on a page
    Image,
}

/// Site-specific extraction strategy for one node role
pub trait Extractor: Send + Sync {
    /// What the extractor yields for one document
    type Output;

    /// The node role this extractor handles
    fn role(&self) -> NodeRole;

    /// Extracts matching fragments from raw markup
    fn extract(&self, markup: &str) -> Self::Output;
}

/// Finds chapter entries on an archive page
#[derive(Debug, Clone)]
pub struct ChapterExtractor {
    anchors: Selector,
    marker: Selector,
    base: Url,
}

impl ChapterExtractor {
    /// Creates a chapter extractor
    ///
    /// # Arguments
    ///
    /// * `marker` - Selector for the element that marks an anchor as a chapter entry
    /// * `base` - Origin relative hrefs are resolved against
    pub fn new(marker: &str, base: Url) -> Result<Self, ConfigError> {
        Ok(Self {
            anchors: parse_selector("anchor", "a")?,
            marker: parse_selector("chapter_marker", marker)?,
            base,
        })
    }
}

impl Extractor for ChapterExtractor {
    type Output = Vec<ChapterLink>;

    fn role(&self) -> NodeRole {
        NodeRole::ChapterLink
    }

    fn extract(&self, markup: &str) -> Vec<ChapterLink> {
        let document = Html::parse_document(markup);

        marked_anchors(&document, &self.anchors, &self.marker)
            .filter_map(|anchor| {
                let url = resolve_href(&anchor, &self.base)?;
                Some(ChapterLink {
                    title: collapse_text(&anchor),
                    url,
                })
            })
            .collect()
    }
}

/// Finds comic page entries on a chapter page
#[derive(Debug, Clone)]
pub struct PageExtractor {
    anchors: Selector,
    marker: Selector,
    label: Selector,
    base: Url,
}

impl PageExtractor {
    /// Creates a page extractor
    ///
    /// # Arguments
    ///
    /// * `marker` - Selector for the element that marks an anchor as a page entry
    /// * `label` - Selector for the element holding the page title
    /// * `base` - Origin relative hrefs are resolved against
    pub fn new(marker: &str, label: &str, base: Url) -> Result<Self, ConfigError> {
        Ok(Self {
            anchors: parse_selector("anchor", "a")?,
            marker: parse_selector("page_marker", marker)?,
            label: parse_selector("page_label", label)?,
            base,
        })
    }
}

impl Extractor for PageExtractor {
    type Output = Vec<PageLink>;

    fn role(&self) -> NodeRole {
        NodeRole::PageLink
    }

    fn extract(&self, markup: &str) -> Vec<PageLink> {
        let document = Html::parse_document(markup);

        marked_anchors(&document, &self.anchors, &self.marker)
            .filter_map(|anchor| {
                let page_url = resolve_href(&anchor, &self.base)?;
                let page_title = anchor
                    .select(&self.label)
                    .next()
                    .map(|label| collapse_text(&label))
                    .unwrap_or_default();
                Some(PageLink {
                    page_url,
                    page_title,
                })
            })
            .collect()
    }
}

/// Finds the comic image on a page
///
/// First match wins: pages with several qualifying images only yield the
/// first one in document order.
#[derive(Debug, Clone)]
pub struct ImageExtractor {
    images: Selector,
    prefix: String,
}

impl ImageExtractor {
    /// Creates an image extractor for the given canonical image prefix
    pub fn new(prefix: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            images: parse_selector("image", "img[src]")?,
            prefix: prefix.to_string(),
        })
    }
}

impl Extractor for ImageExtractor {
    type Output = Option<String>;

    fn role(&self) -> NodeRole {
        NodeRole::Image
    }

    fn extract(&self, markup: &str) -> Option<String> {
        let document = Html::parse_document(markup);

        document
            .select(&self.images)
            .filter_map(|img| img.value().attr("src"))
            .map(str::trim)
            .find(|src| src.starts_with(&self.prefix))
            .map(str::to_string)
    }
}

/// The full extraction strategy for one site
#[derive(Debug, Clone)]
pub struct SiteExtractors {
    pub chapters: ChapterExtractor,
    pub pages: PageExtractor,
    pub image: ImageExtractor,
}

impl SiteExtractors {
    /// Builds all three extractors from the site conventions
    ///
    /// # Arguments
    ///
    /// * `site` - Marker selectors and image prefix
    /// * `base` - Origin relative hrefs are resolved against
    ///
    /// # Returns
    ///
    /// * `Ok(SiteExtractors)` - All selectors parsed
    /// * `Err(ConfigError)` - A selector in `site` is invalid
    pub fn new(site: &SiteConfig, base: Url) -> Result<Self, ConfigError> {
        Ok(Self {
            chapters: ChapterExtractor::new(&site.chapter_marker, base.clone())?,
            pages: PageExtractor::new(&site.page_marker, &site.page_label, base)?,
            image: ImageExtractor::new(&site.image_prefix)?,
        })
    }
}

/// Iterates anchors that contain at least one marker element
fn marked_anchors<'a>(
    document: &'a Html,
    anchors: &'a Selector,
    marker: &'a Selector,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    document
        .select(anchors)
        .filter(move |anchor| anchor.select(marker).next().is_some())
}

/// Resolves an anchor's `href`, if it has a usable one
fn resolve_href(anchor: &ElementRef<'_>, base: &Url) -> Option<String> {
    let href = anchor.value().attr("href")?;
    let resolved = to_absolute(href, base);
    if resolved.is_none() {
        tracing::debug!(href, "Skipping anchor with unusable href");
    }
    resolved
}

/// Visible text of an element, trimmed
fn collapse_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn parse_selector(field: &'static str, selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|_| ConfigError::InvalidSelector {
        field,
        selector: selector.to_string(),
    })
}
