//! Crawl result model
//!
//! These are the records handed to the persistence layer: an ordered list of
//! chapters, each holding its ordered pages. Field names on the wire match
//! the `chapters.json` layout (`page_url`, `page_title`, `img_url`).

use crate::config::SiteConfig;
use crate::url::{archive_url_for_id, origin_of, parse_target_url};
use crate::UrlError;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// The root archive listing of one comic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveTarget {
    url: Url,
}

impl ArchiveTarget {
    /// Creates a target from an explicit archive URL
    pub fn from_url(url: &str) -> Result<Self, UrlError> {
        Ok(Self {
            url: parse_target_url(url)?,
        })
    }

    /// Creates a target from a site-specific comic identifier
    ///
    /// # Examples
    ///
    /// ```
    /// use comic_archiver::config::SiteConfig;
    /// use comic_archiver::ArchiveTarget;
    ///
    /// let target = ArchiveTarget::from_id(&SiteConfig::default(), "42").unwrap();
    /// assert_eq!(target.url().as_str(), "https://comicfury.com/read/42/archive");
    /// ```
    pub fn from_id(site: &SiteConfig, id: &str) -> Result<Self, UrlError> {
        Ok(Self {
            url: archive_url_for_id(&site.base_url, id)?,
        })
    }

    /// The archive URL
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The base origin relative links on this site are resolved against
    pub fn origin(&self) -> Url {
        origin_of(&self.url)
    }
}

impl fmt::Display for ArchiveTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}

/// A chapter link discovered on the archive page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterLink {
    pub title: String,
    /// Absolute URL of the chapter's page listing
    pub url: String,
}

/// A page link discovered on a chapter page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    /// Absolute URL of the comic page
    pub page_url: String,
    /// Label text, empty when the anchor carries no label element
    pub page_title: String,
}

/// A chapter with its resolved pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub title: String,
    pub url: String,
    pub pages: Vec<Page>,
}

impl Chapter {
    /// Creates a chapter with no pages yet
    pub fn from_link(link: ChapterLink) -> Self {
        Self {
            title: link.title,
            url: link.url,
            pages: Vec::new(),
        }
    }
}

/// One comic page and its image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub page_url: String,
    pub page_title: String,
    /// Canonical image URL, absent when it could not be resolved
    #[serde(rename = "img_url")]
    pub image_url: Option<String>,
}

impl Page {
    /// Creates a page whose image is not resolved yet
    pub fn from_link(link: PageLink) -> Self {
        Self {
            page_url: link.page_url,
            page_title: link.page_title,
            image_url: None,
        }
    }
}
