/// Outcome definitions for the per-chapter and per-page units of a crawl
///
/// Each unit resolves to exactly one of these values; none of them abort the
/// crawl, they only decide what lands in the unit's slot.
use crate::model::PageLink;
use std::fmt;

/// Why a unit could not produce its data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitFailure {
    /// The server answered with a non-2xx status
    Http(u16),

    /// The request never produced a response (DNS, connect, timeout, reset)
    Network(String),

    /// The worker running the unit panicked or was cancelled
    Aborted(String),
}

impl UnitFailure {
    /// Short machine-friendly label used in logs and statistics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Http(_) => "http_error",
            Self::Network(_) => "network_error",
            Self::Aborted(_) => "aborted",
        }
    }
}

impl fmt::Display for UnitFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(status) => write!(f, "HTTP status {}", status),
            Self::Network(error) => write!(f, "network error: {}", error),
            Self::Aborted(reason) => write!(f, "unit aborted: {}", reason),
        }
    }
}

/// Result of fetching and extracting one chapter's page list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageListOutcome {
    /// The chapter page was fetched; the list may legitimately be empty
    Listed(Vec<PageLink>),

    /// The chapter page could not be fetched
    Failed(UnitFailure),
}

/// Result of resolving one page's image
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageOutcome {
    /// A qualifying image was found
    Found(String),

    /// The page was fetched but holds no image under the canonical prefix
    NotFound,

    /// The page could not be fetched
    Failed(UnitFailure),
}

impl ImageOutcome {
    /// Consumes the outcome, yielding the image URL if one was found
    pub fn into_image_url(self) -> Option<String> {
        match self {
            Self::Found(url) => Some(url),
            Self::NotFound | Self::Failed(_) => None,
        }
    }
}
