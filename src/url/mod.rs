//! URL handling module for Comic-Archiver
//!
//! This module provides relative-to-absolute link normalization, target URL
//! validation, and the archive URL template for comic identifiers.

mod normalize;

pub use normalize::{origin_of, parse_target_url, to_absolute};

use crate::UrlError;
use url::Url;

/// Builds the archive listing URL for a comic identifier
///
/// The archive always lives at `<base>/read/<id>/archive`.
///
/// # Arguments
///
/// * `base_url` - The site origin (e.g., `https://comicfury.com`)
/// * `id` - The comic identifier
///
/// # Examples
///
/// ```
/// use comic_archiver::url::archive_url_for_id;
///
/// let url = archive_url_for_id("https://comicfury.com", "42").unwrap();
/// assert_eq!(url.as_str(), "https://comicfury.com/read/42/archive");
/// ```
pub fn archive_url_for_id(base_url: &str, id: &str) -> Result<Url, UrlError> {
    let id = id.trim();
    if id.is_empty()
        || id
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#' | '\\'))
    {
        return Err(UrlError::InvalidId(id.to_string()));
    }

    let url = format!("{}/read/{}/archive", base_url.trim_end_matches('/'), id);
    parse_target_url(&url)
}
