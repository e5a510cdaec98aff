use crate::UrlError;
use url::Url;

/// Resolves a link taken from markup to an absolute URL
///
/// Absolute `http`/`https` links are kept as-is; root-relative and
/// path-relative links are joined onto `base`. No other rewriting happens.
///
/// Returns None if the link should be skipped:
/// - empty or fragment-only hrefs
/// - `javascript:`, `mailto:`, `tel:`, and `data:` links
/// - hrefs that fail to resolve
/// - non-HTTP(S) URLs after resolution
///
/// # Examples
///
/// ```
/// use comic_archiver::url::to_absolute;
/// use url::Url;
///
/// let base = Url::parse("https://comicfury.com").unwrap();
/// assert_eq!(
///     to_absolute("/read/42/page/3", &base).as_deref(),
///     Some("https://comicfury.com/read/42/page/3")
/// );
/// ```
pub fn to_absolute(href: &str, base: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if lowered.starts_with("javascript:")
        || lowered.starts_with("mailto:")
        || lowered.starts_with("tel:")
        || lowered.starts_with("data:")
    {
        return None;
    }

    let absolute = base.join(href).ok()?;
    match absolute.scheme() {
        "http" | "https" => Some(absolute.to_string()),
        _ => None,
    }
}

/// Parses and validates a crawl target URL
///
/// The target must be absolute, use HTTP or HTTPS, and carry a host.
pub fn parse_target_url(url_str: &str) -> Result<Url, UrlError> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(format!("{}: {}", url_str, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost(url_str.to_string()));
    }

    Ok(url)
}

/// Returns the origin of a URL (scheme, host, and port) as a root URL
pub fn origin_of(url: &Url) -> Url {
    let mut origin = url.clone();
    origin.set_path("/");
    origin.set_query(None);
    origin.set_fragment(None);
    origin
}
