use serde::Deserialize;

/// Default number of concurrent units per fan-out scope
pub const DEFAULT_WORKER_BUDGET: u32 = 8;

/// Origin of the default comic host
pub const DEFAULT_BASE_URL: &str = "https://comicfury.com";

/// URL prefix that identifies genuine comic image assets on the default host
pub const DEFAULT_IMAGE_PREFIX: &str = "https://img.comicfury.com/comics/";

/// Main configuration structure for Comic-Archiver
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// How page-level fan-out is bounded across chapters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageScope {
    /// Each chapter gets its own freshly sized batch; overlapping chapters
    /// can together exceed the worker budget
    #[default]
    PerChapter,
    /// All chapters draw page units from one crawl-wide permit pool
    Shared,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of concurrent units in one fan-out scope
    #[serde(rename = "max-concurrent-units", default = "default_worker_budget")]
    pub max_concurrent_units: u32,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Connection establishment timeout (seconds)
    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Scope of the page-level concurrency bound
    #[serde(rename = "page-scope", default)]
    pub page_scope: PageScope,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_units: default_worker_budget(),
            request_timeout_secs: default_request_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            page_scope: PageScope::default(),
        }
    }
}

/// Site-specific markup conventions
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Origin used to build archive URLs from comic identifiers
    #[serde(rename = "base-url", default = "default_base_url")]
    pub base_url: String,

    /// Selector for the marker element inside chapter anchors
    #[serde(rename = "chapter-marker", default = "default_chapter_marker")]
    pub chapter_marker: String,

    /// Selector for the marker element inside page anchors
    #[serde(rename = "page-marker", default = "default_page_marker")]
    pub page_marker: String,

    /// Selector for the label element holding a page's title
    #[serde(rename = "page-label", default = "default_page_label")]
    pub page_label: String,

    /// Canonical image-host prefix
    #[serde(rename = "image-prefix", default = "default_image_prefix")]
    pub image_prefix: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            chapter_marker: default_chapter_marker(),
            page_marker: default_page_marker(),
            page_label: default_page_label(),
            image_prefix: default_image_prefix(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name", default = "default_crawler_name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version", default = "default_crawler_version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url", default)]
    pub contact_url: Option<String>,
}

impl UserAgentConfig {
    /// Formats the User-Agent header value
    ///
    /// Format: `CrawlerName/Version` or `CrawlerName/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        match &self.contact_url {
            Some(url) => format!("{}/{} (+{})", self.crawler_name, self.crawler_version, url),
            None => format!("{}/{}", self.crawler_name, self.crawler_version),
        }
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: default_crawler_name(),
            crawler_version: default_crawler_version(),
            contact_url: None,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the JSON result file
    #[serde(default = "default_output_path")]
    pub path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

fn default_worker_budget() -> u32 {
    DEFAULT_WORKER_BUDGET
}

fn default_request_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_chapter_marker() -> String {
    "div.archive-chapter".to_string()
}

fn default_page_marker() -> String {
    "div.archive-comic".to_string()
}

fn default_page_label() -> String {
    "span".to_string()
}

fn default_image_prefix() -> String {
    DEFAULT_IMAGE_PREFIX.to_string()
}

fn default_crawler_name() -> String {
    "comic-archiver".to_string()
}

fn default_crawler_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_output_path() -> String {
    "chapters.json".to_string()
}
