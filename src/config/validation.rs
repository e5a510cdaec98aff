use crate::config::types::{Config, CrawlerConfig, OutputConfig, SiteConfig, UserAgentConfig};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Upper bound on the per-scope worker budget
pub const MAX_WORKER_BUDGET: u32 = 64;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_site_config(&config.site)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_concurrent_units < 1 || config.max_concurrent_units > MAX_WORKER_BUDGET {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_units must be between 1 and {}, got {}",
            MAX_WORKER_BUDGET, config.max_concurrent_units
        )));
    }

    if config.request_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "request_timeout_secs must be > 0".to_string(),
        ));
    }

    if config.connect_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "connect_timeout_secs must be > 0".to_string(),
        ));
    }

    Ok(())
}

/// Validates site markup conventions
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    validate_http_url("base_url", &config.base_url)?;
    validate_http_url("image_prefix", &config.image_prefix)?;

    validate_selector("chapter_marker", &config.chapter_marker)?;
    validate_selector("page_marker", &config.page_marker)?;
    validate_selector("page_label", &config.page_label)?;

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if let Some(contact_url) = &config.contact_url {
        Url::parse(contact_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "output path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates that a value is an absolute HTTP(S) URL
fn validate_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", field, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use HTTP or HTTPS",
            field, value
        )));
    }

    Ok(())
}

/// Validates that a CSS selector parses
fn validate_selector(field: &'static str, selector: &str) -> Result<(), ConfigError> {
    Selector::parse(selector).map_err(|_| ConfigError::InvalidSelector {
        field,
        selector: selector.to_string(),
    })?;
    Ok(())
}
