//! Comic-Archiver main entry point
//!
//! This is the command-line interface for the Comic-Archiver crawler.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use comic_archiver::config::{load_config, Config, PageScope, MAX_WORKER_BUDGET};
use comic_archiver::output::{print_statistics, JsonOutputHandler, OutputHandler};
use comic_archiver::{ArchiveTarget, Crawler};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Comic-Archiver: flattens a webcomic archive into chapters, pages, and images
///
/// Comic-Archiver reads a comic's archive page, visits every chapter and
/// every page, and writes the resulting chapter → page → image URL records
/// to an indented JSON file.
#[derive(Parser, Debug)]
#[command(name = "comic-archiver")]
#[command(version)]
#[command(about = "Comic web scraper CLI", long_about = None)]
struct Cli {
    /// URL of the archive page to scrape (takes precedence over --id)
    #[arg(short, long)]
    url: Option<String>,

    /// Id of the comic to scrape (expands to <base-url>/read/<id>/archive)
    #[arg(short, long)]
    id: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Where to write the JSON result (overrides the config file)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Concurrent units per fan-out scope (overrides the config file)
    #[arg(short, long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..=MAX_WORKER_BUDGET as i64))]
    workers: Option<u32>,

    /// Bound page fetches with one crawl-wide pool instead of one per chapter
    #[arg(long)]
    shared_page_scope: bool,

    /// Show the resolved target and settings without crawling
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.url.is_none() && cli.id.is_none() {
        Cli::command().print_help()?;
        std::process::exit(1);
    }

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = effective_config(&cli)?;
    let target = resolve_target(&cli, &config)?;

    if cli.dry_run {
        handle_dry_run(&config, &target);
        return Ok(());
    }

    handle_crawl(config, &target, cli.quiet).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("comic_archiver=info,warn"),
            1 => EnvFilter::new("comic_archiver=debug,info"),
            2 => EnvFilter::new("comic_archiver=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file (or defaults) and applies command-line overrides
fn effective_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(workers) = cli.workers {
        config.crawler.max_concurrent_units = workers;
    }
    if cli.shared_page_scope {
        config.crawler.page_scope = PageScope::Shared;
    }
    if let Some(output) = &cli.output {
        config.output.path = output.display().to_string();
    }

    Ok(config)
}

/// Builds the archive target from `--url` or `--id`
fn resolve_target(cli: &Cli, config: &Config) -> Result<ArchiveTarget> {
    let target = match (&cli.url, &cli.id) {
        (Some(url), _) => ArchiveTarget::from_url(url)
            .with_context(|| format!("Invalid archive URL '{}'", url))?,
        (None, Some(id)) => ArchiveTarget::from_id(&config.site, id)
            .with_context(|| format!("Invalid comic id '{}'", id))?,
        (None, None) => anyhow::bail!("either --url or --id is required"),
    };
    Ok(target)
}

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(config: &Config, target: &ArchiveTarget) {
    println!("=== Comic-Archiver Dry Run ===\n");

    println!("Target:");
    println!("  Archive: {}", target);
    println!("  Base origin: {}", target.origin());

    println!("\nCrawler Configuration:");
    println!(
        "  Max concurrent units: {}",
        config.crawler.max_concurrent_units
    );
    println!("  Page scope: {:?}", config.crawler.page_scope);
    println!(
        "  Request timeout: {}s (connect {}s)",
        config.crawler.request_timeout_secs, config.crawler.connect_timeout_secs
    );

    println!("\nSite Markup:");
    println!("  Chapter marker: {}", config.site.chapter_marker);
    println!("  Page marker: {}", config.site.page_marker);
    println!("  Page label: {}", config.site.page_label);
    println!("  Image prefix: {}", config.site.image_prefix);

    println!("\nUser Agent: {}", config.user_agent.header_value());
    println!("Output: {}", config.output.path);
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config, target: &ArchiveTarget, quiet: bool) -> Result<()> {
    let output = JsonOutputHandler::new(&config.output.path);
    let crawler = Crawler::from_config(config).context("Failed to build HTTP client")?;

    let report = crawler.crawl(target).await;

    output
        .write(&report.chapters)
        .with_context(|| format!("Failed to write {}", output.destination()))?;

    if !quiet {
        print_statistics(&report.statistics);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_url_wins_over_id() {
        let cli = Cli::try_parse_from([
            "comic-archiver",
            "-u",
            "https://comicfury.com/read/other/archive",
            "-i",
            "42",
        ])
        .unwrap();

        let target = resolve_target(&cli, &Config::default()).unwrap();
        assert_eq!(
            target.url().as_str(),
            "https://comicfury.com/read/other/archive"
        );
    }

    #[test]
    fn test_id_expands_to_archive_url() {
        let cli = Cli::try_parse_from(["comic-archiver", "-i", "42"]).unwrap();
        let target = resolve_target(&cli, &Config::default()).unwrap();
        assert_eq!(target.url().as_str(), "https://comicfury.com/read/42/archive");
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "comic-archiver",
            "-i",
            "42",
            "-w",
            "3",
            "-o",
            "out/comic.json",
            "--shared-page-scope",
        ])
        .unwrap();

        let config = effective_config(&cli).unwrap();
        assert_eq!(config.crawler.max_concurrent_units, 3);
        assert_eq!(config.crawler.page_scope, PageScope::Shared);
        assert_eq!(config.output.path, "out/comic.json");
    }
}
