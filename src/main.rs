//! Delve main entry point
//!
//! This is the command-line interface for the Delve research crawler.

use clap::Parser;
use delve::config::{load_config_with_hash, Config};
use delve::crawler::{crawl_seeds, BrowserLauncher, CrawlSettings};
use delve::output::{print_statistics, CorpusSink, JsonFileSink};
use delve::search::{resolve_topics, TavilyResolver};
use delve::url::parse_seed;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Delve: a bounded research crawler
///
/// Delve walks the web from seed URLs (given directly or found by searching
/// for a topic) in a headless browser, collects the visible text of each
/// page, and writes the corpus to a JSON file.
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(version)]
#[command(about = "A bounded research crawler", long_about = None)]
struct Cli {
    /// Seed URLs to crawl (overrides seeds in the config file)
    #[arg(value_name = "SEED")]
    seeds: Vec<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Research topic to turn into seeds via the search API (repeatable)
    #[arg(short, long, value_name = "TOPIC")]
    topic: Vec<String>,

    /// Directory for the corpus file (overrides the config file)
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show the effective settings and seeds without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => {
            tracing::debug!("No configuration file given, using defaults");
            Config::default()
        }
    };

    let seeds = collect_seeds(&cli, &config).await?;

    if cli.dry_run {
        handle_dry_run(&cli, &config, &seeds);
        return Ok(());
    }

    if seeds.is_empty() {
        tracing::error!("No seeds to crawl");
        return Err("pass SEED URLs or --topic, or set `seeds` in the config file".into());
    }

    handle_crawl(&cli, &config, &seeds).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("delve=info,warn"),
            1 => EnvFilter::new("delve=debug,info"),
            2 => EnvFilter::new("delve=trace,debug"),
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

/// Gathers seeds from the command line (or config) and from topic searches
async fn collect_seeds(
    cli: &Cli,
    config: &Config,
) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let mut seeds = if cli.seeds.is_empty() {
        config.seeds.clone()
    } else {
        cli.seeds.clone()
    };

    for seed in &seeds {
        parse_seed(seed).map_err(|e| format!("invalid seed '{}': {}", seed, e))?;
    }

    if !cli.topic.is_empty() {
        let resolver = TavilyResolver::from_config(&config.search)?;
        for seed in resolve_topics(&resolver, &cli.topic).await? {
            if !seeds.contains(&seed) {
                seeds.push(seed);
            }
        }
    }

    Ok(seeds)
}

fn output_directory(cli: &Cli, config: &Config) -> PathBuf {
    cli.output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output.directory))
}

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(cli: &Cli, config: &Config, seeds: &[String]) {
    println!("=== Delve Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  Max links per page: {}", config.crawler.max_links_per_page);
    println!("  Page settle wait: {}ms", config.crawler.page_settle_ms);
    println!("  Page timeout: {}s", config.crawler.page_timeout_secs);
    println!("  Domain policy: {}", config.crawler.domain_policy.as_str());

    println!("\nBrowser:");
    println!("  Headless: {}", config.browser.headless);
    println!("  Sandbox: {}", config.browser.sandbox);
    println!(
        "  Executable: {}",
        config.browser.executable.as_deref().unwrap_or("(auto-detect)")
    );

    println!("\nOutput:");
    println!("  Directory: {}", output_directory(cli, config).display());

    println!("\nSeeds ({}):", seeds.len());
    for seed in seeds {
        println!("  - {}", seed);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(
    cli: &Cli,
    config: &Config,
    seeds: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Total seed URLs: {}", seeds.len());

    let settings = CrawlSettings::from(&config.crawler);
    let launcher = BrowserLauncher::new(
        config.browser.clone(),
        Duration::from_secs(config.crawler.page_timeout_secs),
        Duration::from_millis(config.crawler.page_settle_ms),
    );

    let report = match crawl_seeds(&launcher, seeds, &settings).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    let sink = JsonFileSink::new(output_directory(cli, config));
    let path = sink.persist(&report.corpus)?;

    if !cli.quiet {
        print_statistics(&report.stats);
        println!("\n✓ Corpus written to: {}", path.display());
    }

    Ok(())
}
