//! Crawler module for bounded page traversal
//!
//! This module contains the core crawling logic, including:
//! - Browser session management and page fetching
//! - Text and link extraction from rendered HTML
//! - The depth-first traversal with dedup, depth and fan-out bounds
//! - Per-seed run orchestration and session release

mod engine;
mod extractor;
mod fetcher;

pub use engine::Traversal;
pub use extractor::{extract_page, ExtractedPage};
pub use fetcher::{BrowserFetcher, BrowserLauncher, FetchError, PageFetcher, SessionLauncher};

use crate::config::CrawlerConfig;
use crate::output::CrawlStatistics;
use crate::state::PageRecord;
use crate::url::{parse_seed, DomainPolicy};
use crate::DelveError;
use chrono::{DateTime, Utc};

/// Traversal bounds shared by every run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlSettings {
    /// Pages at this many hops from the seed or more are never fetched
    pub max_depth: u32,
    /// Outgoing links considered per page
    pub max_links_per_page: usize,
    pub domain_policy: DomainPolicy,
}

impl Default for CrawlSettings {
    fn default() -> Self {
        Self::from(&CrawlerConfig::default())
    }
}

impl From<&CrawlerConfig> for CrawlSettings {
    fn from(config: &CrawlerConfig) -> Self {
        Self {
            max_depth: config.max_depth,
            max_links_per_page: config.max_links_per_page,
            domain_policy: config.domain_policy,
        }
    }
}

/// Result of one or more completed crawl runs
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Page records in visitation order, seeds concatenated in order
    pub corpus: Vec<PageRecord>,
    pub stats: CrawlStatistics,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl CrawlReport {
    fn empty(now: DateTime<Utc>) -> Self {
        Self {
            corpus: Vec::new(),
            stats: CrawlStatistics::default(),
            started_at: now,
            finished_at: now,
        }
    }

    /// Appends a later report to this one
    pub fn append(&mut self, other: CrawlReport) {
        self.corpus.extend(other.corpus);
        self.stats.merge(&other.stats);
        self.finished_at = self.finished_at.max(other.finished_at);
    }

    /// Wall-clock time covered by the report, in seconds
    pub fn duration_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }
}

/// Runs a complete crawl from one seed URL
///
/// This is the top-level crawl invocation. It will:
/// 1. Open a fresh fetcher session
/// 2. Traverse from the seed with a fresh visited set and corpus
/// 3. Close the session
///
/// Page-level failures never surface here. Only a seed that is not an
/// http(s) URL or a session that cannot be opened fails the call, in which
/// case nothing is returned.
///
/// # Arguments
///
/// * `launcher` - Opens the fetcher session
/// * `seed` - The starting URL, which also fixes the reference domain
/// * `settings` - Traversal bounds
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl completed, possibly with some pages failed
/// * `Err(DelveError::Url)` - The seed is not a usable URL
/// * `Err(DelveError::SessionStart)` - No session could be acquired
pub async fn crawl_seed<L: SessionLauncher>(
    launcher: &L,
    seed: &str,
    settings: &CrawlSettings,
) -> Result<CrawlReport, DelveError> {
    let started_at = Utc::now();

    // Visited URLs are kept in the url crate's serialized form
    let mut seed_url = parse_seed(seed)?;
    seed_url.set_fragment(None);
    let seed = seed_url.as_str();

    let mut fetcher = launcher.open().await?;

    let run = Traversal::new(&mut fetcher, settings).run(seed).await;

    // Dropping the fetcher also releases the session if this is never reached
    fetcher.close().await;

    let (corpus, mut stats) = run.finish();
    stats.seeds = 1;

    Ok(CrawlReport {
        corpus,
        stats,
        started_at,
        finished_at: Utc::now(),
    })
}

/// Crawls each seed independently and concatenates the results
///
/// Every seed gets its own session, visited set, and corpus; a page reached
/// from two seeds appears once per seed. The first invalid seed or session
/// failure aborts the whole crawl.
///
/// # Arguments
///
/// * `launcher` - Opens a fetcher session per seed
/// * `seeds` - Seed URLs, crawled in order
/// * `settings` - Traversal bounds
pub async fn crawl_seeds<L: SessionLauncher>(
    launcher: &L,
    seeds: &[String],
    settings: &CrawlSettings,
) -> Result<CrawlReport, DelveError> {
    let mut report = CrawlReport::empty(Utc::now());

    for (index, seed) in seeds.iter().enumerate() {
        tracing::info!("Crawling seed {}/{}: {}", index + 1, seeds.len(), seed);
        let seed_report = crawl_seed(launcher, seed, settings).await?;
        report.append(seed_report);
    }

    tracing::info!(
        "Crawl complete: {} page records from {} seeds in {}s",
        report.corpus.len(),
        report.stats.seeds,
        report.duration_seconds()
    );

    Ok(report)
}
