use crate::output::CrawlStatistics;
use crate::state::{PageRecord, VisitOutcome};
use crate::url::extract_domain_str;
use std::collections::HashSet;

/// One pending visit: a URL and its distance in link-hops from the seed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlFrame {
    pub url: String,
    pub depth: u32,
}

impl CrawlFrame {
    pub fn new(url: impl Into<String>, depth: u32) -> Self {
        Self {
            url: url.into(),
            depth,
        }
    }

    /// Frame for a link found on this frame's page
    pub fn child(&self, url: impl Into<String>) -> Self {
        Self::new(url, self.depth + 1)
    }
}

/// State owned by a single traversal from one seed
///
/// Created when the traversal starts and consumed when it finishes. Nothing
/// here is shared between runs, so independent runs never see each other's
/// visited URLs.
#[derive(Debug)]
pub struct CrawlRun {
    seed: String,
    seed_domain: Option<String>,
    visited: HashSet<String>,
    corpus: Vec<PageRecord>,
    stats: CrawlStatistics,
}

impl CrawlRun {
    pub fn new(seed: &str) -> Self {
        Self {
            seed: seed.to_string(),
            seed_domain: extract_domain_str(seed),
            visited: HashSet::new(),
            corpus: Vec::new(),
            stats: CrawlStatistics::default(),
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Domain of the seed URL, the reference for the domain policy
    pub fn seed_domain(&self) -> Option<&str> {
        self.seed_domain.as_deref()
    }

    /// Marks a URL visited, returning false if it already was
    pub fn mark_visited(&mut self, url: &str) -> bool {
        self.visited.insert(url.to_string())
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Appends a collected page to the corpus
    pub fn push_record(&mut self, record: PageRecord) {
        self.stats.record(VisitOutcome::Collected);
        self.corpus.push(record);
    }

    pub fn record(&mut self, outcome: VisitOutcome) {
        self.stats.record(outcome);
    }

    pub fn add_links(&mut self, count: usize) {
        self.stats.add_links(count);
    }

    pub fn corpus(&self) -> &[PageRecord] {
        &self.corpus
    }

    pub fn stats(&self) -> &CrawlStatistics {
        &self.stats
    }

    /// Consumes the run, yielding its corpus and statistics
    pub fn finish(self) -> (Vec<PageRecord>, CrawlStatistics) {
        (self.corpus, self.stats)
    }
}
