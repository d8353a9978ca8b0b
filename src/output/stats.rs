//! Crawl statistics
//!
//! This module provides the per-run outcome counters and a formatted
//! printout of them for the command line.

use crate::state::VisitOutcome;
use std::collections::HashMap;

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStatistics {
    /// Count of URLs by visit outcome
    pub pages_by_outcome: HashMap<VisitOutcome, u64>,

    /// Total number of outgoing links found on collected pages
    pub links_discovered: u64,

    /// Number of seeds whose traversal contributed to these counts
    pub seeds: u64,
}

impl CrawlStatistics {
    /// Records one visit outcome
    pub fn record(&mut self, outcome: VisitOutcome) {
        *self.pages_by_outcome.entry(outcome).or_insert(0) += 1;
    }

    /// Adds outgoing links found on a page
    pub fn add_links(&mut self, count: usize) {
        self.links_discovered += count as u64;
    }

    /// Returns the count for an outcome
    pub fn count(&self, outcome: VisitOutcome) -> u64 {
        self.pages_by_outcome.get(&outcome).copied().unwrap_or(0)
    }

    /// Number of pages that were actually fetched (collected or failed)
    pub fn pages_fetched(&self) -> u64 {
        self.count(VisitOutcome::Collected) + self.count(VisitOutcome::Failed)
    }

    /// Folds another run's statistics into this one
    pub fn merge(&mut self, other: &CrawlStatistics) {
        for (outcome, count) in &other.pages_by_outcome {
            *self.pages_by_outcome.entry(*outcome).or_insert(0) += count;
        }
        self.links_discovered += other.links_discovered;
        self.seeds += other.seeds;
    }

    /// Returns the share of fetched pages that were collected, as a percentage
    pub fn success_rate(&self) -> f64 {
        let fetched = self.pages_fetched();
        if fetched == 0 {
            return 0.0;
        }
        (self.count(VisitOutcome::Collected) as f64 / fetched as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Seeds crawled: {}", stats.seeds);
    println!("  Pages fetched: {}", stats.pages_fetched());
    println!("  Links discovered: {}", stats.links_discovered);
    println!();

    println!("URLs by Outcome:");
    for outcome in VisitOutcome::all_outcomes() {
        let count = stats.count(outcome);
        if count > 0 {
            println!("  {}: {}", outcome, count);
        }
    }
    println!();

    println!(
        "Success Rate: {:.1}% ({} / {} fetched pages collected)",
        stats.success_rate(),
        stats.count(VisitOutcome::Collected),
        stats.pages_fetched()
    );
}
