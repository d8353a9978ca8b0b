//! Traversal engine - the crawl algorithm
//!
//! A depth-first walk from one seed URL that:
//! - Stops descending at the maximum depth
//! - Never fetches the same URL twice within a run
//! - Considers only the first few outgoing links of each page
//! - Applies the domain policy before descending into a link
//! - Absorbs per-page failures, pruning only the failed page's subtree
//!
//! The walk keeps an explicit stack of [`CrawlFrame`]s instead of recursing.
//! Children are pushed in reverse so they pop in document order, which gives
//! the same preorder as the recursive formulation.

use crate::crawler::extractor::{extract_page, ExtractedPage};
use crate::crawler::fetcher::{FetchError, PageFetcher};
use crate::crawler::CrawlSettings;
use crate::state::{CrawlFrame, CrawlRun, PageRecord, VisitOutcome};
use url::Url;

/// Drives one traversal through a borrowed fetcher session
pub struct Traversal<'a, F: PageFetcher> {
    fetcher: &'a mut F,
    settings: &'a CrawlSettings,
}

impl<'a, F: PageFetcher> Traversal<'a, F> {
    pub fn new(fetcher: &'a mut F, settings: &'a CrawlSettings) -> Self {
        Self { fetcher, settings }
    }

    /// Walks the web from `seed` and returns the finished run
    ///
    /// This never fails: pages that cannot be fetched are logged and
    /// skipped, and the run still returns whatever was collected.
    pub async fn run(&mut self, seed: &str) -> CrawlRun {
        tracing::info!(
            "Starting traversal from {} (max depth {}, {} links per page, {})",
            seed,
            self.settings.max_depth,
            self.settings.max_links_per_page,
            self.settings.domain_policy.as_str()
        );

        let mut run = CrawlRun::new(seed);
        let mut pending = vec![CrawlFrame::new(seed, 0)];

        while let Some(frame) = pending.pop() {
            let children = self.visit(&mut run, &frame).await;
            pending.extend(children.into_iter().rev());
        }

        tracing::info!(
            "Traversal from {} finished: {} pages collected, {} URLs visited",
            seed,
            run.corpus().len(),
            run.visited_count()
        );

        run
    }

    /// Visits one frame, returning the frames to descend into next
    async fn visit(&mut self, run: &mut CrawlRun, frame: &CrawlFrame) -> Vec<CrawlFrame> {
        if frame.depth >= self.settings.max_depth {
            tracing::trace!("Depth limit reached at {} (depth {})", frame.url, frame.depth);
            run.record(VisitOutcome::DepthExceeded);
            return Vec::new();
        }

        // Marked before the fetch so a failing page is never retried
        if !run.mark_visited(&frame.url) {
            tracing::trace!("Already visited {}", frame.url);
            run.record(VisitOutcome::AlreadyVisited);
            return Vec::new();
        }

        let page = match self.fetch_page(&frame.url).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("Skipping {}: {}", frame.url, e);
                run.record(VisitOutcome::Failed);
                return Vec::new();
            }
        };

        tracing::debug!(
            "Collected {} (depth {}, {} chars, {} links)",
            frame.url,
            frame.depth,
            page.text.len(),
            page.links.len()
        );

        run.add_links(page.links.len());
        run.push_record(PageRecord::new(frame.url.as_str(), page.text));

        let mut children = Vec::new();
        for link in page.links.into_iter().take(self.settings.max_links_per_page) {
            if self
                .settings
                .domain_policy
                .should_descend(run.seed_domain(), &link)
            {
                children.push(frame.child(link));
            } else {
                tracing::trace!("Domain policy skips {}", link);
                run.record(VisitOutcome::DomainSkipped);
            }
        }

        children
    }

    /// Fetches a page through the session and extracts it
    async fn fetch_page(&mut self, url: &str) -> Result<ExtractedPage, FetchError> {
        let base_url = Url::parse(url).map_err(|e| FetchError::Navigation {
            url: url.to_string(),
            message: format!("invalid URL: {}", e),
        })?;

        let html = self.fetcher.fetch(url).await?;
        Ok(extract_page(&html, &base_url))
    }
}
