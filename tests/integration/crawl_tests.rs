//! Integration tests for the crawler
//!
//! These tests drive full crawl runs against an in-memory site that stands
//! in for the browser session, and check the corpus, the traversal bounds,
//! and the session lifecycle end-to-end.

use async_trait::async_trait;
use delve::crawler::{
    crawl_seed, crawl_seeds, CrawlSettings, FetchError, PageFetcher, SessionLauncher,
};
use delve::output::{CorpusSink, JsonFileSink};
use delve::state::{PageRecord, VisitOutcome};
use delve::url::DomainPolicy;
use delve::DelveError;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// What every session opened by a [`MockSite`] did
#[derive(Debug, Default)]
struct SessionLog {
    opened: usize,
    closed: usize,
    fetched: Vec<String>,
}

/// In-memory web: URL -> HTML, plus URLs that always fail to load
#[derive(Clone, Default)]
struct MockSite {
    pages: Arc<HashMap<String, String>>,
    failing: Arc<HashSet<String>>,
    log: Arc<Mutex<SessionLog>>,
    /// Refuse to open a session once this many have been opened
    max_sessions: Option<usize>,
}

impl MockSite {
    fn new(pages: &[(&str, &[&str])]) -> Self {
        let pages = pages
            .iter()
            .map(|(url, links)| (url.to_string(), page_html(url, links)))
            .collect();
        Self {
            pages: Arc::new(pages),
            ..Self::default()
        }
    }

    fn failing(mut self, urls: &[&str]) -> Self {
        self.failing = Arc::new(urls.iter().map(|u| u.to_string()).collect());
        self
    }

    fn max_sessions(mut self, max: usize) -> Self {
        self.max_sessions = Some(max);
        self
    }

    fn fetched(&self) -> Vec<String> {
        self.log.lock().unwrap().fetched.clone()
    }

    fn sessions(&self) -> (usize, usize) {
        let log = self.log.lock().unwrap();
        (log.opened, log.closed)
    }
}

fn page_html(url: &str, links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|l| format!(r#"<li><a href="{}">{}</a></li>"#, l, l))
        .collect();
    format!(
        r#"<html><head><title>{url}</title></head><body>
        <nav><a href="https://nav.example/">Navigation</a></nav>
        <main><h1>Page {url}</h1><ul>{anchors}</ul></main>
        <footer>footer text</footer>
        </body></html>"#
    )
}

struct MockSession {
    site: MockSite,
    closed: bool,
}

#[async_trait]
impl PageFetcher for MockSession {
    async fn fetch(&mut self, url: &str) -> Result<String, FetchError> {
        if self.closed {
            return Err(FetchError::SessionClosed);
        }
        self.site.log.lock().unwrap().fetched.push(url.to_string());

        if self.site.failing.contains(url) {
            return Err(FetchError::Timeout {
                url: url.to_string(),
                secs: 30,
            });
        }

        self.site
            .pages
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Navigation {
                url: url.to_string(),
                message: "net::ERR_NAME_NOT_RESOLVED".to_string(),
            })
    }

    async fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.site.log.lock().unwrap().closed += 1;
        }
    }
}

#[async_trait]
impl SessionLauncher for MockSite {
    type Fetcher = MockSession;

    async fn open(&self) -> Result<MockSession, DelveError> {
        let mut log = self.log.lock().unwrap();
        if let Some(max) = self.max_sessions {
            if log.opened >= max {
                return Err(DelveError::SessionStart(
                    "chrome failed to launch".to_string(),
                ));
            }
        }
        log.opened += 1;
        Ok(MockSession {
            site: self.clone(),
            closed: false,
        })
    }
}

fn urls(corpus: &[PageRecord]) -> Vec<&str> {
    corpus.iter().map(|r| r.url.as_str()).collect()
}

fn assert_unique(fetched: &[String]) {
    let unique: HashSet<_> = fetched.iter().collect();
    assert_eq!(unique.len(), fetched.len(), "duplicate fetch in {:?}", fetched);
}

#[tokio::test]
async fn test_acyclic_site_collected_once_each_in_preorder() {
    let site = MockSite::new(&[
        ("https://a.test/", &["https://b.test/", "https://c.test/"]),
        ("https://b.test/", &["https://a.test/", "https://d.test/"]),
        ("https://c.test/", &[]),
        ("https://d.test/", &[]),
    ]);

    let report = crawl_seed(&site, "https://a.test/", &CrawlSettings::default())
        .await
        .expect("crawl should succeed");

    assert_eq!(
        urls(&report.corpus),
        vec![
            "https://a.test/",
            "https://b.test/",
            "https://d.test/",
            "https://c.test/"
        ]
    );
    assert_unique(&site.fetched());
    // B's link back to the seed domain is dropped by the default policy
    assert_eq!(report.stats.count(VisitOutcome::DomainSkipped), 1);
    assert_eq!(report.stats.count(VisitOutcome::AlreadyVisited), 0);
}

#[tokio::test]
async fn test_cycle_terminates() {
    let site = MockSite::new(&[
        ("https://a.test/", &["https://b.test/"]),
        ("https://b.test/", &["https://a.test/"]),
    ]);

    let report = crawl_seed(&site, "https://a.test/", &CrawlSettings::default())
        .await
        .unwrap();

    assert_eq!(urls(&report.corpus), vec!["https://a.test/", "https://b.test/"]);
    assert_eq!(site.fetched().len(), 2);
}

#[tokio::test]
async fn test_cycle_between_other_domains_fetches_each_once() {
    let site = MockSite::new(&[
        ("https://a.test/", &["https://b.test/"]),
        ("https://b.test/", &["https://c.test/"]),
        ("https://c.test/", &["https://b.test/"]),
    ]);

    let report = crawl_seed(&site, "https://a.test/", &CrawlSettings::default())
        .await
        .unwrap();

    assert_eq!(
        urls(&report.corpus),
        vec!["https://a.test/", "https://b.test/", "https://c.test/"]
    );
    assert_unique(&site.fetched());
    assert_eq!(report.stats.count(VisitOutcome::AlreadyVisited), 1);
}

#[tokio::test]
async fn test_seed_is_normalized_before_traversal() {
    let site = MockSite::new(&[
        ("https://a.test/", &["https://a.test/", "https://a.test/x"]),
        ("https://a.test/x", &[]),
    ]);
    let settings = CrawlSettings {
        domain_policy: DomainPolicy::StayOnSeedDomain,
        ..CrawlSettings::default()
    };

    let report = crawl_seed(&site, "  https://a.test  ", &settings)
        .await
        .unwrap();

    assert_eq!(
        urls(&report.corpus),
        vec!["https://a.test/", "https://a.test/x"]
    );
    assert_eq!(
        site.fetched(),
        vec!["https://a.test/".to_string(), "https://a.test/x".to_string()]
    );
    assert_eq!(report.stats.count(VisitOutcome::AlreadyVisited), 1);
}

#[tokio::test]
async fn test_unparseable_seed_fails_before_session() {
    let site = MockSite::new(&[]);

    let result = crawl_seed(&site, "not a url", &CrawlSettings::default()).await;

    assert!(matches!(result, Err(DelveError::Url(_))));
    assert_eq!(site.sessions(), (0, 0));
}

#[tokio::test]
async fn test_fragment_links_collapse_to_one_page() {
    let site = MockSite::new(&[
        ("https://a.test/", &["https://b.test/p#one", "https://b.test/p#two"]),
        ("https://b.test/p", &[]),
    ]);

    let report = crawl_seed(&site, "https://a.test/", &CrawlSettings::default())
        .await
        .unwrap();

    assert_eq!(
        urls(&report.corpus),
        vec!["https://a.test/", "https://b.test/p"]
    );
    assert_unique(&site.fetched());
}

#[tokio::test]
async fn test_record_text_excludes_page_chrome() {
    let site = MockSite::new(&[("https://a.test/", &[])]);

    let report = crawl_seed(&site, "https://a.test/", &CrawlSettings::default())
        .await
        .unwrap();

    let text = &report.corpus[0].text;
    assert!(text.contains("Page https://a.test/"));
    assert!(!text.contains("Navigation"));
    assert!(!text.contains("footer text"));
    assert!(!site.fetched().contains(&"https://nav.example/".to_string()));
}

#[tokio::test]
async fn test_densely_linked_site_has_no_duplicate_visits() {
    let all = [
        "https://p1.test/",
        "https://p2.test/",
        "https://p3.test/",
        "https://p4.test/",
    ];
    let site = MockSite::new(&[
        (all[0], &[all[1], all[2], all[3]]),
        (all[1], &[all[0], all[2], all[3]]),
        (all[2], &[all[0], all[1], all[3]]),
        (all[3], &[all[0], all[1], all[2]]),
    ]);

    let report = crawl_seed(&site, all[0], &CrawlSettings::default())
        .await
        .unwrap();

    assert_unique(&site.fetched());
    assert_eq!(report.corpus.len(), 4);
}

#[tokio::test]
async fn test_depth_bound() {
    // A chain of 15 distinct domains, each linking to the next
    let chain: Vec<String> = (0..15).map(|i| format!("https://n{}.test/", i)).collect();
    let pages: Vec<(String, Vec<String>)> = chain
        .iter()
        .enumerate()
        .map(|(i, url)| (url.clone(), chain.get(i + 1).cloned().into_iter().collect()))
        .collect();
    let page_refs: Vec<Vec<&str>> = pages
        .iter()
        .map(|(_, links)| links.iter().map(String::as_str).collect())
        .collect();
    let site_map: Vec<(&str, &[&str])> = pages
        .iter()
        .zip(page_refs.iter())
        .map(|((url, _), links)| (url.as_str(), links.as_slice()))
        .collect();
    let site = MockSite::new(&site_map);

    let report = crawl_seed(&site, &chain[0], &CrawlSettings::default())
        .await
        .unwrap();

    assert_eq!(report.corpus.len(), 10);
    assert_eq!(report.corpus.last().unwrap().url, "https://n9.test/");
    assert!(!site.fetched().contains(&"https://n10.test/".to_string()));
    assert_eq!(report.stats.count(VisitOutcome::DepthExceeded), 1);
}

#[tokio::test]
async fn test_fan_out_bound() {
    let links: Vec<String> = (0..10).map(|i| format!("https://l{}.test/", i)).collect();
    let link_refs: Vec<&str> = links.iter().map(String::as_str).collect();
    let mut site_map: Vec<(&str, &[&str])> = vec![("https://hub.test/", link_refs.as_slice())];
    for link in &link_refs {
        site_map.push((*link, &[]));
    }
    let site = MockSite::new(&site_map);

    let report = crawl_seed(&site, "https://hub.test/", &CrawlSettings::default())
        .await
        .unwrap();

    assert_eq!(
        site.fetched(),
        vec![
            "https://hub.test/".to_string(),
            "https://l0.test/".to_string(),
            "https://l1.test/".to_string(),
            "https://l2.test/".to_string(),
        ]
    );
    assert_eq!(report.stats.links_discovered, 10);
}

#[tokio::test]
async fn test_fault_isolation() {
    let site = MockSite::new(&[
        (
            "https://a.test/",
            &["https://slow.test/", "https://b.test/", "https://gone.test/"],
        ),
        ("https://slow.test/", &["https://hidden.test/"]),
        ("https://b.test/", &["https://c.test/"]),
        ("https://c.test/", &[]),
        ("https://hidden.test/", &[]),
    ])
    .failing(&["https://slow.test/"]);

    let report = crawl_seed(&site, "https://a.test/", &CrawlSettings::default())
        .await
        .expect("page failures must not fail the crawl");

    assert_eq!(
        urls(&report.corpus),
        vec!["https://a.test/", "https://b.test/", "https://c.test/"]
    );
    assert_eq!(report.stats.count(VisitOutcome::Failed), 2);
    assert!(!site.fetched().contains(&"https://hidden.test/".to_string()));
}

#[tokio::test]
async fn test_same_domain_links_skipped_by_default() {
    let site = MockSite::new(&[
        ("https://a.test/", &["https://a.test/about", "https://b.test/"]),
        ("https://a.test/about", &[]),
        ("https://b.test/", &[]),
    ]);

    let report = crawl_seed(&site, "https://a.test/", &CrawlSettings::default())
        .await
        .unwrap();

    assert_eq!(urls(&report.corpus), vec!["https://a.test/", "https://b.test/"]);
}

#[tokio::test]
async fn test_stay_on_seed_domain_setting() {
    let site = MockSite::new(&[
        ("https://a.test/", &["https://a.test/about", "https://b.test/"]),
        ("https://a.test/about", &[]),
        ("https://b.test/", &[]),
    ]);
    let settings = CrawlSettings {
        domain_policy: DomainPolicy::StayOnSeedDomain,
        ..CrawlSettings::default()
    };

    let report = crawl_seed(&site, "https://a.test/", &settings).await.unwrap();

    assert_eq!(
        urls(&report.corpus),
        vec!["https://a.test/", "https://a.test/about"]
    );
}

#[tokio::test]
async fn test_session_closed_exactly_once() {
    let site = MockSite::new(&[("https://a.test/", &["https://b.test/"])])
        .failing(&["https://b.test/"]);

    crawl_seed(&site, "https://a.test/", &CrawlSettings::default())
        .await
        .unwrap();

    assert_eq!(site.sessions(), (1, 1));
}

#[tokio::test]
async fn test_session_failure_is_fatal_and_writes_nothing() {
    let site = MockSite::new(&[("https://a.test/", &[])]).max_sessions(0);
    let dir = TempDir::new().unwrap();
    let sink = JsonFileSink::new(dir.path());
    let seeds = vec!["https://a.test/".to_string()];

    let result = crawl_seeds(&site, &seeds, &CrawlSettings::default()).await;

    // The corpus is only persisted after a successful crawl
    let persisted = result.as_ref().ok().map(|report| sink.persist(&report.corpus));
    assert!(matches!(result, Err(DelveError::SessionStart(_))));
    assert!(persisted.is_none());
    assert!(site.fetched().is_empty());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_seeds_are_independent_runs() {
    let site = MockSite::new(&[
        ("https://a.test/", &["https://shared.test/"]),
        ("https://b.test/", &["https://shared.test/"]),
        ("https://shared.test/", &[]),
    ]);
    let seeds = vec!["https://a.test/".to_string(), "https://b.test/".to_string()];

    let report = crawl_seeds(&site, &seeds, &CrawlSettings::default())
        .await
        .unwrap();

    assert_eq!(
        urls(&report.corpus),
        vec![
            "https://a.test/",
            "https://shared.test/",
            "https://b.test/",
            "https://shared.test/"
        ]
    );
    assert_eq!(report.stats.seeds, 2);
    assert_eq!(site.sessions(), (2, 2));
}

#[tokio::test]
async fn test_later_session_failure_aborts_crawl() {
    let site = MockSite::new(&[("https://a.test/", &[]), ("https://b.test/", &[])]).max_sessions(1);
    let seeds = vec!["https://a.test/".to_string(), "https://b.test/".to_string()];

    let result = crawl_seeds(&site, &seeds, &CrawlSettings::default()).await;

    assert!(matches!(result, Err(DelveError::SessionStart(_))));
    assert_eq!(site.sessions(), (1, 1));
}

#[tokio::test]
async fn test_crawl_to_json_file() {
    let site = MockSite::new(&[
        ("https://a.test/", &["https://b.test/"]),
        ("https://b.test/", &[]),
    ]);
    let dir = TempDir::new().unwrap();

    let report = crawl_seed(&site, "https://a.test/", &CrawlSettings::default())
        .await
        .unwrap();
    let path = JsonFileSink::new(dir.path()).persist(&report.corpus).unwrap();

    let written: Vec<PageRecord> =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written, report.corpus);
    assert_eq!(written.len(), 2);
}
