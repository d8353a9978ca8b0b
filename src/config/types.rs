use crate::url::DomainPolicy;
use serde::Deserialize;

/// Main configuration structure for Delve
///
/// Every section is optional; a missing section takes its defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub browser: BrowserConfig,
    pub output: OutputConfig,
    pub search: SearchConfig,
    /// Seed URLs crawled when none are given on the command line
    pub seeds: Vec<String>,
}

/// Traversal bounds and per-page timing
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Hard ceiling on link-hops from the seed; pages at this depth are not fetched
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Number of outgoing links considered per page, in document order
    #[serde(rename = "max-links-per-page")]
    pub max_links_per_page: usize,

    /// Delay after navigation before the rendered document is read (milliseconds)
    #[serde(rename = "page-settle-ms")]
    pub page_settle_ms: u64,

    /// Upper bound on a single page navigation (seconds)
    #[serde(rename = "page-timeout-secs")]
    pub page_timeout_secs: u64,

    /// Which links to descend into relative to the seed domain
    #[serde(rename = "domain-policy")]
    pub domain_policy: DomainPolicy,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: 10,
            max_links_per_page: 3,
            page_settle_ms: 5000,
            page_timeout_secs: 30,
            domain_policy: DomainPolicy::default(),
        }
    }
}

/// Headless browser session options
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Run without a visible window
    pub headless: bool,

    /// Keep Chrome's sandbox enabled (constrained environments need it off)
    pub sandbox: bool,

    /// Path to the Chrome/Chromium binary; auto-detected when absent
    pub executable: Option<String>,

    /// Extra command-line switches passed to the browser
    pub args: Vec<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            sandbox: false,
            executable: None,
            args: vec!["--disable-dev-shm-usage".to_string()],
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving one JSON corpus file per run
    pub directory: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: "../output".to_string(),
        }
    }
}

/// Web-search API used to turn topics into seed URLs
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Base URL of the search API
    #[serde(rename = "api-url")]
    pub api_url: String,

    /// Environment variable holding the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// "basic" or "advanced"
    #[serde(rename = "search-depth")]
    pub search_depth: String,

    /// Number of results (and so seeds) requested per topic
    #[serde(rename = "max-results")]
    pub max_results: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.tavily.com".to_string(),
            api_key_env: "TAVILY_API_KEY".to_string(),
            search_depth: "advanced".to_string(),
            max_results: 1,
        }
    }
}
