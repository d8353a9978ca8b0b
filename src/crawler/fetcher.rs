//! Browser-backed page fetcher
//!
//! This module owns the headless browser session used by a crawl:
//! - Launching Chrome/Chromium over the DevTools protocol
//! - Bounding every browser step by the page timeout
//! - Waiting for dynamic content to settle before reading the DOM
//! - Releasing the browser process exactly once
//!
//! The traversal only sees the [`PageFetcher`] and [`SessionLauncher`]
//! traits, so it can be driven by any other page source in tests.

use crate::config::BrowserConfig;
use crate::DelveError;
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig as ChromeConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use std::fmt;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;

/// Per-page fetch failures
///
/// These never abort a crawl; the traversal logs them and prunes the page's
/// subtree.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("Navigation to {url} timed out after {secs}s")]
    Timeout { url: String, secs: u64 },

    #[error("Browser session is closed")]
    SessionClosed,
}

/// Retrieves rendered HTML for URLs through an open session
#[async_trait]
pub trait PageFetcher: Send {
    /// Navigates to `url` and returns the rendered document source
    async fn fetch(&mut self, url: &str) -> Result<String, FetchError>;

    /// Releases the session. Calling it again is a no-op.
    async fn close(&mut self);
}

/// Opens fetcher sessions
#[async_trait]
pub trait SessionLauncher: Send + Sync {
    type Fetcher: PageFetcher;

    /// Acquires a new session
    ///
    /// # Returns
    ///
    /// * `Ok(Fetcher)` - A session ready to fetch pages
    /// * `Err(DelveError::SessionStart)` - The session could not be created
    async fn open(&self) -> Result<Self::Fetcher, DelveError>;
}

/// Launches headless Chrome sessions
#[derive(Debug, Clone)]
pub struct BrowserLauncher {
    config: BrowserConfig,
    page_timeout: Duration,
    settle_wait: Duration,
}

impl BrowserLauncher {
    /// Creates a launcher
    ///
    /// # Arguments
    ///
    /// * `config` - Browser process options
    /// * `page_timeout` - Upper bound on each navigation
    /// * `settle_wait` - Delay after navigation before reading the DOM
    pub fn new(config: BrowserConfig, page_timeout: Duration, settle_wait: Duration) -> Self {
        Self {
            config,
            page_timeout,
            settle_wait,
        }
    }

    /// Builds the chromiumoxide launch configuration
    fn chrome_config(&self) -> Result<ChromeConfig, DelveError> {
        let mut builder = ChromeConfig::builder().request_timeout(self.page_timeout);

        if !self.config.headless {
            builder = builder.with_head();
        }

        // Containers and CI runners cannot provide Chrome's sandbox
        if !self.config.sandbox {
            builder = builder.no_sandbox();
        }

        if let Some(executable) = &self.config.executable {
            builder = builder.chrome_executable(executable);
        }

        for arg in &self.config.args {
            builder = builder.arg(arg.as_str());
        }

        builder.build().map_err(DelveError::SessionStart)
    }
}

#[async_trait]
impl SessionLauncher for BrowserLauncher {
    type Fetcher = BrowserFetcher;

    async fn open(&self) -> Result<BrowserFetcher, DelveError> {
        let config = self.chrome_config()?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| DelveError::SessionStart(e.to_string()))?;

        // The CDP handler must be polled for the browser to make progress
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("Browser handler stopped: {}", e);
                    break;
                }
            }
        });

        let mut fetcher = BrowserFetcher {
            browser: Some(browser),
            page: None,
            handler: Some(handler_task),
            page_timeout: self.page_timeout,
            settle_wait: self.settle_wait,
        };

        let new_page = tokio::time::timeout(
            self.page_timeout,
            fetcher.browser_ref()?.new_page("about:blank"),
        )
        .await;
        let page = match new_page {
            Ok(Ok(page)) => page,
            Ok(Err(e)) => {
                fetcher.close().await;
                return Err(DelveError::SessionStart(format!("failed to open tab: {}", e)));
            }
            Err(_) => {
                fetcher.close().await;
                return Err(DelveError::SessionStart(format!(
                    "opening a tab timed out after {}s",
                    self.page_timeout.as_secs()
                )));
            }
        };
        fetcher.page = Some(page);

        tracing::info!("Browser session started");
        Ok(fetcher)
    }
}

/// A single headless browser with one tab reused for every page
///
/// `close` shuts the browser down gracefully. If the fetcher is dropped
/// without being closed (for example while unwinding), `Drop` stops the
/// handler task and chromiumoxide kills the browser process.
pub struct BrowserFetcher {
    browser: Option<Browser>,
    page: Option<Page>,
    handler: Option<JoinHandle<()>>,
    page_timeout: Duration,
    settle_wait: Duration,
}

impl BrowserFetcher {
    fn browser_ref(&self) -> Result<&Browser, DelveError> {
        self.browser
            .as_ref()
            .ok_or_else(|| DelveError::SessionStart("browser already closed".to_string()))
    }

    /// Returns true until the session has been closed
    pub fn is_open(&self) -> bool {
        self.browser.is_some()
    }
}

#[async_trait]
impl PageFetcher for BrowserFetcher {
    async fn fetch(&mut self, url: &str) -> Result<String, FetchError> {
        let page = self.page.as_ref().ok_or(FetchError::SessionClosed)?;

        bounded(self.page_timeout, url, "navigation failed", page.goto(url)).await?;

        if !self.settle_wait.is_zero() {
            tokio::time::sleep(self.settle_wait).await;
        }

        bounded(
            self.page_timeout,
            url,
            "failed to read document",
            page.content(),
        )
        .await
    }

    async fn close(&mut self) {
        if let Some(page) = self.page.take() {
            if let Err(e) = page.close().await {
                tracing::debug!("Failed to close tab: {}", e);
            }
        }

        if let Some(mut browser) = self.browser.take() {
            if let Err(e) = browser.close().await {
                tracing::warn!("Failed to close browser: {}", e);
            }
            if let Err(e) = browser.wait().await {
                tracing::warn!("Failed to reap browser process: {}", e);
            }
            tracing::info!("Browser session closed");
        }

        if let Some(handler) = self.handler.take() {
            handler.abort();
        }
    }
}

/// Runs one browser step under the page timeout
async fn bounded<T, E, F>(
    limit: Duration,
    url: &str,
    step: &str,
    step_future: F,
) -> Result<T, FetchError>
where
    F: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    match tokio::time::timeout(limit, step_future).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(FetchError::Navigation {
            url: url.to_string(),
            message: format!("{}: {}", step, e),
        }),
        Err(_) => Err(FetchError::Timeout {
            url: url.to_string(),
            secs: limit.as_secs(),
        }),
    }
}

impl Drop for BrowserFetcher {
    fn drop(&mut self) {
        if let Some(handler) = self.handler.take() {
            handler.abort();
        }
        if self.browser.is_some() {
            tracing::warn!("Browser session dropped without close; killing browser process");
        }
    }
}
