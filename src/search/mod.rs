//! Seed resolution
//!
//! Turns research topics into seed URLs for the crawler. The crawler itself
//! only consumes the resulting list; where it comes from is up to the
//! [`SeedResolver`] in use.

pub mod error;
mod tavily;

pub use error::{SearchError, SearchResult};
pub use tavily::TavilyResolver;

use crate::url::parse_seed;
use async_trait::async_trait;

/// Resolves a topic to seed URLs
#[async_trait]
pub trait SeedResolver: Send + Sync {
    /// Returns seed URLs for `topic`, most relevant first
    async fn resolve(&self, topic: &str) -> SearchResult<Vec<String>>;
}

/// Resolver that ignores the topic and returns a fixed list
#[derive(Debug, Clone, Default)]
pub struct StaticSeeds {
    seeds: Vec<String>,
}

impl StaticSeeds {
    pub fn new(seeds: Vec<String>) -> Self {
        Self { seeds }
    }
}

#[async_trait]
impl SeedResolver for StaticSeeds {
    async fn resolve(&self, _topic: &str) -> SearchResult<Vec<String>> {
        Ok(self.seeds.clone())
    }
}

/// Resolves every topic in order and collects the usable seeds
///
/// URLs that are not http(s) are dropped with a warning, and a URL already
/// returned for an earlier topic is not repeated.
pub async fn resolve_topics<R: SeedResolver + ?Sized>(
    resolver: &R,
    topics: &[String],
) -> SearchResult<Vec<String>> {
    let mut seeds: Vec<String> = Vec::new();

    for topic in topics {
        let found = resolver.resolve(topic).await?;
        tracing::info!("Topic '{}' resolved to {} URLs", topic, found.len());

        for url in found {
            if let Err(e) = parse_seed(&url) {
                tracing::warn!("Ignoring search result {}: {}", url, e);
                continue;
            }
            if !seeds.contains(&url) {
                seeds.push(url);
            }
        }
    }

    Ok(seeds)
}
