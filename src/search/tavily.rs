use crate::config::SearchConfig;
use crate::search::error::{SearchError, SearchResult};
use crate::search::SeedResolver;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    search_depth: &'a str,
    max_results: u32,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    url: String,
    #[serde(default)]
    title: Option<String>,
}

/// Seed resolver backed by the Tavily search API
pub struct TavilyResolver {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    search_depth: String,
    max_results: u32,
}

impl TavilyResolver {
    pub fn new(
        base_url: &str,
        api_key: String,
        search_depth: &str,
        max_results: u32,
    ) -> SearchResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            search_depth: search_depth.to_string(),
            max_results,
        })
    }

    /// Builds a resolver from configuration, reading the key from the environment
    pub fn from_config(config: &SearchConfig) -> SearchResult<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| SearchError::MissingApiKey(config.api_key_env.clone()))?;

        Self::new(
            &config.api_url,
            api_key,
            &config.search_depth,
            config.max_results,
        )
    }
}

#[async_trait]
impl SeedResolver for TavilyResolver {
    async fn resolve(&self, topic: &str) -> SearchResult<Vec<String>> {
        let endpoint = format!("{}/search", self.base_url);
        let request = SearchRequest {
            query: topic,
            search_depth: &self.search_depth,
            max_results: self.max_results,
        };

        let resp = self
            .client
            .post(&endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(SearchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = resp.text().await?;
        let response: SearchResponse = serde_json::from_str(&body)?;

        for hit in &response.results {
            tracing::debug!(
                "Search hit for '{}': {} ({})",
                topic,
                hit.url,
                hit.title.as_deref().unwrap_or("untitled")
            );
        }

        Ok(response.results.into_iter().map(|hit| hit.url).collect())
    }
}
