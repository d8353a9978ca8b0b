use crate::config::types::{Config, CrawlerConfig, OutputConfig, SearchConfig};
use crate::url::parse_seed;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_output_config(&config.output)?;
    validate_search_config(&config.search)?;
    validate_seeds(&config.seeds)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_depth < 1 || config.max_depth > 64 {
        return Err(ConfigError::Validation(format!(
            "max_depth must be between 1 and 64, got {}",
            config.max_depth
        )));
    }

    if config.max_links_per_page < 1 || config.max_links_per_page > 100 {
        return Err(ConfigError::Validation(format!(
            "max_links_per_page must be between 1 and 100, got {}",
            config.max_links_per_page
        )));
    }

    if config.page_settle_ms > 60_000 {
        return Err(ConfigError::Validation(format!(
            "page_settle_ms must be <= 60000ms, got {}ms",
            config.page_settle_ms
        )));
    }

    if config.page_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "page_timeout_secs must be >= 1, got {}",
            config.page_timeout_secs
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.trim().is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates search API configuration
fn validate_search_config(config: &SearchConfig) -> Result<(), ConfigError> {
    Url::parse(&config.api_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid api_url: {}", e)))?;

    if config.api_key_env.is_empty() {
        return Err(ConfigError::Validation(
            "api_key_env cannot be empty".to_string(),
        ));
    }

    if config.search_depth != "basic" && config.search_depth != "advanced" {
        return Err(ConfigError::Validation(format!(
            "search_depth must be 'basic' or 'advanced', got '{}'",
            config.search_depth
        )));
    }

    if config.max_results < 1 || config.max_results > 20 {
        return Err(ConfigError::Validation(format!(
            "max_results must be between 1 and 20, got {}",
            config.max_results
        )));
    }

    Ok(())
}

/// Validates seed URLs
fn validate_seeds(seeds: &[String]) -> Result<(), ConfigError> {
    for seed in seeds {
        parse_seed(seed)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", seed, e)))?;
    }
    Ok(())
}
