//! URL handling module for Delve
//!
//! This module provides domain extraction, seed validation, and the domain
//! policy that decides which outgoing links a traversal descends into.

mod domain;

use crate::{UrlError, UrlResult};
use serde::Deserialize;
use url::Url;

// Re-export main functions
pub use domain::{extract_domain, extract_domain_str};

/// Link-following policy relative to the seed's domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DomainPolicy {
    /// Follow links that leave the seed domain, skip links that stay on it
    #[default]
    LeaveSeedDomain,
    /// Follow links that stay on the seed domain, skip links that leave it
    StayOnSeedDomain,
}

impl DomainPolicy {
    /// Returns true if a traversal seeded on `seed_domain` should descend into `link`
    ///
    /// A link whose domain cannot be determined is never considered to be on
    /// the seed domain, and neither is any link when the seed itself has no
    /// domain.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::url::DomainPolicy;
    ///
    /// let policy = DomainPolicy::LeaveSeedDomain;
    /// assert!(!policy.should_descend(Some("a.com"), "https://a.com/next"));
    /// assert!(policy.should_descend(Some("a.com"), "https://b.com/"));
    /// ```
    pub fn should_descend(&self, seed_domain: Option<&str>, link: &str) -> bool {
        let link_domain = extract_domain_str(link);
        let same_domain = match (seed_domain, link_domain.as_deref()) {
            (Some(seed), Some(link)) => seed == link,
            _ => false,
        };

        match self {
            Self::LeaveSeedDomain => !same_domain,
            Self::StayOnSeedDomain => same_domain,
        }
    }

    /// Returns the configuration spelling of this policy
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LeaveSeedDomain => "leave-seed-domain",
            Self::StayOnSeedDomain => "stay-on-seed-domain",
        }
    }
}

/// Parses and checks a seed URL
///
/// Seeds must be absolute `http` or `https` URLs with a host.
///
/// # Examples
///
/// ```
/// use delve::url::parse_seed;
///
/// assert!(parse_seed("https://example.com/").is_ok());
/// assert!(parse_seed("ftp://example.com/").is_err());
/// assert!(parse_seed("/relative").is_err());
/// ```
pub fn parse_seed(seed: &str) -> UrlResult<Url> {
    let url = Url::parse(seed.trim()).map_err(|e| UrlError::Parse(format!("{}: {}", seed, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingDomain);
    }

    Ok(url)
}
