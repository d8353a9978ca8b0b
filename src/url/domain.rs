use url::Url;

/// Extracts the domain from a URL
///
/// The domain is the lowercase host, followed by `:port` when the URL names
/// a non-default port explicitly. Two URLs on the same host but different
/// ports are therefore different domains.
///
/// # Arguments
///
/// * `url` - The URL to extract the domain from
///
/// # Returns
///
/// * `Some(String)` - The lowercase domain
/// * `None` - If the URL has no host
///
/// # Examples
///
/// ```
/// use url::Url;
/// use delve::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://localhost:8080/").unwrap();
/// assert_eq!(extract_domain(&url), Some("localhost:8080".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host),
    }
}

/// Extracts the domain from a URL string, returning None if it does not parse
pub fn extract_domain_str(url: &str) -> Option<String> {
    Url::parse(url).ok().and_then(|u| extract_domain(&u))
}
