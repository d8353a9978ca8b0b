//! HTML text and link extraction
//!
//! This module turns a rendered document into:
//! - The visible text of its primary content
//! - The outgoing links to consider following, as absolute URLs
//!
//! Structural chrome (`header`, `footer`, `nav`, `aside`) and non-content
//! elements (`script`, `style`) are removed before either is extracted, so
//! links in navigation bars and footers are never followed.

use scraper::{Html, Node};
use url::Url;

/// Elements whose whole subtree is dropped before extraction
const EXCLUDED_ELEMENTS: &[&str] = &["header", "footer", "nav", "aside", "script", "style"];

/// Extracted content of an HTML page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedPage {
    /// Text nodes, each trimmed, joined by single spaces
    pub text: String,

    /// Outgoing links (absolute http/https URLs) in document order
    pub links: Vec<String>,
}

/// Extracts visible text and outgoing links from an HTML document
///
/// Parsing is tolerant: malformed markup yields whatever text and links the
/// parser recovers, possibly none. This function never fails.
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` outside removed elements, resolved against `base_url`
///   with any `#fragment` removed
///
/// **Exclude:**
/// - `javascript:`, `mailto:`, `tel:` links and data URIs
/// - Fragment-only links (`#section`)
/// - Anything that does not resolve to an `http` or `https` URL
///
/// Duplicates are kept; the traversal deduplicates on visit.
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - The URL the document was fetched from
///
/// # Example
///
/// ```
/// use delve::crawler::extract_page;
/// use url::Url;
///
/// let html = r#"<html><body><nav><a href="/menu">Menu</a></nav>
///     <p>Hello</p><a href="/next">Next</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let page = extract_page(html, &base_url);
/// assert_eq!(page.text, "Hello Next");
/// assert_eq!(page.links, vec!["https://example.com/next".to_string()]);
/// ```
pub fn extract_page(html: &str, base_url: &Url) -> ExtractedPage {
    let document = Html::parse_document(html);

    let mut texts: Vec<&str> = Vec::new();
    let mut links = Vec::new();

    // Explicit stack keeps deeply nested documents off the call stack
    let mut stack = vec![document.tree.root()];
    while let Some(node) = stack.pop() {
        match node.value() {
            Node::Element(element) => {
                if EXCLUDED_ELEMENTS.contains(&element.name()) {
                    continue;
                }

                if element.name() == "a" {
                    if let Some(href) = element.attr("href") {
                        if let Some(absolute_url) = resolve_link(href, base_url) {
                            links.push(absolute_url);
                        }
                    }
                }
            }
            Node::Text(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    texts.push(trimmed);
                }
                continue;
            }
            Node::Document | Node::Fragment => {}
            // Comments, doctypes, processing instructions carry no visible text
            _ => continue,
        }

        let children: Vec<_> = node.children().collect();
        stack.extend(children.into_iter().rev());
    }

    ExtractedPage {
        text: texts.join(" "),
        links,
    }
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Fragment-only links
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    // Skip empty hrefs
    if href.is_empty() {
        return None;
    }

    let lower = href.to_ascii_lowercase();
    if lower.starts_with("javascript:")
        || lower.starts_with("mailto:")
        || lower.starts_with("tel:")
        || lower.starts_with("data:")
    {
        return None;
    }

    // Same-page anchors
    if href.starts_with('#') {
        return None;
    }

    match base_url.join(href) {
        Ok(mut absolute_url) => {
            // Fragments address the same document
            absolute_url.set_fragment(None);
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url.to_string())
            } else {
                None
            }
        }
        Err(_) => None,
    }
}
