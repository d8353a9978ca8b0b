use serde::{Deserialize, Serialize};

/// The unit of crawl output: one collected page
///
/// Records are built once, appended to the corpus, and never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    /// The URL the page was fetched from
    pub url: String,

    /// Visible text of the page with structural elements removed
    pub text: String,
}

impl PageRecord {
    pub fn new(url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            text: text.into(),
        }
    }
}
