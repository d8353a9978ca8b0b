/// Visit outcome definitions for tracking what a traversal did with each URL
use std::fmt;

/// What happened when the traversal considered a URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VisitOutcome {
    // ===== Success =====
    /// Page was fetched, extracted, and appended to the corpus
    Collected,

    // ===== Skips (no fetch) =====
    /// URL sits at or beyond the maximum depth
    DepthExceeded,

    /// URL was already visited earlier in this run
    AlreadyVisited,

    /// Link was not descended into because of the domain policy
    DomainSkipped,

    // ===== Errors =====
    /// Navigation or rendering failed; the page's subtree was pruned
    Failed,
}

impl VisitOutcome {
    /// Returns true if this represents a collected page
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Collected)
    }

    /// Returns true if the URL was passed over without a fetch
    pub fn is_skipped(&self) -> bool {
        matches!(
            self,
            Self::DepthExceeded | Self::AlreadyVisited | Self::DomainSkipped
        )
    }

    /// Returns true if this represents a per-page failure
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failed)
    }

    /// Returns the snake_case label used in logs and statistics
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Collected => "collected",
            Self::DepthExceeded => "depth_exceeded",
            Self::AlreadyVisited => "already_visited",
            Self::DomainSkipped => "domain_skipped",
            Self::Failed => "failed",
        }
    }

    /// Returns all possible outcomes
    pub fn all_outcomes() -> Vec<Self> {
        vec![
            Self::Collected,
            Self::DepthExceeded,
            Self::AlreadyVisited,
            Self::DomainSkipped,
            Self::Failed,
        ]
    }
}

impl fmt::Display for VisitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
