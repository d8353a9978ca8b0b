//! Output handler traits and types
//!
//! This module defines the trait interface for corpus sinks and the errors
//! they report.

use crate::state::PageRecord;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize corpus: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for corpus sinks
///
/// A sink receives the finished corpus of a crawl, in visitation order, and
/// persists it somewhere. Sinks are only ever handed a corpus from a crawl
/// that completed; a crawl that failed to start produces no output at all.
pub trait CorpusSink {
    /// Persists the corpus, returning where it was written
    ///
    /// # Arguments
    ///
    /// * `corpus` - The collected page records
    fn persist(&self, corpus: &[PageRecord]) -> OutputResult<PathBuf>;
}
