//! Output module for persisting crawl results
//!
//! This module handles:
//! - Writing the collected corpus to JSON files
//! - Recording and printing crawl statistics

mod json_file;
pub mod stats;
mod traits;

pub use json_file::JsonFileSink;
pub use stats::{print_statistics, CrawlStatistics};
pub use traits::{CorpusSink, OutputError, OutputResult};
