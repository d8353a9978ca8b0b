//! Per-run crawl state
//!
//! This module contains the state owned by a single traversal:
//! - Visit outcomes for each URL the traversal considers
//! - The page record produced for every collected page
//! - The run context threading the visited set and corpus through a crawl

mod record;
mod run_state;
mod visit_state;

pub use record::PageRecord;
pub use run_state::{CrawlFrame, CrawlRun};
pub use visit_state::VisitOutcome;
