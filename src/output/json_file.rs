//! JSON file corpus sink
//!
//! Writes each corpus to its own file named with a fresh UUID, so repeated
//! runs into the same directory never overwrite one another.

use crate::output::traits::{CorpusSink, OutputResult};
use crate::state::PageRecord;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Sink writing `<uuid>.json` files into a directory
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    directory: PathBuf,
}

impl JsonFileSink {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl CorpusSink for JsonFileSink {
    /// Writes the corpus as a JSON array with four-space indentation
    ///
    /// The directory is created if missing. Text is written as UTF-8 without
    /// escaping non-ASCII characters.
    fn persist(&self, corpus: &[PageRecord]) -> OutputResult<PathBuf> {
        std::fs::create_dir_all(&self.directory)?;

        let path = self.directory.join(format!("{}.json", Uuid::new_v4()));
        let file = File::create(&path)?;
        let mut writer = BufWriter::new(file);

        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
        corpus.serialize(&mut serializer)?;
        writer.flush()?;

        tracing::info!("Wrote {} page records to {}", corpus.len(), path.display());
        Ok(path)
    }
}
