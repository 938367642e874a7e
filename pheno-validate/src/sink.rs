//! Append-only sink for rows flagged invalid.
//!
//! Every row flagged by any rule, across the whole run, lands in one
//! `invalid_data.csv` whose header is the configured input header list (no
//! index column). Multiple workers append concurrently; a mutex serializes
//! writes.

use std::fs::File;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::error::Result;

/// Shared, append-only `invalid_data.csv` writer.
///
/// Created fresh per run (truncating any previous file), torn down at run
/// end.
pub struct InvalidRowSink {
    path: PathBuf,
    writer: Mutex<csv::Writer<File>>,
}

impl InvalidRowSink {
    /// Create `invalid_data.csv` under `output_dir` and write the header row.
    pub fn create(output_dir: &Path, headers: &[String]) -> Result<Self> {
        let path = output_dir.join("invalid_data.csv");
        let mut writer = csv::Writer::from_path(&path)?;
        writer.write_record(headers)?;
        writer.flush()?;
        Ok(Self {
            path,
            writer: Mutex::new(writer),
        })
    }

    /// Append flagged rows verbatim. Rows are written in the order given and
    /// flushed before the lock is released.
    pub fn append(&self, rows: &[Vec<String>]) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let mut writer = self.writer.lock();
        for row in rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Path of the sink file, surfaced to the user on abort.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
