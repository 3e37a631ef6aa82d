//! Append-only session log writer.
//!
//! One JSONL file per session: a `# {header}` first line followed by one
//! [`TickRecord`] per line. Append-only for crash safety; flushed
//! periodically and on drop.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use huelock_common::error::{TrackError, TrackResult};
use huelock_track_model::report::{SessionLogHeader, TickRecord};

/// Flush cadence in records.
const FLUSH_EVERY: u64 = 256;

/// Writes tick records to a JSONL file.
pub struct SessionLogWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    records_written: u64,
}

impl SessionLogWriter {
    /// Create a new log writer, writing the header as the first line.
    pub fn new(path: PathBuf, header: SessionLogHeader) -> TrackResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)?;

        let mut writer = BufWriter::new(file);

        let header_json = serde_json::to_string(&header)?;
        writeln!(writer, "# {header_json}")
            .map_err(|e| TrackError::processing(format!("Failed to write log header: {e}")))?;

        Ok(Self {
            writer,
            path,
            records_written: 0,
        })
    }

    /// Write a single tick record as a JSONL line.
    pub fn write_record(&mut self, record: &TickRecord) -> TrackResult<()> {
        let json = serde_json::to_string(record)?;
        writeln!(self.writer, "{json}")
            .map_err(|e| TrackError::processing(format!("Failed to write record: {e}")))?;
        self.records_written += 1;

        if self.records_written % FLUSH_EVERY == 0 {
            self.flush()?;
        }

        Ok(())
    }

    /// Flush buffered writes to disk.
    pub fn flush(&mut self) -> TrackResult<()> {
        self.writer
            .flush()
            .map_err(|e| TrackError::processing(format!("Failed to flush log: {e}")))?;
        Ok(())
    }

    /// Number of records written.
    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    /// Path to the output file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl Drop for SessionLogWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
