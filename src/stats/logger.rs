//! JSONL file logger for answer events.

use std::fs::{create_dir_all, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use super::event::AnswerEvent;

/// Flush to disk every this many events
const FLUSH_EVERY: u64 = 100;

/// Append-only writer for the answer history.
pub struct JsonlStatsLog {
    writer: BufWriter<File>,
    written: u64,
}

impl JsonlStatsLog {
    /// Open (or create) the log file, creating parent directories.
    pub fn open(path: &Path) -> std::io::Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        tracing::info!("Recording answers to {}", path.display());

        Ok(Self {
            writer: BufWriter::new(file),
            written: 0,
        })
    }

    /// Append one event.
    pub fn log(&mut self, event: &AnswerEvent) -> std::io::Result<()> {
        let json = serde_json::to_string(event)?;
        writeln!(self.writer, "{}", json)?;
        self.written += 1;
        // Flush periodically for durability
        if self.written % FLUSH_EVERY == 0 {
            self.writer.flush()?;
        }
        Ok(())
    }

    /// Flush all buffered data.
    pub fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }

    pub fn written(&self) -> u64 {
        self.written
    }
}

impl Drop for JsonlStatsLog {
    fn drop(&mut self) {
        if let Err(e) = self.writer.flush() {
            tracing::error!("Failed to flush stats log: {}", e);
        }
    }
}

impl std::fmt::Debug for JsonlStatsLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonlStatsLog")
            .field("written", &self.written)
            .finish_non_exhaustive()
    }
}
