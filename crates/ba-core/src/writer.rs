//! Append-buffered JSONL category writers.
//!
//! One writer per output category, each owning one `.jsonl` file. Records
//! accumulate in an in-memory buffer and hit the file only when the buffer
//! crosses the flush threshold or `finish` is called, so many small records
//! do not turn into many small writes.

use crate::error::Result;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Buffered bytes before an automatic flush.
const FLUSH_THRESHOLD: usize = 64 * 1024;

/// Output category names; each becomes `<name>.jsonl` in the output
/// directory.
pub mod categories {
    pub const MODULES: &str = "modules";
    pub const MODULE_EDGES: &str = "module_edges";
    pub const SOURCES: &str = "sources";
    pub const CHUNK_PARTS: &str = "chunk_parts";
    pub const OUTPUT_FILES: &str = "output_files";
    pub const ROUTES: &str = "routes";
}

/// Writer for one category file, one JSON object per line.
pub struct CategoryWriter {
    path: PathBuf,
    file: File,
    buffer: Vec<u8>,
    threshold: usize,
    lines: u64,
}

impl CategoryWriter {
    /// Create (truncating) the category file in `dir`.
    pub fn create(dir: &Path, category: &str) -> Result<Self> {
        let path = dir.join(format!("{category}.jsonl"));
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)?;
        Ok(Self {
            path,
            file,
            buffer: Vec::new(),
            threshold: FLUSH_THRESHOLD,
            lines: 0,
        })
    }

    /// Override the flush threshold (tests use small values).
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record as a JSON line, flushing past the threshold.
    pub fn write<T: Serialize>(&mut self, record: &T) -> Result<()> {
        serde_json::to_writer(&mut self.buffer, record)?;
        self.buffer.push(b'\n');
        self.lines += 1;
        if self.buffer.len() >= self.threshold {
            self.flush()?;
        }
        Ok(())
    }

    /// Drain every record from an iterator.
    pub fn write_all<T: Serialize>(&mut self, records: impl IntoIterator<Item = T>) -> Result<()> {
        for record in records {
            self.write(&record)?;
        }
        Ok(())
    }

    /// Push buffered bytes to the file.
    pub fn flush(&mut self) -> Result<()> {
        if !self.buffer.is_empty() {
            self.file.write_all(&self.buffer)?;
            self.buffer.clear();
        }
        Ok(())
    }

    /// Flush and close, returning the number of lines written.
    pub fn finish(mut self) -> Result<u64> {
        self.flush()?;
        self.file.flush()?;
        debug!(path = %self.path.display(), lines = self.lines, "Category file written");
        Ok(self.lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_writes_one_json_object_per_line() {
        let dir = TempDir::new().unwrap();
        let mut writer = CategoryWriter::create(dir.path(), categories::ROUTES).unwrap();
        writer.write(&json!({"route": "a", "total_size": 1})).unwrap();
        writer.write(&json!({"route": "b", "total_size": 2})).unwrap();
        let path = writer.path().to_path_buf();
        assert_eq!(writer.finish().unwrap(), 2);

        let content = std::fs::read_to_string(path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["route"], "a");
    }

    #[test]
    fn test_buffer_held_until_threshold() {
        let dir = TempDir::new().unwrap();
        let mut writer = CategoryWriter::create(dir.path(), "t")
            .unwrap()
            .with_threshold(1024);
        let path = writer.path().to_path_buf();
        writer.write(&json!({"k": 1})).unwrap();
        // Below threshold: nothing on disk yet.
        assert_eq!(std::fs::read(&path).unwrap().len(), 0);
        writer.finish().unwrap();
        assert!(!std::fs::read(&path).unwrap().is_empty());
    }

    #[test]
    fn test_threshold_triggers_flush() {
        let dir = TempDir::new().unwrap();
        let mut writer = CategoryWriter::create(dir.path(), "t")
            .unwrap()
            .with_threshold(8);
        let path = writer.path().to_path_buf();
        writer.write(&json!({"k": "long enough"})).unwrap();
        assert!(!std::fs::read(&path).unwrap().is_empty());
        writer.finish().unwrap();
    }

    #[test]
    fn test_write_all_drains_iterator() {
        let dir = TempDir::new().unwrap();
        let mut writer = CategoryWriter::create(dir.path(), "t").unwrap();
        writer
            .write_all((0..5).map(|i| json!({"i": i})))
            .unwrap();
        assert_eq!(writer.finish().unwrap(), 5);
    }
}
