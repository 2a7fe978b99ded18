// ============================================================
// Layer 6 — JSON Output Sink
// ============================================================
// Writes the two result files of a run:
//
//   output/
//     headline_qa.json        ← JSON array of QaRecords
//     processing_report.json  ← ProcessingReport
//
// Both files are UTF-8, pretty-printed with two-space indentation,
// and keep non-ASCII characters as-is (serde_json never escapes
// them). The directory is created on first write, so an aborted
// or empty run leaves nothing behind.
//
// Reference: Rust Book §12 (I/O and File Handling)
//            serde_json::to_writer_pretty

use anyhow::{Context, Result};
use serde::Serialize;
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::domain::qa_pair::QaRecord;
use crate::domain::report::ProcessingReport;
use crate::domain::traits::OutputSink;

/// Default name of the records file.
pub const QA_FILENAME: &str = "headline_qa.json";

/// Default name of the report file.
pub const REPORT_FILENAME: &str = "processing_report.json";

/// Writes records and report as JSON files inside one directory.
pub struct JsonOutputSink {
    dir: PathBuf,
}

impl JsonOutputSink {
    /// Create a sink rooted at `dir`. Nothing touches the disk yet.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn qa_path(&self) -> PathBuf {
        self.dir.join(QA_FILENAME)
    }

    pub fn report_path(&self) -> PathBuf {
        self.dir.join(REPORT_FILENAME)
    }

    /// Serialise `value` to `path`, creating the directory if needed.
    fn write_json<T: Serialize + ?Sized>(&self, path: &Path, value: &T) -> Result<()> {
        // create_dir_all is a no-op when the directory already exists
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create output directory '{}'", self.dir.display()))?;

        let file = File::create(path)
            .with_context(|| format!("Cannot create '{}'", path.display()))?;
        let mut writer = BufWriter::new(file);

        serde_json::to_writer_pretty(&mut writer, value)
            .with_context(|| format!("Cannot serialise JSON into '{}'", path.display()))?;
        writer
            .flush()
            .with_context(|| format!("Cannot flush '{}'", path.display()))?;

        Ok(())
    }
}

impl OutputSink for JsonOutputSink {
    fn write_records(&self, records: &[QaRecord]) -> Result<()> {
        let path = self.qa_path();
        self.write_json(&path, records)?;
        tracing::info!("Saved {} QA pairs to '{}'", records.len(), path.display());
        Ok(())
    }

    fn write_report(&self, report: &ProcessingReport) -> Result<()> {
        let path = self.report_path();
        self.write_json(&path, report)?;
        tracing::debug!("Saved processing report to '{}'", path.display());
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::qa_pair::{RECORD_SOURCE, RECORD_TYPE};
    use crate::domain::report::DatasetInfo;
    use std::time::Duration;

    #[test]
    fn test_creates_nested_directory_on_write() {
        let tmp  = tempfile::tempdir().unwrap();
        let dir  = tmp.path().join("a").join("b");
        let sink = JsonOutputSink::new(&dir);

        // Constructing the sink must not create anything
        assert!(!dir.exists());

        let records = vec![QaRecord::new("001", "q", "a", RECORD_TYPE, RECORD_SOURCE)];
        sink.write_records(&records).unwrap();

        assert!(sink.qa_path().exists());
        assert!(!sink.report_path().exists());
    }

    #[test]
    fn test_records_file_is_pretty_json_array() {
        let tmp  = tempfile::tempdir().unwrap();
        let sink = JsonOutputSink::new(tmp.path());

        let records = vec![
            QaRecord::new("001", "Золото растёт?", "Да", RECORD_TYPE, RECORD_SOURCE),
            QaRecord::new("002", "q2", "a2", RECORD_TYPE, RECORD_SOURCE),
        ];
        sink.write_records(&records).unwrap();

        let raw = fs::read_to_string(sink.qa_path()).unwrap();
        // Two-space indentation, non-ASCII written verbatim
        assert!(raw.starts_with("[\n  {\n    \"id\": \"001\""));
        assert!(raw.contains("Золото растёт?"));

        let back: Vec<QaRecord> = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, records);
    }

    #[test]
    fn test_report_file_contents() {
        let tmp    = tempfile::tempdir().unwrap();
        let sink   = JsonOutputSink::new(tmp.path());
        let report = ProcessingReport::new(
            7,
            Duration::from_secs(30),
            DatasetInfo::new("AdaptLLM/finance-tasks", "Headline"),
        );
        sink.write_report(&report).unwrap();

        let raw  = fs::read_to_string(sink.report_path()).unwrap();
        let back: ProcessingReport = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn test_default_file_names() {
        let sink = JsonOutputSink::new("output");
        assert_eq!(sink.qa_path(), PathBuf::from("output/headline_qa.json"));
        assert_eq!(sink.report_path(), PathBuf::from("output/processing_report.json"));
    }
}
