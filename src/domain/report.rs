// ============================================================
// Layer 3 — Processing Report
// ============================================================
// Written once at the end of a successful run, next to the
// QA file:
//
//   {
//     "total_qa_pairs": 1234,
//     "processing_time_seconds": 12.5,
//     "processing_time_minutes": 0.2083,
//     "dataset_info": {
//       "name": "AdaptLLM/finance-tasks",
//       "subset": "Headline",
//       "format_version": "1.0"
//     }
//   }

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Version of the QA file layout.
pub const FORMAT_VERSION: &str = "1.0";

/// Fixed description of where the records came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetInfo {
    pub name:           String,
    pub subset:         String,
    pub format_version: String,
}

impl DatasetInfo {
    pub fn new(name: impl Into<String>, subset: impl Into<String>) -> Self {
        Self {
            name:           name.into(),
            subset:         subset.into(),
            format_version: FORMAT_VERSION.to_string(),
        }
    }
}

/// Summary of one completed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingReport {
    pub total_qa_pairs:          usize,
    pub processing_time_seconds: f64,
    pub processing_time_minutes: f64,
    pub dataset_info:            DatasetInfo,
}

impl ProcessingReport {
    /// Build a report from the record count and the wall-clock time
    /// the run took. Minutes are derived from seconds.
    pub fn new(total_qa_pairs: usize, elapsed: Duration, dataset_info: DatasetInfo) -> Self {
        let seconds = elapsed.as_secs_f64();
        Self {
            total_qa_pairs,
            processing_time_seconds: seconds,
            processing_time_minutes: seconds / 60.0,
            dataset_info,
        }
    }
}
