// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The orchestrator only talks to its collaborators through
// these two traits:
//
//   RecordSource — supplies the raw text blocks
//                  (HubSource, FileSource)
//   OutputSink   — consumes the extracted records and the
//                  final report (JsonOutputSink)
//
// Tests plug in in-memory implementations of both.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

use crate::domain::qa_pair::QaRecord;
use crate::domain::report::ProcessingReport;
use crate::domain::text_block::TextBlock;

// ─── RecordSource ─────────────────────────────────────────────────────────────
/// Anything that can hand over an ordered collection of text blocks.
pub trait RecordSource {
    /// Load every block, in source order. Called exactly once per run;
    /// an error here is fatal for the run.
    fn load_blocks(&self) -> Result<Vec<TextBlock>>;

    /// Short human-readable label used in log lines.
    fn describe(&self) -> String;
}

// ─── OutputSink ───────────────────────────────────────────────────────────────
/// Anything that can persist the run's results.
///
/// `write_report` is only called after `write_records` succeeded.
pub trait OutputSink {
    fn write_records(&self, records: &[QaRecord]) -> Result<()>;

    fn write_report(&self, report: &ProcessingReport) -> Result<()>;
}
