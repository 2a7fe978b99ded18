// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting pieces used by the other layers:
//
//   output.rs — JsonOutputSink: creates the output directory on
//               demand and writes headline_qa.json and
//               processing_report.json
//
//   errors.rs — SourceError: typed acquisition failures raised by
//               the record sources
//
// Reference: Rust Book §9 (Error Handling with anyhow)
//            Rust Book §12 (I/O and File Handling)

/// JSON file output for records and the processing report
pub mod output;

/// Error types for record acquisition
pub mod errors;
