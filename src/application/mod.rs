// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Coordinates the other layers for one run:
//
//   RecordSource → PairExtractor → OutputSink → ProcessingReport
//
// No file formats, no network code, no printing here — only the
// order of the steps and when to stop early.
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// The extract-and-save workflow
pub mod process_use_case;
