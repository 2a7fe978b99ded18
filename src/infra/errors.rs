// ============================================================
// Layer 6 — Source Errors
// ============================================================
// Typed failures raised while acquiring text blocks. The record
// sources return these; the orchestrator wraps them in anyhow
// context and aborts the run before any output is written.
//
// Reference: thiserror crate documentation
//            Rust Book §9 (Error Handling)

use std::io;

use thiserror::Error;

/// Failures while acquiring text blocks from a record source.
///
/// Any of these aborts the run before output files are touched.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("dataset '{dataset}' is unavailable: {reason}")]
    Unavailable { dataset: String, reason: String },
    #[error("dataset '{dataset}' has no data files under subset '{subset}'")]
    NoDataFiles { dataset: String, subset: String },
    #[error("unsupported data file format: {0}")]
    UnsupportedFormat(String),
    #[error("malformed data file '{path}': {reason}")]
    Malformed { path: String, reason: String },
    #[error(transparent)]
    Io(#[from] io::Error),
}
