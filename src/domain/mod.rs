// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs and traits describing what the system
// works with:
//
//   TextBlock        — one raw text record from the dataset
//   QaRecord         — one extracted question/answer pair
//   ProcessingReport — the summary written at the end of a run
//
// Rules for this layer:
//   - NO network or file I/O
//   - NO clap types
//   - Only plain structs, constants, and traits
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// A raw text record supplied by a RecordSource
pub mod text_block;

// An extracted question-answer pair
pub mod qa_pair;

// The end-of-run processing report
pub mod report;

// Seams between the orchestrator and its collaborators
pub mod traits;
