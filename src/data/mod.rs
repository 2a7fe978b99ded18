// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the raw dataset and the structured records:
//
//   Hugging Face Hub / local file
//       │
//       ▼
//   HubSource / FileSource   → raw TextBlocks, in source order
//       │
//       ▼
//   PairExtractor            → QaRecords per block
//
// Reference: Rust Book §13 (Iterators and Closures)

/// Loads text blocks from the Hub or from a local file
pub mod loader;

/// Turns "Q<N>: ... A<N>: ..." segments into QaRecords
pub mod extractor;
