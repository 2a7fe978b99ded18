// ============================================================
// Layer 3 — TextBlock Domain Type
// ============================================================
// A single text record pulled from the dataset. One block may
// contain several numbered segments:
//
//   "Q1: Does the headline talk about gold? A1: Yes
//    Q2: Is the price going up? A2: No"
//
// The origin is only kept for log messages, so a bad row can be
// traced back to the shard file it came from.

use serde::{Deserialize, Serialize};

/// A raw text record before extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBlock {
    /// The free-form text containing zero or more Q/A segments
    pub text: String,

    /// Where the block came from, e.g. `Headline/train.jsonl#12`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

impl TextBlock {
    /// Create a block with no origin information.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text:   text.into(),
            origin: None,
        }
    }

    /// Attach an origin label for diagnostics.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }
}
