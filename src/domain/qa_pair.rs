// ============================================================
// Layer 3 — QaRecord Domain Type
// ============================================================
// One question/answer pair extracted from a TextBlock.
//
// The id is the ordinal written in the source text ("Q7:" → "007"),
// NOT a running counter. Two blocks that both start at "Q1:" will
// therefore both produce an id of "001".
//
// Serialised keys match the published export of the dataset:
//
//   {
//     "id": "001",
//     "Question": "...",
//     "Answer": "...",
//     "type": "headline",
//     "source": "AdaptLLM/finance-tasks"
//   }
//
// Reference: Rust Book §5 (Structs)
//            serde attributes (rename)

use serde::{Deserialize, Serialize};

/// Category tag written on every record.
pub const RECORD_TYPE: &str = "headline";

/// Provenance tag written on every record.
pub const RECORD_SOURCE: &str = "AdaptLLM/finance-tasks";

/// A structured question/answer pair.
///
/// Records are built once by the extractor and never mutated, so all
/// fields are read through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaRecord {
    id: String,

    #[serde(rename = "Question")]
    question: String,

    #[serde(rename = "Answer")]
    answer: String,

    #[serde(rename = "type")]
    record_type: String,

    source: String,
}

impl QaRecord {
    /// Create a new record. The caller is responsible for trimming
    /// and id formatting — this constructor stores values as given.
    pub fn new(
        id:          impl Into<String>,
        question:    impl Into<String>,
        answer:      impl Into<String>,
        record_type: impl Into<String>,
        source:      impl Into<String>,
    ) -> Self {
        Self {
            id:          id.into(),
            question:    question.into(),
            answer:      answer.into(),
            record_type: record_type.into(),
            source:      source.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn record_type(&self) -> &str {
        &self.record_type
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}
