// ============================================================
// Layer 4 — Pair Extractor
// ============================================================
// Finds numbered question/answer segments inside a text block:
//
//   "Q1: Does the news headline talk about price? A1: Yes
//    Q2: Does it talk about a future rise?          A2: No"
//
//   → [ {id: "001", Question: "Does the news ...", Answer: "Yes"},
//       {id: "002", Question: "Does it talk ...",  Answer: "No"} ]
//
// The scan works marker by marker instead of through a regex:
//
//   1. find the next question marker  Q<N>:
//   2. find the first answer marker   A<N>:  (same digits) after it
//   3. the answer runs until the next Q<M>: marker, or end of text
//   4. trim both sides, emit a record, resume at the boundary
//
// A question marker with no matching answer marker anywhere after
// it produces nothing; scanning resumes one character after its
// "Q". The question text is everything between the two markers,
// so "Q1: a Q2: b A2: c A1: d" pairs Q1 with A1 and the question
// text swallows the inner markers.
//
// Markers are pure ASCII ('Q', 'A', digits, ':'), so every byte
// offset produced here is a valid char boundary in the &str.
//
// Reference: Rust Book §8 (Strings), §13 (Iterators)

use crate::domain::qa_pair::{QaRecord, RECORD_SOURCE, RECORD_TYPE};

/// Minimum width of a rendered id. Longer ordinals are kept whole.
const ID_WIDTH: usize = 3;

/// A located `Q<N>:` marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct QuestionMarker<'a> {
    /// Byte offset of the 'Q'
    start: usize,
    /// Byte offset just past the ':'
    end: usize,
    /// The ordinal digits exactly as written in the text
    digits: &'a str,
}

/// Extracts QA records and stamps them with fixed category and
/// provenance tags.
#[derive(Debug, Clone)]
pub struct PairExtractor {
    record_type: String,
    source:      String,
}

impl PairExtractor {
    /// Create an extractor with custom tags.
    pub fn new(record_type: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            record_type: record_type.into(),
            source:      source.into(),
        }
    }

    /// Extract every paired segment from `text`, in order of appearance.
    ///
    /// Never fails: malformed or unpaired markers simply yield fewer
    /// records, and text without markers yields an empty Vec.
    pub fn extract(&self, text: &str) -> Vec<QaRecord> {
        let mut records = Vec::new();
        let mut cursor  = 0usize;

        while let Some(q) = find_question_marker(text, cursor) {
            let answer_tag = format!("A{}:", q.digits);

            let Some(rel) = text[q.end..].find(&answer_tag) else {
                // Unpaired — try the next 'Q' after this one
                cursor = q.start + 1;
                continue;
            };
            let answer_marker = q.end + rel;
            let answer_start  = answer_marker + answer_tag.len();

            let answer_end = find_question_marker(text, answer_start)
                .map(|next| next.start)
                .unwrap_or(text.len());

            records.push(QaRecord::new(
                format_ordinal(q.digits),
                text[q.end..answer_marker].trim(),
                text[answer_start..answer_end].trim(),
                self.record_type.as_str(),
                self.source.as_str(),
            ));

            cursor = answer_end;
        }

        records
    }
}

impl Default for PairExtractor {
    fn default() -> Self {
        Self::new(RECORD_TYPE, RECORD_SOURCE)
    }
}

/// Extract records with the default headline tags.
pub fn extract_pairs(text: &str) -> Vec<QaRecord> {
    PairExtractor::default().extract(text)
}

/// Render an ordinal as an id: leading zeros dropped, then left-padded
/// to at least three digits. `"7"` → `"007"`, `"1000"` → `"1000"`.
///
/// Works on the digit string directly, so ordinals wider than any
/// integer type are rendered without loss.
pub fn format_ordinal(digits: &str) -> String {
    let significant = digits.trim_start_matches('0');
    let significant = if significant.is_empty() { "0" } else { significant };
    format!("{significant:0>width$}", width = ID_WIDTH)
}

/// Find the first `Q<digits>:` marker starting at or after `from`.
fn find_question_marker(text: &str, from: usize) -> Option<QuestionMarker<'_>> {
    let bytes   = text.as_bytes();
    let mut pos = from;

    while pos < text.len() {
        let start = pos + text[pos..].find('Q')?;

        let digits_start = start + 1;
        let digits_len   = bytes[digits_start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        let colon = digits_start + digits_len;

        if digits_len > 0 && bytes.get(colon) == Some(&b':') {
            return Some(QuestionMarker {
                start,
                end: colon + 1,
                digits: &text[digits_start..colon],
            });
        }

        pos = start + 1;
    }

    None
}
