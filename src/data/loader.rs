// ============================================================
// Layer 4 — Record Sources
// ============================================================
// Two ways of getting text blocks into the pipeline:
//
//   HubSource  — downloads the dataset files from the Hugging Face
//                Hub (AdaptLLM/finance-tasks, subset "Headline")
//                through hf-hub's blocking API and its local cache
//   FileSource — reads one local data file
//
// Both end up in read_rows(), which understands three formats:
//
//   .parquet — one row per parquet record
//   .jsonl   — one JSON object per line
//   .json    — a JSON array of objects, or JSON lines
//
// Every row must carry a string column (default "text"). Rows
// without it are skipped with a warning; an unreadable file
// fails the whole acquisition.
//
// Reference: hf-hub crate documentation (api::sync)
//            parquet crate documentation (record::Row)
//            Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use hf_hub::api::sync::ApiBuilder;
use hf_hub::{Repo, RepoType};
use parquet::file::reader::{FileReader, SerializedFileReader};
use parquet::record::Field;
use serde_json::Value;
use std::{
    fs::{self, File},
    path::{Path, PathBuf},
};

use crate::domain::text_block::TextBlock;
use crate::domain::traits::RecordSource;
use crate::infra::errors::SourceError;

/// File extensions accepted as dataset shards, in lower case.
const DATA_EXTENSIONS: [&str; 3] = ["parquet", "jsonl", "json"];

// ─── HubSource ────────────────────────────────────────────────────────────────
/// Loads text blocks from a dataset repository on the Hugging Face Hub.
pub struct HubSource {
    /// Repository id, e.g. "AdaptLLM/finance-tasks"
    dataset: String,
    /// Directory inside the repository, e.g. "Headline"
    subset: String,
    /// Preferred split, e.g. "train"
    split: String,
    /// Name of the column holding the raw text
    text_column: String,
}

impl HubSource {
    pub fn new(
        dataset:     impl Into<String>,
        subset:      impl Into<String>,
        split:       impl Into<String>,
        text_column: impl Into<String>,
    ) -> Self {
        Self {
            dataset:     dataset.into(),
            subset:      subset.into(),
            split:       split.into(),
            text_column: text_column.into(),
        }
    }

    fn unavailable(&self, reason: String) -> SourceError {
        SourceError::Unavailable {
            dataset: self.dataset.clone(),
            reason,
        }
    }
}

impl RecordSource for HubSource {
    fn load_blocks(&self) -> Result<Vec<TextBlock>> {
        let api = ApiBuilder::new()
            .with_progress(true)
            .build()
            .map_err(|e| self.unavailable(format!("failed building hf-hub client: {e}")))?;

        let repo_api = api.repo(Repo::new(self.dataset.clone(), RepoType::Dataset));

        tracing::info!("Reading file list for dataset '{}'", self.dataset);
        let info = repo_api
            .info()
            .map_err(|e| self.unavailable(format!("failed reading repository info: {e}")))?;

        let files = select_data_files(
            info.siblings.into_iter().map(|s| s.rfilename),
            &self.subset,
            &self.split,
        );
        if files.is_empty() {
            return Err(SourceError::NoDataFiles {
                dataset: self.dataset.clone(),
                subset:  self.subset.clone(),
            }
            .into());
        }
        tracing::info!("Selected {} data file(s): {:?}", files.len(), files);

        let mut blocks = Vec::new();
        for remote in &files {
            let local = repo_api
                .get(remote)
                .map_err(|e| self.unavailable(format!("failed downloading '{remote}': {e}")))?;

            let rows = read_rows(&local, &self.text_column, remote)
                .with_context(|| format!("Cannot load '{remote}' from '{}'", self.dataset))?;
            tracing::debug!("Loaded {} rows from '{}'", rows.len(), remote);
            blocks.extend(rows);
        }

        Ok(blocks)
    }

    fn describe(&self) -> String {
        format!("hf-hub dataset {} / {} ({})", self.dataset, self.subset, self.split)
    }
}

/// Pick the data files of one subset out of a repository listing.
///
/// Files under `<subset>/` with a known extension are kept. If any of
/// them is tagged with `split` ("train.jsonl", "train-0000-of-0001.parquet",
/// "train/part.json") only those are used; otherwise every file of the
/// subset is. The result is sorted so rows come out in a stable order.
pub fn select_data_files<I>(names: I, subset: &str, split: &str) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let prefix = format!("{}/", subset.trim_matches('/'));

    let mut candidates: Vec<String> = names
        .into_iter()
        .filter(|name| subset.is_empty() || name.starts_with(&prefix))
        .filter(|name| has_data_extension(Path::new(name)))
        .collect();
    candidates.sort();

    if split.is_empty() {
        return candidates;
    }

    let tagged: Vec<String> = candidates
        .iter()
        .filter(|name| is_split_file(name, split))
        .cloned()
        .collect();

    if tagged.is_empty() {
        candidates
    } else {
        tagged
    }
}

fn is_split_file(name: &str, split: &str) -> bool {
    let file_name = Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");

    name.contains(&format!("/{split}/"))
        || name.contains(&format!("-{split}-"))
        || file_name.starts_with(&format!("{split}."))
        || file_name.starts_with(&format!("{split}-"))
}

fn has_data_extension(path: &Path) -> bool {
    extension_of(path).is_some_and(|ext| DATA_EXTENSIONS.contains(&ext.as_str()))
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

// ─── FileSource ───────────────────────────────────────────────────────────────
/// Loads text blocks from a single local data file.
pub struct FileSource {
    path:        PathBuf,
    text_column: String,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>, text_column: impl Into<String>) -> Self {
        Self {
            path:        path.into(),
            text_column: text_column.into(),
        }
    }
}

impl RecordSource for FileSource {
    fn load_blocks(&self) -> Result<Vec<TextBlock>> {
        let label = self.path.display().to_string();
        let rows  = read_rows(&self.path, &self.text_column, &label)
            .with_context(|| format!("Cannot load records from '{label}'"))?;
        Ok(rows)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

// ─── Row Reading ──────────────────────────────────────────────────────────────

/// Read every row of a data file into TextBlocks, dispatching on the
/// file extension. `label` becomes the origin prefix of each block.
pub fn read_rows(path: &Path, text_column: &str, label: &str) -> Result<Vec<TextBlock>, SourceError> {
    let texts = match extension_of(path).as_deref() {
        Some("parquet") => parquet_texts(path, text_column)?,
        Some("jsonl")   => json_lines_texts(&fs::read_to_string(path)?, text_column, label)?,
        Some("json")    => json_texts(&fs::read_to_string(path)?, text_column, label)?,
        _ => return Err(SourceError::UnsupportedFormat(path.display().to_string())),
    };

    let mut blocks = Vec::with_capacity(texts.len());
    for (idx, text) in texts.into_iter().enumerate() {
        match text {
            Some(text) => blocks.push(TextBlock::new(text).with_origin(format!("{label}#{idx}"))),
            None => tracing::warn!(
                "Skipping row {} of '{}': no string column '{}'",
                idx,
                label,
                text_column
            ),
        }
    }

    Ok(blocks)
}

/// Pull the text column out of one JSON row.
fn text_of(row: &Value, text_column: &str) -> Option<String> {
    row.get(text_column)
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// `.json` — either a top-level array of rows, a single row object,
/// or (as the Hub often ships them) JSON lines under a .json name.
fn json_texts(content: &str, text_column: &str, label: &str) -> Result<Vec<Option<String>>, SourceError> {
    match serde_json::from_str::<Value>(content) {
        Ok(Value::Array(rows)) => Ok(rows.iter().map(|row| text_of(row, text_column)).collect()),
        Ok(row @ Value::Object(_)) => Ok(vec![text_of(&row, text_column)]),
        Ok(_) => Err(SourceError::Malformed {
            path:   label.to_string(),
            reason: "expected a JSON array or object".to_string(),
        }),
        Err(_) => json_lines_texts(content, text_column, label),
    }
}

/// `.jsonl` — one row per non-blank line.
fn json_lines_texts(content: &str, text_column: &str, label: &str) -> Result<Vec<Option<String>>, SourceError> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(line_no, line)| {
            serde_json::from_str::<Value>(line)
                .map(|row| text_of(&row, text_column))
                .map_err(|e| SourceError::Malformed {
                    path:   label.to_string(),
                    reason: format!("line {}: {e}", line_no + 1),
                })
        })
        .collect()
}

/// `.parquet` — walk every record and pick the named string field.
/// Un-annotated BYTE_ARRAY columns arrive as `Field::Bytes` and are
/// decoded as UTF-8; anything else counts as a missing text.
fn parquet_texts(path: &Path, text_column: &str) -> Result<Vec<Option<String>>, SourceError> {
    let malformed = |reason: String| SourceError::Malformed {
        path: path.display().to_string(),
        reason,
    };

    let file   = File::open(path)?;
    let reader = SerializedFileReader::new(file)
        .map_err(|e| malformed(format!("cannot open parquet file: {e}")))?;
    let rows   = reader
        .get_row_iter(None)
        .map_err(|e| malformed(format!("cannot iterate parquet rows: {e}")))?;

    let mut texts = Vec::new();
    for row in rows {
        let row  = row.map_err(|e| malformed(format!("cannot read parquet row: {e}")))?;
        let text = row
            .get_column_iter()
            .find(|(name, _)| name.as_str() == text_column)
            .and_then(|(_, field)| match field {
                Field::Str(s)   => Some(s.clone()),
                Field::Bytes(b) => b.as_utf8().ok().map(str::to_string),
                _               => None,
            });
        texts.push(text);
    }

    Ok(texts)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use parquet::data_type::{ByteArray, ByteArrayType};
    use parquet::file::properties::WriterProperties;
    use parquet::file::writer::SerializedFileWriter;
    use parquet::schema::parser::parse_message_type;
    use std::io::Write;
    use std::sync::Arc;

    /// Write a single-column parquet file. `def_levels` is only needed
    /// for OPTIONAL columns; `values` holds the non-null entries.
    fn write_parquet(path: &Path, schema: &str, values: &[&[u8]], def_levels: Option<&[i16]>) {
        let schema = Arc::new(parse_message_type(schema).unwrap());
        let props  = Arc::new(WriterProperties::builder().build());
        let file   = File::create(path).unwrap();

        let mut writer = SerializedFileWriter::new(file, schema, props).unwrap();
        let mut group  = writer.next_row_group().unwrap();
        while let Some(mut column) = group.next_column().unwrap() {
            let data: Vec<ByteArray> = values.iter().map(|v| ByteArray::from(v.to_vec())).collect();
            column
                .typed::<ByteArrayType>()
                .write_batch(&data, def_levels, None)
                .unwrap();
            column.close().unwrap();
        }
        group.close().unwrap();
        writer.close().unwrap();
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_select_prefers_split_files() {
        let listing = names(&[
            "README.md",
            "Headline/train.jsonl",
            "Headline/test.jsonl",
            "FPB/train.jsonl",
        ]);
        let got = select_data_files(listing, "Headline", "train");
        assert_eq!(got, names(&["Headline/train.jsonl"]));
    }

    #[test]
    fn test_select_falls_back_to_all_subset_files() {
        let listing = names(&["Headline/test.json", "Headline/notes.txt", "NER/test.json"]);
        let got     = select_data_files(listing, "Headline", "train");
        assert_eq!(got, names(&["Headline/test.json"]));
    }

    #[test]
    fn test_select_sharded_parquet_sorted() {
        let listing = names(&[
            "Headline/train-00001-of-00002.parquet",
            "Headline/train-00000-of-00002.parquet",
        ]);
        let got = select_data_files(listing, "Headline", "train");
        assert_eq!(
            got,
            names(&[
                "Headline/train-00000-of-00002.parquet",
                "Headline/train-00001-of-00002.parquet",
            ])
        );
    }

    #[test]
    fn test_select_unknown_subset_is_empty() {
        let listing = names(&["Headline/train.jsonl"]);
        assert!(select_data_files(listing, "Missing", "train").is_empty());
    }

    #[test]
    fn test_json_array_rows() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.json");
        fs::write(&path, r#"[{"text": "Q1: a A1: b"}, {"text": "no pairs"}]"#).unwrap();

        let blocks = read_rows(&path, "text", "rows.json").unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].text, "Q1: a A1: b");
        assert_eq!(blocks[1].origin.as_deref(), Some("rows.json#1"));
    }

    #[test]
    fn test_json_file_holding_json_lines() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.json");
        fs::write(&path, "{\"text\": \"first\"}\n{\"text\": \"second\"}\n").unwrap();

        let blocks = read_rows(&path, "text", "test.json").unwrap();
        let texts: Vec<_> = blocks.iter().map(|b| b.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[test]
    fn test_jsonl_skips_rows_without_text() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.jsonl");
        let mut f = File::create(&path).unwrap();
        writeln!(f, "{{\"text\": \"keep me\"}}").unwrap();
        writeln!(f).unwrap();
        writeln!(f, "{{\"input\": \"wrong column\"}}").unwrap();
        writeln!(f, "{{\"text\": 42}}").unwrap();

        let blocks = read_rows(&path, "text", "rows.jsonl").unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, "keep me");
    }

    #[test]
    fn test_jsonl_bad_line_is_malformed() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.jsonl");
        fs::write(&path, "{\"text\": \"ok\"}\nnot json\n").unwrap();

        let err = read_rows(&path, "text", "rows.jsonl").unwrap_err();
        assert!(matches!(err, SourceError::Malformed { .. }));
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_custom_text_column() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.jsonl");
        fs::write(&path, "{\"input\": \"Q1: a A1: b\"}\n").unwrap();

        let blocks = read_rows(&path, "input", "rows.jsonl").unwrap();
        assert_eq!(blocks[0].text, "Q1: a A1: b");
    }

    #[test]
    fn test_parquet_utf8_column_with_nulls() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("train-00000-of-00001.parquet");
        write_parquet(
            &path,
            "message schema { OPTIONAL BYTE_ARRAY text (UTF8); }",
            &[b"Q1: a A1: b" as &[u8], b"x"],
            Some(&[1, 0, 1][..]),
        );

        let blocks = read_rows(&path, "text", "shard").unwrap();
        let texts: Vec<_> = blocks.iter().map(|b| b.text.as_str()).collect();
        // The null row is skipped; origins keep the original row index
        assert_eq!(texts, vec!["Q1: a A1: b", "x"]);
        assert_eq!(blocks[1].origin.as_deref(), Some("shard#2"));
    }

    #[test]
    fn test_parquet_plain_byte_array_column_is_decoded() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.parquet");
        write_parquet(
            &path,
            "message schema { REQUIRED BYTE_ARRAY text; }",
            &[b"Q1: a A1: b" as &[u8], b"x"],
            None,
        );

        let blocks = read_rows(&path, "text", "rows.parquet").unwrap();
        let texts: Vec<_> = blocks.iter().map(|b| b.text.as_str()).collect();
        assert_eq!(texts, vec!["Q1: a A1: b", "x"]);
    }

    #[test]
    fn test_parquet_invalid_utf8_bytes_are_skipped() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.parquet");
        write_parquet(
            &path,
            "message schema { REQUIRED BYTE_ARRAY text; }",
            &[&[0xff_u8, 0xfe] as &[u8], b"ok"],
            None,
        );

        let blocks = read_rows(&path, "text", "rows.parquet").unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, "ok");
    }

    #[test]
    fn test_parquet_garbage_file_is_malformed() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.parquet");
        fs::write(&path, b"not a parquet file").unwrap();

        let err = read_rows(&path, "text", "rows.parquet").unwrap_err();
        assert!(matches!(err, SourceError::Malformed { .. }));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.csv");
        fs::write(&path, "text\nhello\n").unwrap();

        let err = read_rows(&path, "text", "rows.csv").unwrap_err();
        assert!(matches!(err, SourceError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_rows(&dir.path().join("gone.jsonl"), "text", "gone").unwrap_err();
        assert!(matches!(err, SourceError::Io(_)));
    }

    #[test]
    fn test_file_source_describe_and_load() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.jsonl");
        fs::write(&path, "{\"text\": \"Q1: a A1: b\"}\n").unwrap();

        let source = FileSource::new(path.clone(), "text");
        assert!(source.describe().starts_with("file "));
        assert_eq!(source.load_blocks().unwrap().len(), 1);
    }
}
