// ============================================================
// Layer 2 — ProcessUseCase
// ============================================================
// Runs the whole pipeline in order:
//
//   Step 1: Start the wall-clock timer
//   Step 2: Load every text block        (Layer 4 - data)
//   Step 3: Extract QA records per block (Layer 4 - data)
//   Step 4: Save the records             (Layer 6 - infra)
//   Step 5: Build and save the report    (Layer 6 - infra)
//
// Early exits:
//   - the source fails        → error, nothing written
//   - the source is empty     → RunOutcome::NoBlocks, nothing written
//   - no block had any pairs  → RunOutcome::NoRecords, nothing written
//
// Reference: Rust Book §13 (Iterators and Closures)
//            rayon (order-preserving parallel collect)

use anyhow::{Context, Result};
use rayon::prelude::*;
use std::time::Instant;

use crate::data::extractor::PairExtractor;
use crate::domain::qa_pair::{QaRecord, RECORD_SOURCE, RECORD_TYPE};
use crate::domain::report::{DatasetInfo, ProcessingReport};
use crate::domain::text_block::TextBlock;
use crate::domain::traits::{OutputSink, RecordSource};

// ─── Run Configuration ────────────────────────────────────────────────────────
// Everything a run can be tuned with. Defaults reproduce a plain
// invocation: Hub dataset AdaptLLM/finance-tasks, subset Headline,
// split train, results under ./output.
#[derive(Debug, Clone)]
pub struct ProcessConfig {
    pub dataset:     String,
    pub subset:      String,
    pub split:       String,
    pub text_column: String,
    /// Local data file to read instead of the Hub
    pub input:       Option<String>,
    pub output_dir:  String,
    /// Run the extraction step on the rayon thread pool
    pub parallel:    bool,
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self {
            dataset:     RECORD_SOURCE.to_string(),
            subset:      "Headline".to_string(),
            split:       "train".to_string(),
            text_column: "text".to_string(),
            input:       None,
            output_dir:  "output".to_string(),
            parallel:    false,
        }
    }
}

// ─── Run Outcome ──────────────────────────────────────────────────────────────
/// How a run that did not fail ended.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// Records and report were written
    Completed(ProcessingReport),
    /// The source returned no blocks; nothing was written
    NoBlocks,
    /// Blocks were loaded but none held a valid pair; nothing was written
    NoRecords,
}

// ─── ProcessUseCase ───────────────────────────────────────────────────────────
pub struct ProcessUseCase {
    config:    ProcessConfig,
    extractor: PairExtractor,
}

impl ProcessUseCase {
    /// Records are tagged with the configured dataset as their source,
    /// so they agree with the report's dataset_info.
    pub fn new(config: ProcessConfig) -> Self {
        let extractor = PairExtractor::new(RECORD_TYPE, config.dataset.as_str());
        Self { config, extractor }
    }

    pub fn config(&self) -> &ProcessConfig {
        &self.config
    }

    /// Execute one run against the given collaborators.
    pub fn execute(&self, source: &dyn RecordSource, sink: &dyn OutputSink) -> Result<RunOutcome> {
        let started = Instant::now();

        // ── Step 2: Acquire ──────────────────────────────────────────────────
        tracing::info!("Loading records from {}", source.describe());
        let blocks = source
            .load_blocks()
            .with_context(|| format!("Failed to load records from {}", source.describe()))?;

        if blocks.is_empty() {
            tracing::info!("Source returned no records; skipping output");
            return Ok(RunOutcome::NoBlocks);
        }
        tracing::info!("Loaded {} records", blocks.len());

        // ── Step 3: Extract ──────────────────────────────────────────────────
        let records = extract_all(&self.extractor, &blocks, self.config.parallel);
        tracing::info!("Extracted {} QA pairs from {} records", records.len(), blocks.len());

        if records.is_empty() {
            tracing::info!("No QA pairs found; skipping output");
            return Ok(RunOutcome::NoRecords);
        }

        // ── Step 4: Save records ─────────────────────────────────────────────
        sink.write_records(&records)?;

        // ── Step 5: Report ───────────────────────────────────────────────────
        let report = ProcessingReport::new(
            records.len(),
            started.elapsed(),
            DatasetInfo::new(&self.config.dataset, &self.config.subset),
        );
        sink.write_report(&report)?;

        Ok(RunOutcome::Completed(report))
    }
}

/// Apply the extractor to every block and flatten the results in
/// source order. The parallel path collects per-block Vecs through
/// rayon's indexed collect, which keeps block order intact.
pub fn extract_all(extractor: &PairExtractor, blocks: &[TextBlock], parallel: bool) -> Vec<QaRecord> {
    if parallel {
        let per_block: Vec<Vec<QaRecord>> = blocks
            .par_iter()
            .map(|block| extract_block(extractor, block))
            .collect();
        per_block.into_iter().flatten().collect()
    } else {
        blocks
            .iter()
            .flat_map(|block| extract_block(extractor, block))
            .collect()
    }
}

fn extract_block(extractor: &PairExtractor, block: &TextBlock) -> Vec<QaRecord> {
    let records = extractor.extract(&block.text);
    tracing::debug!(
        "Extracted {} QA pairs from '{}'",
        records.len(),
        block.origin.as_deref().unwrap_or("<unlabelled>")
    );
    records
}
