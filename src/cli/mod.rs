// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap, builds the collaborators, and
// prints the summary. All extraction logic lives below Layer 2.
//
// A bare invocation with no subcommand runs the full pipeline
// with default settings.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use commands::{Commands, ParseArgs, RunArgs};
use std::io::Read;

use crate::application::process_use_case::{ProcessConfig, ProcessUseCase, RunOutcome};
use crate::data::extractor::extract_pairs;
use crate::data::loader::{FileSource, HubSource};
use crate::domain::traits::RecordSource;
use crate::infra::output::JsonOutputSink;

#[derive(Parser, Debug)]
#[command(
    name = "headline-qa",
    version,
    about = "Extract numbered Q&A pairs from the AdaptLLM finance Headline dataset."
)]
pub struct Cli {
    /// The subcommand to run; defaults to `run`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Some(Commands::Run(args))   => run_pipeline(args),
            Some(Commands::Parse(args)) => run_parse(args),
            None                        => run_pipeline(RunArgs::default()),
        }
    }
}

/// Handles the `run` subcommand.
fn run_pipeline(args: RunArgs) -> Result<()> {
    let config: ProcessConfig = args.into();

    let source: Box<dyn RecordSource> = match &config.input {
        Some(path) => Box::new(FileSource::new(path, &config.text_column)),
        None => Box::new(HubSource::new(
            &config.dataset,
            &config.subset,
            &config.split,
            &config.text_column,
        )),
    };
    let sink = JsonOutputSink::new(&config.output_dir);

    let use_case = ProcessUseCase::new(config);
    let outcome  = use_case.execute(source.as_ref(), &sink).map_err(|e| {
        tracing::error!("Run aborted: {e:#}");
        e
    })?;

    match outcome {
        RunOutcome::Completed(report) => {
            println!("Saved {} and {}", sink.qa_path().display(), sink.report_path().display());
            println!("\nProcessing report:");
            println!("Total QA pairs: {}", report.total_qa_pairs);
            println!(
                "Processing time: {:.2} seconds ({:.2} minutes)",
                report.processing_time_seconds, report.processing_time_minutes
            );
        }
        RunOutcome::NoBlocks | RunOutcome::NoRecords => {
            tracing::debug!("Nothing written to '{}'", use_case.config().output_dir);
        }
    }

    Ok(())
}

/// Handles the `parse` subcommand.
fn run_parse(args: ParseArgs) -> Result<()> {
    let text = match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read '{path}'"))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Cannot read stdin")?;
            buf
        }
    };

    let records = extract_pairs(&text);
    tracing::info!("Extracted {} QA pairs", records.len());
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}
