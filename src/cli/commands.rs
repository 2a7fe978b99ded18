// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Two subcommands:
//
//   run   — load the dataset, extract, save JSON + report
//           (also what a bare `headline-qa` does)
//   parse — extract from a local text file or stdin and print
//           the records, without touching ./output
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};

use crate::application::process_use_case::ProcessConfig;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract QA pairs from the dataset and write them to the output directory
    Run(RunArgs),

    /// Extract QA pairs from a plain text file (or stdin) and print them as JSON
    Parse(ParseArgs),
}

/// All arguments for the `run` command.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Hugging Face dataset repository
    #[arg(long, default_value = "AdaptLLM/finance-tasks")]
    pub dataset: String,

    /// Subset directory inside the dataset repository
    #[arg(long, default_value = "Headline")]
    pub subset: String,

    /// Preferred split; all subset files are used when none match
    #[arg(long, default_value = "train")]
    pub split: String,

    /// Column that holds the raw text of each row
    #[arg(long, default_value = "text")]
    pub text_column: String,

    /// Read rows from a local .json/.jsonl/.parquet file instead of the Hub
    #[arg(long)]
    pub input: Option<String>,

    /// Directory for headline_qa.json and processing_report.json
    #[arg(long, default_value = "output")]
    pub output_dir: String,

    /// Extract on all CPU cores (output order is unchanged)
    #[arg(long)]
    pub parallel: bool,
}

impl Default for RunArgs {
    fn default() -> Self {
        ProcessConfig::default().into()
    }
}

/// Convert CLI RunArgs into the application-layer ProcessConfig.
/// The application layer never sees clap types.
impl From<RunArgs> for ProcessConfig {
    fn from(a: RunArgs) -> Self {
        ProcessConfig {
            dataset:     a.dataset,
            subset:      a.subset,
            split:       a.split,
            text_column: a.text_column,
            input:       a.input,
            output_dir:  a.output_dir,
            parallel:    a.parallel,
        }
    }
}

impl From<ProcessConfig> for RunArgs {
    fn from(c: ProcessConfig) -> Self {
        RunArgs {
            dataset:     c.dataset,
            subset:      c.subset,
            split:       c.split,
            text_column: c.text_column,
            input:       c.input,
            output_dir:  c.output_dir,
            parallel:    c.parallel,
        }
    }
}

/// All arguments for the `parse` command
#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Text file to read; stdin when omitted
    #[arg(long)]
    pub input: Option<String>,
}
