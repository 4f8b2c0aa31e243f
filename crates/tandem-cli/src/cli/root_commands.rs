use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use tandem_core::enums::CompareMode;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Compare a candidate capture corpus against a baseline.
    Compare(CompareArgs),
    /// Load a capture corpus and summarize its sessions.
    Inspect(InspectArgs),
    /// Print the JSON Schema of a report or a capture record.
    Schema(SchemaArgs),
}

/// `--mode` values.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ModeArg {
    /// Stop at the first diverging record.
    FailFast,
    /// Report every divergence.
    CollectAll,
}

impl From<ModeArg> for CompareMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::FailFast => Self::FailFast,
            ModeArg::CollectAll => Self::CollectAll,
        }
    }
}

/// Capture-layout options shared by commands that load corpora.
#[derive(Clone, Debug, Default, Args)]
pub struct LoadArgs {
    /// Session-loading worker threads (0 = one per CPU).
    #[arg(long)]
    pub workers: Option<usize>,

    /// Directory name to skip under a corpus root; adds to the configured list.
    #[arg(long = "exclude", value_name = "NAME")]
    pub exclude: Vec<String>,
}

/// Arguments for `tandem compare`.
#[derive(Clone, Debug, Args)]
pub struct CompareArgs {
    /// Baseline corpus root.
    pub baseline: PathBuf,

    /// Candidate corpus root.
    pub candidate: PathBuf,

    /// Stop at the first divergence or collect all of them.
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Top-level request key to compare (repeatable); none compares the whole request.
    #[arg(long = "request-field", value_name = "KEY")]
    pub request_fields: Vec<String>,

    /// Top-level response key to compare (repeatable); none compares the whole response.
    #[arg(long = "response-field", value_name = "KEY")]
    pub response_fields: Vec<String>,

    /// Path to skip, e.g. `response.header.Date` or `response.body.*.id` (repeatable).
    #[arg(long, value_name = "PATH")]
    pub ignore: Vec<String>,

    /// Do not treat a differing record kind as a divergence.
    #[arg(long)]
    pub no_kind: bool,

    /// Do not tag generated-looking values as dynamic noise.
    #[arg(long)]
    pub no_noise: bool,

    #[command(flatten)]
    pub load: LoadArgs,
}

/// Arguments for `tandem inspect`.
#[derive(Clone, Debug, Args)]
pub struct InspectArgs {
    /// Corpus root.
    pub root: PathBuf,

    #[command(flatten)]
    pub load: LoadArgs,
}

/// Which schema `tandem schema` prints.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum SchemaTarget {
    /// The comparison report.
    #[default]
    Report,
    /// One JSONL capture record.
    Record,
    /// The corpus summary printed by `inspect`.
    Summary,
}

/// Arguments for `tandem schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    #[arg(value_enum, default_value_t = SchemaTarget::Report)]
    pub target: SchemaTarget,
}
