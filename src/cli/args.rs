//! CLI types - Cli, Command, and argument structs

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::metrics::ThresholdSpec;

/// Umbral: threshold metric queries over classifier evaluations
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "umbral")]
#[command(author = "PAIML")]
#[command(version)]
#[command(about = "Query metrics and confusion matrices of a binary classifier at any decision threshold")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Metric values at one, several, all, or the maximizing threshold
    Metric(MetricArgs),

    /// Confusion matrices at explicit or metric-maximizing thresholds
    Confusion(ConfusionArgs),

    /// Threshold at which a metric is maximal
    Max(MaxArgs),

    /// Table row matching a threshold
    Locate(LocateArgs),
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {s}. Valid formats: text, json")),
        }
    }
}

/// Input arguments shared by every command
#[derive(Args, Debug, Clone, PartialEq)]
pub struct InputArgs {
    /// Metrics payload (JSON, binomial schema)
    #[arg(short, long)]
    pub payload: PathBuf,

    /// Query configuration (YAML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the metric command
#[derive(Args, Debug, Clone, PartialEq)]
pub struct MetricArgs {
    /// Metric name or alias (e.g. f1, recall, specificity)
    pub name: String,

    /// Thresholds: "max", "all", a number, or a comma-separated list
    #[arg(short, long, default_value = "max", allow_hyphen_values = true)]
    pub thresholds: ThresholdSpec,

    /// Report 1 - value (error from accuracy, per-class error from per-class accuracy)
    #[arg(long)]
    pub error: bool,

    #[command(flatten)]
    pub input: InputArgs,
}

/// Arguments for the confusion command
#[derive(Args, Debug, Clone, PartialEq)]
pub struct ConfusionArgs {
    /// Metric whose maximizing threshold to use (repeatable)
    #[arg(short, long = "metric")]
    pub metrics: Vec<String>,

    /// Explicit threshold (repeatable)
    #[arg(short, long = "threshold", allow_negative_numbers = true)]
    pub thresholds: Vec<f64>,

    #[command(flatten)]
    pub input: InputArgs,
}

/// Arguments for the max command
#[derive(Args, Debug, Clone, PartialEq)]
pub struct MaxArgs {
    /// Metric name or alias
    pub name: String,

    #[command(flatten)]
    pub input: InputArgs,
}

/// Arguments for the locate command
#[derive(Args, Debug, Clone, PartialEq)]
pub struct LocateArgs {
    /// Threshold to look up
    #[arg(allow_negative_numbers = true)]
    pub threshold: f64,

    #[command(flatten)]
    pub input: InputArgs,
}
