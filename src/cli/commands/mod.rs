//! CLI command implementations

mod confusion;
mod locate;
mod max;
mod metric;

#[cfg(test)]
mod tests;

use crate::cli::{init_tracing, InputArgs, LogLevel};
use crate::cli::{Cli, Command};
use crate::config::load_config;
use crate::model_metrics::{load_metrics, BinomialMetrics};

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<(), String> {
    let log_level = LogLevel::from_flags(cli.verbose, cli.quiet);
    init_tracing(log_level);

    match cli.command {
        Command::Metric(args) => metric::run_metric(args, log_level),
        Command::Confusion(args) => confusion::run_confusion(args, log_level),
        Command::Max(args) => max::run_max(args, log_level),
        Command::Locate(args) => locate::run_locate(args, log_level),
    }
}

/// Load the binomial payload and apply the optional query configuration
fn load_binomial(input: &InputArgs) -> Result<BinomialMetrics, String> {
    let metrics = load_metrics(&input.payload)
        .and_then(|m| m.into_binomial())
        .map_err(|e| format!("Payload error: {e}"))?;

    match &input.config {
        Some(path) => load_config(path)
            .and_then(|config| metrics.configure(&config))
            .map_err(|e| format!("Config error: {e}")),
        None => Ok(metrics),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("JSON serialization error: {e}"))
}
