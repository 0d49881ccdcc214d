//! CLI module for umbral
//!
//! Command handlers, argument types and output helpers.

mod args;
mod commands;
mod logging;

pub use args::{Cli, Command, ConfusionArgs, InputArgs, LocateArgs, MaxArgs, MetricArgs, OutputFormat};
pub use commands::run_command;
pub use logging::{init_tracing, LogLevel};
