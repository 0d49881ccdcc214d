//! Umbral CLI
//!
//! Query a binomial metrics payload produced by an evaluation run.
//!
//! # Usage
//!
//! ```bash
//! # F1 at the threshold maximizing it
//! umbral metric f1 --payload metrics.json
//!
//! # Recall at several thresholds
//! umbral metric recall --thresholds 0.1,0.5,0.9 --payload metrics.json
//!
//! # Error (1 - accuracy) at every stored threshold, as JSON
//! umbral metric accuracy --error --thresholds all --payload metrics.json --format json
//!
//! # Confusion matrices at 0.5 and at the max-F1 threshold
//! umbral confusion --threshold 0.5 --metric f1 --payload metrics.json
//!
//! # Threshold maximizing specificity
//! umbral max specificity --payload metrics.json
//!
//! # Row matching a threshold
//! umbral locate 0.37 --payload metrics.json
//! ```

use clap::Parser;
use std::process::ExitCode;
use umbral::cli::{run_command, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
