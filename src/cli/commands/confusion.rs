//! Confusion command implementation

use super::{load_binomial, to_json};
use crate::cli::logging::log;
use crate::cli::{ConfusionArgs, LogLevel, OutputFormat};

pub fn run_confusion(args: ConfusionArgs, level: LogLevel) -> Result<(), String> {
    let metrics = load_binomial(&args.input)?;
    let names: Vec<&str> = args.metrics.iter().map(String::as_str).collect();
    let cms = metrics
        .thresholds()
        .confusion_matrices(&names, &args.thresholds)
        .map_err(|e| e.to_string())?;

    match args.input.format {
        OutputFormat::Text => {
            log(level, LogLevel::Verbose, &format!("{} confusion matrices", cms.len()));
            print!("{cms}");
        }
        OutputFormat::Json => println!("{}", to_json(&cms)?),
    }

    Ok(())
}
