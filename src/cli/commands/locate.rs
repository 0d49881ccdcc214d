//! Locate command implementation

use super::{load_binomial, to_json};
use crate::cli::logging::log;
use crate::cli::{LocateArgs, LogLevel, OutputFormat};

pub fn run_locate(args: LocateArgs, level: LogLevel) -> Result<(), String> {
    let metrics = load_binomial(&args.input)?;
    let found = metrics.thresholds().locate_threshold(args.threshold).map_err(|e| e.to_string())?;

    match args.input.format {
        OutputFormat::Text => {
            println!("row {} @ threshold={}", found.row, found.actual);
            if found.is_fallback() {
                log(level, LogLevel::Normal, &format!("(closest to requested {})", found.requested));
            }
        }
        OutputFormat::Json => println!("{}", to_json(&found)?),
    }

    Ok(())
}
