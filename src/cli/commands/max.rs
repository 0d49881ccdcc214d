//! Max command implementation

use super::{load_binomial, to_json};
use crate::cli::{LogLevel, MaxArgs, OutputFormat};

pub fn run_max(args: MaxArgs, _level: LogLevel) -> Result<(), String> {
    let metrics = load_binomial(&args.input)?;
    let threshold = metrics.thresholds().resolve_max_threshold(&args.name).map_err(|e| e.to_string())?;

    match args.input.format {
        OutputFormat::Text => println!("max {} @ threshold={threshold}", args.name),
        OutputFormat::Json => {
            let value = serde_json::json!({ "metric": args.name, "threshold": threshold });
            println!("{}", to_json(&value)?);
        }
    }

    Ok(())
}
