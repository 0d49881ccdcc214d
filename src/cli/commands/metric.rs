//! Metric command implementation

use super::{load_binomial, to_json};
use crate::cli::logging::log;
use crate::cli::{LogLevel, MetricArgs, OutputFormat};
use crate::metrics::Summary;

pub fn run_metric(args: MetricArgs, level: LogLevel) -> Result<(), String> {
    let metrics = load_binomial(&args.input)?;
    let mut result = metrics.thresholds().metric(&args.name, args.thresholds).map_err(|e| e.to_string())?;
    if args.error {
        result = result.to_error();
    }

    match args.input.format {
        OutputFormat::Text => {
            let label = if args.error { format!("1 - {}", args.name) } else { args.name.clone() };
            log(level, LogLevel::Normal, &format!("Metric: {label}"));
            print!("{result}");
            match result.summary() {
                Summary::Scalar(v) => println!("value: {v}"),
                Summary::Values(vs) => println!("values: {vs:?}"),
            }
        }
        OutputFormat::Json => println!("{}", to_json(&result)?),
    }

    Ok(())
}
