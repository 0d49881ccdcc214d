//! Error types for threshold metric queries.
//!
//! Usage errors (bad metric names, out-of-range thresholds) are reported
//! synchronously at the point of detection. None of them are transient.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for umbral operations.
pub type Result<T> = std::result::Result<T, MetricsError>;

/// Errors raised while loading or querying evaluation metrics.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// Metric name is neither canonical nor a known alias.
    #[error("Invalid metric name '{name}'\n  → The only allowable metrics are {legal}")]
    InvalidMetricName { name: String, legal: String },

    /// Threshold outside [0, 1] or not a number.
    #[error("Threshold must be between 0 and 1, but got {0}")]
    InvalidThreshold(String),

    /// The max-criteria table has no entry for the metric.
    #[error("No metric {0} in the max criteria table")]
    MetricNotFoundInCriteriaTable(String),

    /// Query against a table with zero rows.
    #[error("Threshold table is empty\n  → The evaluation frame had no observations")]
    EmptyTable,

    /// Row counts disagree on the total observation count.
    #[error("Inconsistent counts in threshold row {row}: tn+fp+fn+tp = {actual}, expected {expected}")]
    InconsistentCounts { row: usize, expected: u64, actual: u64 },

    /// Malformed metrics payload or configuration document.
    #[error("Malformed document: {0}")]
    Payload(String),

    /// IO error with context.
    #[error("IO error: {context}\n  Cause: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl MetricsError {
    /// Create an IO error naming the file involved.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        Self::Io { context: format!("failed to read {}", path.display()), source }
    }

    /// Check if this error was caused by caller input rather than bad data.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidMetricName { .. }
                | Self::InvalidThreshold(_)
                | Self::MetricNotFoundInCriteriaTable(_)
                | Self::EmptyTable
        )
    }

    /// Get the error code for structured output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidMetricName { .. } => "U001",
            Self::InvalidThreshold(_) => "U002",
            Self::MetricNotFoundInCriteriaTable(_) => "U003",
            Self::EmptyTable => "U004",
            Self::InconsistentCounts { .. } => "U010",
            Self::Payload(_) => "U020",
            Self::Io { .. } => "U050",
        }
    }
}

impl From<serde_json::Error> for MetricsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Payload(err.to_string())
    }
}

impl From<serde_yaml::Error> for MetricsError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Payload(err.to_string())
    }
}
