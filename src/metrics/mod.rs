//! Threshold metric queries for binary classifiers
//!
//! Answers metric queries at arbitrary decision thresholds over a table of
//! precomputed per-threshold statistics:
//! - `table`: immutable per-threshold counts and rates
//! - `names`: canonical metric names and aliases
//! - `index`: tolerance matching with nearest-threshold fallback
//! - `criteria`: maximizing threshold per metric
//! - `confusion`: 2x2 confusion matrices from table rows
//! - `facade`: the query API composing the above

mod confusion;
mod criteria;
mod facade;
mod index;
mod names;
mod query;
mod table;


pub use confusion::{BinaryConfusionMatrix, ThresholdSource};
pub use criteria::{MaxCriteriaTable, MaxCriterion};
pub use facade::{ConfusionMatrices, ThresholdMetrics};
pub use index::{MatchKind, ThresholdIndex, ThresholdMatch, DEFAULT_RELATIVE_TOLERANCE};
pub use names::{canonicalize, legal_names, ThresholdMetric, METRIC_ALIASES};
pub use query::{MetricQueryResult, Summary, ThresholdSpec};
pub use table::{MetricsTable, ThresholdRow};
