//! Umbral: threshold metric queries for binary classifiers
//!
//! Answers metric queries over a precomputed table of per-threshold
//! confusion counts and rates:
//!
//! - metric values at any threshold, a list of thresholds, every stored
//!   threshold, or the threshold maximizing the metric
//! - confusion matrices at explicit or metric-maximizing thresholds
//! - nearest-threshold fallback with an advisory when no row matches
//!
//! ## Example
//!
//! ```ignore
//! use umbral::model_metrics::load_metrics;
//! use umbral::metrics::ThresholdSpec;
//!
//! let binomial = load_metrics("metrics.json")?.into_binomial()?;
//! let queries = binomial.thresholds();
//!
//! let recall = queries.metric("recall", 0.5)?.value();
//! let f1_curve = queries.metric("f1", ThresholdSpec::All)?;
//! let cms = queries.confusion_matrices(&["f1", "accuracy"], &[0.5])?;
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod metrics;
pub mod model_metrics;

pub use config::{load_config, QueryConfig};
pub use error::{MetricsError, Result};
pub use metrics::{
    BinaryConfusionMatrix, ConfusionMatrices, MetricQueryResult, Summary, ThresholdMetric, ThresholdMetrics,
    ThresholdSpec,
};
pub use model_metrics::{load_metrics, ModelMetrics};
