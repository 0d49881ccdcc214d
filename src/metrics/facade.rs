//! Threshold metric queries over one evaluation

use std::fmt;

use serde::Serialize;

use super::confusion::{BinaryConfusionMatrix, ThresholdSource};
use super::criteria::MaxCriteriaTable;
use super::index::{ThresholdIndex, ThresholdMatch};
use super::names::{canonicalize, ThresholdMetric};
use super::query::{MetricQueryResult, ThresholdSpec};
use super::table::MetricsTable;
use crate::config::QueryConfig;
use crate::error::{MetricsError, Result};

/// One or several confusion matrices, depending on how many were requested
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConfusionMatrices {
    Single(BinaryConfusionMatrix),
    Many(Vec<BinaryConfusionMatrix>),
}

impl ConfusionMatrices {
    /// Number of matrices
    pub fn len(&self) -> usize {
        match self {
            ConfusionMatrices::Single(_) => 1,
            ConfusionMatrices::Many(cms) => cms.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Single matrix, if exactly one was requested
    pub fn single(&self) -> Option<&BinaryConfusionMatrix> {
        match self {
            ConfusionMatrices::Single(cm) => Some(cm),
            ConfusionMatrices::Many(_) => None,
        }
    }

    /// Flatten into a vector in request order
    pub fn into_vec(self) -> Vec<BinaryConfusionMatrix> {
        match self {
            ConfusionMatrices::Single(cm) => vec![cm],
            ConfusionMatrices::Many(cms) => cms,
        }
    }
}

impl fmt::Display for ConfusionMatrices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfusionMatrices::Single(cm) => write!(f, "{cm}"),
            ConfusionMatrices::Many(cms) => {
                for (i, cm) in cms.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{cm}")?;
                }
                Ok(())
            }
        }
    }
}

/// A confusion-matrix request: a threshold tagged with its origin
#[derive(Clone, Copy, Debug, PartialEq)]
struct MatrixRequest {
    threshold: f64,
    source: ThresholdSource,
}

/// Query API over a threshold table and its max-criteria table
///
/// The threshold index is built once at construction; all queries take
/// `&self` and never mutate shared state.
#[derive(Clone, Debug)]
pub struct ThresholdMetrics {
    table: MetricsTable,
    criteria: MaxCriteriaTable,
    index: ThresholdIndex,
    domain: [String; 2],
    default_metric: ThresholdMetric,
}

impl ThresholdMetrics {
    /// Create a query facade with the default configuration
    pub fn new(table: MetricsTable, criteria: MaxCriteriaTable, domain: [String; 2]) -> Self {
        let index = ThresholdIndex::new(&table);
        Self { table, criteria, index, domain, default_metric: ThresholdMetric::F1 }
    }

    /// Create a query facade honoring `config`
    pub fn with_config(
        table: MetricsTable,
        criteria: MaxCriteriaTable,
        domain: [String; 2],
        config: &QueryConfig,
    ) -> Result<Self> {
        let default_metric = canonicalize(&config.default_metric)?;
        let index = ThresholdIndex::with_tolerance(&table, config.relative_tolerance)
            .warn_on_nearest(config.warn_on_nearest);
        Ok(Self { table, criteria, index, domain, default_metric })
    }

    pub fn table(&self) -> &MetricsTable {
        &self.table
    }

    pub fn criteria(&self) -> &MaxCriteriaTable {
        &self.criteria
    }

    /// Negative and positive class labels
    pub fn domain(&self) -> &[String; 2] {
        &self.domain
    }

    /// Threshold at which the named metric is maximal
    pub fn resolve_max_threshold(&self, name: &str) -> Result<f64> {
        let metric = canonicalize(name)?;
        self.max_threshold(metric)
    }

    fn max_threshold(&self, metric: ThresholdMetric) -> Result<f64> {
        let threshold = self.criteria.resolve_max(metric)?;
        tracing::debug!(%metric, threshold, "resolved max threshold");
        Ok(threshold)
    }

    /// Row matching `t`; see [`ThresholdIndex::locate`]
    pub fn locate_threshold(&self, t: f64) -> Result<ThresholdMatch> {
        self.index.locate(t)
    }

    /// Value of the named metric at the requested thresholds
    ///
    /// # Example
    /// ```ignore
    /// let tpr = metrics.metric("recall", 0.5)?.value();
    /// let curve = metrics.metric("f1", ThresholdSpec::All)?;
    /// ```
    pub fn metric(&self, name: &str, thresholds: impl Into<ThresholdSpec>) -> Result<MetricQueryResult> {
        let metric = canonicalize(name)?;
        self.metric_by(metric, thresholds.into())
    }

    /// Value of a canonical metric at the requested thresholds
    pub fn metric_by(&self, metric: ThresholdMetric, spec: ThresholdSpec) -> Result<MetricQueryResult> {
        let scalar = spec.is_scalar();
        let pairs = match spec {
            ThresholdSpec::All => {
                let rows = self.table.rows();
                self.index
                    .all_thresholds()
                    .map(|i| (rows[i].threshold, rows[i].value(metric)))
                    .collect()
            }
            ThresholdSpec::Max => vec![self.value_at(metric, self.max_threshold(metric)?)?],
            ThresholdSpec::Single(t) => vec![self.value_at(metric, t)?],
            ThresholdSpec::List(ts) => {
                ts.iter().map(|&t| self.value_at(metric, t)).collect::<Result<Vec<_>>>()?
            }
        };
        Ok(MetricQueryResult::new(pairs, scalar))
    }

    /// (requested threshold, value) for one threshold
    fn value_at(&self, metric: ThresholdMetric, t: f64) -> Result<(f64, f64)> {
        let found = self.index.locate(t)?;
        let row = &self.table.rows()[found.row];
        Ok((t, row.value(metric)))
    }

    /// Confusion matrices at explicit thresholds and at each metric's maximum
    ///
    /// Explicit thresholds come first, in caller order, followed by one
    /// matrix per metric. With both inputs empty the configured default
    /// metric (`f1` unless overridden) is used.
    pub fn confusion_matrices(&self, metrics: &[&str], thresholds: &[f64]) -> Result<ConfusionMatrices> {
        if let Some(&bad) = thresholds.iter().find(|t| !(0.0..=1.0).contains(*t)) {
            return Err(MetricsError::InvalidThreshold(bad.to_string()));
        }
        let mut canonical = metrics.iter().map(|m| canonicalize(m)).collect::<Result<Vec<_>>>()?;
        if canonical.is_empty() && thresholds.is_empty() {
            canonical.push(self.default_metric);
        }

        let mut requests: Vec<MatrixRequest> = thresholds
            .iter()
            .map(|&threshold| MatrixRequest { threshold, source: ThresholdSource::Explicit })
            .collect();
        for metric in canonical {
            requests.push(MatrixRequest {
                threshold: self.max_threshold(metric)?,
                source: ThresholdSource::MaxMetric(metric),
            });
        }
        tracing::debug!(requests = requests.len(), "building confusion matrices");

        let mut cms = requests
            .into_iter()
            .map(|req| {
                let found = self.index.locate(req.threshold)?;
                Ok(BinaryConfusionMatrix::from_row(
                    &self.table.rows()[found.row],
                    self.table.total_observations(),
                    &self.domain,
                    req.source,
                ))
            })
            .collect::<Result<Vec<_>>>()?;

        if cms.len() == 1 {
            Ok(ConfusionMatrices::Single(cms.remove(0)))
        } else {
            Ok(ConfusionMatrices::Many(cms))
        }
    }

    /// False and true positive rates over every row, in table order
    pub fn roc(&self) -> (Vec<f64>, Vec<f64>) {
        (
            self.table.column(ThresholdMetric::Fpr).collect(),
            self.table.column(ThresholdMetric::Tpr).collect(),
        )
    }

    pub fn f1(&self, thresholds: impl Into<ThresholdSpec>) -> Result<MetricQueryResult> {
        self.metric_by(ThresholdMetric::F1, thresholds.into())
    }

    pub fn f2(&self, thresholds: impl Into<ThresholdSpec>) -> Result<MetricQueryResult> {
        self.metric_by(ThresholdMetric::F2, thresholds.into())
    }

    pub fn f0point5(&self, thresholds: impl Into<ThresholdSpec>) -> Result<MetricQueryResult> {
        self.metric_by(ThresholdMetric::F0point5, thresholds.into())
    }

    pub fn accuracy(&self, thresholds: impl Into<ThresholdSpec>) -> Result<MetricQueryResult> {
        self.metric_by(ThresholdMetric::Accuracy, thresholds.into())
    }

    /// 1 - accuracy; `Max` picks the threshold minimizing the error
    pub fn error(&self, thresholds: impl Into<ThresholdSpec>) -> Result<MetricQueryResult> {
        Ok(self.accuracy(thresholds)?.to_error())
    }

    pub fn precision(&self, thresholds: impl Into<ThresholdSpec>) -> Result<MetricQueryResult> {
        self.metric_by(ThresholdMetric::Precision, thresholds.into())
    }

    /// True positive rate
    pub fn tpr(&self, thresholds: impl Into<ThresholdSpec>) -> Result<MetricQueryResult> {
        self.metric_by(ThresholdMetric::Tpr, thresholds.into())
    }

    /// True negative rate
    pub fn tnr(&self, thresholds: impl Into<ThresholdSpec>) -> Result<MetricQueryResult> {
        self.metric_by(ThresholdMetric::Tnr, thresholds.into())
    }

    /// False negative rate
    pub fn fnr(&self, thresholds: impl Into<ThresholdSpec>) -> Result<MetricQueryResult> {
        self.metric_by(ThresholdMetric::Fnr, thresholds.into())
    }

    /// False positive rate
    pub fn fpr(&self, thresholds: impl Into<ThresholdSpec>) -> Result<MetricQueryResult> {
        self.metric_by(ThresholdMetric::Fpr, thresholds.into())
    }

    pub fn recall(&self, thresholds: impl Into<ThresholdSpec>) -> Result<MetricQueryResult> {
        self.metric("recall", thresholds)
    }

    pub fn sensitivity(&self, thresholds: impl Into<ThresholdSpec>) -> Result<MetricQueryResult> {
        self.metric("sensitivity", thresholds)
    }

    pub fn fallout(&self, thresholds: impl Into<ThresholdSpec>) -> Result<MetricQueryResult> {
        self.metric("fallout", thresholds)
    }

    pub fn missrate(&self, thresholds: impl Into<ThresholdSpec>) -> Result<MetricQueryResult> {
        self.metric("missrate", thresholds)
    }

    pub fn specificity(&self, thresholds: impl Into<ThresholdSpec>) -> Result<MetricQueryResult> {
        self.metric("specificity", thresholds)
    }

    /// Absolute Matthews correlation coefficient
    pub fn mcc(&self, thresholds: impl Into<ThresholdSpec>) -> Result<MetricQueryResult> {
        self.metric_by(ThresholdMetric::AbsoluteMcc, thresholds.into())
    }

    /// 1 - min per-class accuracy
    pub fn max_per_class_error(&self, thresholds: impl Into<ThresholdSpec>) -> Result<MetricQueryResult> {
        Ok(self.metric_by(ThresholdMetric::MinPerClassAccuracy, thresholds.into())?.to_error())
    }

    /// 1 - mean per-class accuracy
    pub fn mean_per_class_error(&self, thresholds: impl Into<ThresholdSpec>) -> Result<MetricQueryResult> {
        Ok(self.metric_by(ThresholdMetric::MeanPerClassAccuracy, thresholds.into())?.to_error())
    }
}
