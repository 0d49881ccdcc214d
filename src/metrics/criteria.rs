//! Max-criteria table: the threshold that maximizes each metric

use serde::{Deserialize, Serialize};

use super::names::ThresholdMetric;
use crate::error::{MetricsError, Result};

/// One entry of the max-criteria table
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaxCriterion {
    /// Label of the form "max <metric>"
    pub metric: String,
    pub threshold: f64,
    /// Metric value at that threshold
    #[serde(default)]
    pub value: f64,
}

impl MaxCriterion {
    /// Create a criterion entry for a canonical metric
    pub fn new(metric: ThresholdMetric, threshold: f64, value: f64) -> Self {
        Self { metric: metric.criterion_label(), threshold, value }
    }
}

/// Immutable mapping from metric to its maximizing threshold
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaxCriteriaTable {
    entries: Vec<MaxCriterion>,
}

impl MaxCriteriaTable {
    /// Create a criteria table from its entries
    pub fn new(entries: Vec<MaxCriterion>) -> Self {
        Self { entries }
    }

    /// Get all entries in table order
    pub fn entries(&self) -> &[MaxCriterion] {
        &self.entries
    }

    /// Threshold at which `metric` is maximal
    pub fn resolve_max(&self, metric: ThresholdMetric) -> Result<f64> {
        let label = metric.criterion_label();
        self.entries
            .iter()
            .find(|e| e.metric == label)
            .map(|e| e.threshold)
            .ok_or_else(|| MetricsError::MetricNotFoundInCriteriaTable(metric.name().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criteria() -> MaxCriteriaTable {
        MaxCriteriaTable::new(vec![
            MaxCriterion::new(ThresholdMetric::F1, 0.1, 0.857),
            MaxCriterion::new(ThresholdMetric::Accuracy, 0.5, 0.8),
            MaxCriterion::new(ThresholdMetric::Tpr, 0.1, 0.9),
        ])
    }

    #[test]
    fn test_resolve_max() {
        let table = criteria();
        assert_eq!(table.resolve_max(ThresholdMetric::F1).unwrap(), 0.1);
        assert_eq!(table.resolve_max(ThresholdMetric::Accuracy).unwrap(), 0.5);
    }

    #[test]
    fn test_missing_metric() {
        let err = criteria().resolve_max(ThresholdMetric::F2).unwrap_err();
        assert!(matches!(err, MetricsError::MetricNotFoundInCriteriaTable(ref m) if m == "f2"));
    }

    #[test]
    fn test_deserialize_entries() {
        let json = r#"[{"metric": "max f1", "threshold": 0.35, "value": 0.71}]"#;
        let table: MaxCriteriaTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.entries().len(), 1);
        assert_eq!(table.resolve_max(ThresholdMetric::F1).unwrap(), 0.35);
    }
}
