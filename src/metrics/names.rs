//! Threshold metric names and their aliases

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MetricsError, Result};

/// Canonical columns of the threshold table that can be queried or maximized
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdMetric {
    /// Absolute Matthews correlation coefficient
    AbsoluteMcc,
    Accuracy,
    Precision,
    F0point5,
    F1,
    F2,
    MeanPerClassAccuracy,
    MinPerClassAccuracy,
    /// True negative count
    Tns,
    /// False negative count
    Fns,
    /// False positive count
    Fps,
    /// True positive count
    Tps,
    Tnr,
    Fnr,
    Fpr,
    Tpr,
}

impl ThresholdMetric {
    /// Every canonical metric, in registry order
    pub const ALL: [ThresholdMetric; 16] = [
        ThresholdMetric::AbsoluteMcc,
        ThresholdMetric::Accuracy,
        ThresholdMetric::Precision,
        ThresholdMetric::F0point5,
        ThresholdMetric::F1,
        ThresholdMetric::F2,
        ThresholdMetric::MeanPerClassAccuracy,
        ThresholdMetric::MinPerClassAccuracy,
        ThresholdMetric::Tns,
        ThresholdMetric::Fns,
        ThresholdMetric::Fps,
        ThresholdMetric::Tps,
        ThresholdMetric::Tnr,
        ThresholdMetric::Fnr,
        ThresholdMetric::Fpr,
        ThresholdMetric::Tpr,
    ];

    /// Column name as it appears in the threshold table
    pub fn name(&self) -> &'static str {
        match self {
            ThresholdMetric::AbsoluteMcc => "absolute_mcc",
            ThresholdMetric::Accuracy => "accuracy",
            ThresholdMetric::Precision => "precision",
            ThresholdMetric::F0point5 => "f0point5",
            ThresholdMetric::F1 => "f1",
            ThresholdMetric::F2 => "f2",
            ThresholdMetric::MeanPerClassAccuracy => "mean_per_class_accuracy",
            ThresholdMetric::MinPerClassAccuracy => "min_per_class_accuracy",
            ThresholdMetric::Tns => "tns",
            ThresholdMetric::Fns => "fns",
            ThresholdMetric::Fps => "fps",
            ThresholdMetric::Tps => "tps",
            ThresholdMetric::Tnr => "tnr",
            ThresholdMetric::Fnr => "fnr",
            ThresholdMetric::Fpr => "fpr",
            ThresholdMetric::Tpr => "tpr",
        }
    }

    /// Label of this metric's row in the max-criteria table
    pub fn criterion_label(&self) -> String {
        format!("max {}", self.name())
    }
}

impl fmt::Display for ThresholdMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ThresholdMetric {
    type Err = MetricsError;

    fn from_str(s: &str) -> Result<Self> {
        canonicalize(s)
    }
}

/// Human-facing aliases and the canonical column each resolves to
pub const METRIC_ALIASES: [(&str, ThresholdMetric); 5] = [
    ("fallout", ThresholdMetric::Fpr),
    ("missrate", ThresholdMetric::Fnr),
    ("recall", ThresholdMetric::Tpr),
    ("sensitivity", ThresholdMetric::Tpr),
    ("specificity", ThresholdMetric::Tnr),
];

/// Every accepted metric name: canonical names followed by aliases
pub fn legal_names() -> impl Iterator<Item = &'static str> {
    ThresholdMetric::ALL
        .iter()
        .map(ThresholdMetric::name)
        .chain(METRIC_ALIASES.iter().map(|(alias, _)| *alias))
}

/// Resolve a metric name (case-sensitive) to its canonical column
pub fn canonicalize(name: &str) -> Result<ThresholdMetric> {
    if let Some((_, metric)) = METRIC_ALIASES.iter().find(|(alias, _)| *alias == name) {
        return Ok(*metric);
    }
    ThresholdMetric::ALL
        .iter()
        .find(|m| m.name() == name)
        .copied()
        .ok_or_else(|| MetricsError::InvalidMetricName {
            name: name.to_string(),
            legal: legal_names().collect::<Vec<_>>().join(", "),
        })
}
