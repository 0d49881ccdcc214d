//! Multinomial and ordinal classifier metrics

use std::fmt;

use serde::Deserialize;

use super::capabilities::{impl_scored, impl_squared_error, CustomMetric, LogLoss};
use crate::error::MetricsError;

#[derive(Deserialize)]
struct RawConfusion {
    labels: Vec<String>,
    matrix: Vec<Vec<u64>>,
}

/// Confusion matrix reported by a multi-class evaluation
///
/// Element [i][j] counts observations of actual class i predicted as j.
/// The matrix is square with one row and column per label.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(try_from = "RawConfusion")]
pub struct MulticlassConfusion {
    /// Class labels, in matrix order
    labels: Vec<String>,
    /// matrix[actual][predicted] = count
    matrix: Vec<Vec<u64>>,
}

impl TryFrom<RawConfusion> for MulticlassConfusion {
    type Error = MetricsError;

    fn try_from(raw: RawConfusion) -> Result<Self, Self::Error> {
        let n = raw.labels.len();
        if raw.matrix.len() != n {
            return Err(MetricsError::Payload(format!(
                "confusion matrix has {} rows for {n} labels",
                raw.matrix.len()
            )));
        }
        if let Some((i, row)) = raw.matrix.iter().enumerate().find(|(_, row)| row.len() != n) {
            return Err(MetricsError::Payload(format!(
                "confusion matrix row {i} has {} columns for {n} labels",
                row.len()
            )));
        }
        Ok(Self { labels: raw.labels, matrix: raw.matrix })
    }
}

impl MulticlassConfusion {
    /// Get the class labels
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Get the raw matrix
    pub fn matrix(&self) -> &[Vec<u64>] {
        &self.matrix
    }

    /// Get number of classes
    pub fn n_classes(&self) -> usize {
        self.labels.len()
    }

    /// Count at [actual][predicted]
    pub fn get(&self, actual: usize, predicted: usize) -> Option<u64> {
        self.matrix.get(actual)?.get(predicted).copied()
    }

    /// Total number of observations
    pub fn total(&self) -> u64 {
        self.matrix.iter().flatten().sum()
    }

    /// Error rate of one actual class, `None` for an unknown class
    pub fn class_error(&self, class: usize) -> Option<f64> {
        let row = self.matrix.get(class)?;
        let support: u64 = row.iter().sum();
        if support == 0 {
            return Some(0.0);
        }
        Some((support - row[class]) as f64 / support as f64)
    }
}

impl fmt::Display for MulticlassConfusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Confusion Matrix (Act/Pred):")?;

        let width = self.labels.iter().map(String::len).max().unwrap_or(0).max(6);
        write!(f, "{:width$}", "")?;
        for label in &self.labels {
            write!(f, " {label:>width$}")?;
        }
        writeln!(f, " {:>8}", "Error")?;

        for (i, (label, row)) in self.labels.iter().zip(&self.matrix).enumerate() {
            write!(f, "{label:width$}")?;
            for count in row {
                write!(f, " {count:>width$}")?;
            }
            writeln!(f, " {:>8.4}", self.class_error(i).unwrap_or_default())?;
        }
        Ok(())
    }
}

/// Metrics of a multinomial or ordinal classifier
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ClassMetrics {
    nobs: u64,
    #[serde(rename = "MSE")]
    mse: f64,
    #[serde(rename = "RMSE")]
    rmse: f64,
    logloss: f64,
    mean_per_class_error: f64,
    cm: MulticlassConfusion,
    /// Top-k hit ratios, k = 1..
    #[serde(default)]
    hit_ratio_table: Vec<f64>,
    #[serde(flatten)]
    custom: CustomMetric,
}

impl ClassMetrics {
    /// Confusion matrix at the default prediction rule
    pub fn confusion_matrix(&self) -> &MulticlassConfusion {
        &self.cm
    }

    /// Fraction of observations whose actual class is among the top k predictions
    pub fn hit_ratios(&self) -> &[f64] {
        &self.hit_ratio_table
    }

    pub fn mean_per_class_error(&self) -> f64 {
        self.mean_per_class_error
    }
}

impl_scored!(ClassMetrics);
impl_squared_error!(ClassMetrics);

impl LogLoss for ClassMetrics {
    fn logloss(&self) -> f64 {
        self.logloss
    }
}
