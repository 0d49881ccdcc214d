//! Per-threshold statistics table

use serde::{Deserialize, Serialize};

use super::names::ThresholdMetric;
use crate::error::{MetricsError, Result};

/// One row of the threshold table: counts and rates at a single cutoff
///
/// Rate columns missing from a decoded row are derived from its counts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawThresholdRow")]
pub struct ThresholdRow {
    pub threshold: f64,
    pub f1: f64,
    pub f2: f64,
    pub f0point5: f64,
    pub accuracy: f64,
    pub precision: f64,
    pub absolute_mcc: f64,
    pub min_per_class_accuracy: f64,
    pub mean_per_class_accuracy: f64,
    pub tns: u64,
    pub fns: u64,
    pub fps: u64,
    pub tps: u64,
    pub tnr: f64,
    pub fnr: f64,
    pub fpr: f64,
    pub tpr: f64,
}

/// Wire shape of a threshold row; counts are required, rates optional
#[derive(Deserialize)]
struct RawThresholdRow {
    threshold: f64,
    tns: u64,
    fns: u64,
    fps: u64,
    tps: u64,
    f1: Option<f64>,
    f2: Option<f64>,
    f0point5: Option<f64>,
    accuracy: Option<f64>,
    precision: Option<f64>,
    absolute_mcc: Option<f64>,
    min_per_class_accuracy: Option<f64>,
    mean_per_class_accuracy: Option<f64>,
    tnr: Option<f64>,
    fnr: Option<f64>,
    fpr: Option<f64>,
    tpr: Option<f64>,
}

impl From<RawThresholdRow> for ThresholdRow {
    fn from(raw: RawThresholdRow) -> Self {
        let derived = ThresholdRow::from_counts(raw.threshold, raw.tns, raw.fps, raw.fns, raw.tps);
        Self {
            f1: raw.f1.unwrap_or(derived.f1),
            f2: raw.f2.unwrap_or(derived.f2),
            f0point5: raw.f0point5.unwrap_or(derived.f0point5),
            accuracy: raw.accuracy.unwrap_or(derived.accuracy),
            precision: raw.precision.unwrap_or(derived.precision),
            absolute_mcc: raw.absolute_mcc.unwrap_or(derived.absolute_mcc),
            min_per_class_accuracy: raw.min_per_class_accuracy.unwrap_or(derived.min_per_class_accuracy),
            mean_per_class_accuracy: raw.mean_per_class_accuracy.unwrap_or(derived.mean_per_class_accuracy),
            tnr: raw.tnr.unwrap_or(derived.tnr),
            fnr: raw.fnr.unwrap_or(derived.fnr),
            fpr: raw.fpr.unwrap_or(derived.fpr),
            tpr: raw.tpr.unwrap_or(derived.tpr),
            ..derived
        }
    }
}

impl ThresholdRow {
    /// Build a row from raw counts, deriving every rate column
    pub fn from_counts(threshold: f64, tns: u64, fps: u64, fns: u64, tps: u64) -> Self {
        let ratio = |num: f64, den: f64| if den > 0.0 { num / den } else { 0.0 };
        let (tn, fp, fn_, tp) = (tns as f64, fps as f64, fns as f64, tps as f64);

        let tpr = ratio(tp, tp + fn_);
        let tnr = ratio(tn, tn + fp);
        let precision = ratio(tp, tp + fp);
        let f_beta = |beta: f64| {
            let b2 = beta * beta;
            ratio((1.0 + b2) * precision * tpr, b2 * precision + tpr)
        };
        let mcc_den = ((tp + fp) * (tp + fn_) * (tn + fp) * (tn + fn_)).sqrt();

        Self {
            threshold,
            f1: f_beta(1.0),
            f2: f_beta(2.0),
            f0point5: f_beta(0.5),
            accuracy: ratio(tp + tn, tp + tn + fp + fn_),
            precision,
            absolute_mcc: ratio((tp * tn - fp * fn_).abs(), mcc_den),
            min_per_class_accuracy: tpr.min(tnr),
            mean_per_class_accuracy: (tpr + tnr) / 2.0,
            tns,
            fns,
            fps,
            tps,
            tnr,
            fnr: ratio(fn_, tp + fn_),
            fpr: ratio(fp, tn + fp),
            tpr,
        }
    }

    /// Value of the given column (counts widened to f64)
    pub fn value(&self, metric: ThresholdMetric) -> f64 {
        match metric {
            ThresholdMetric::AbsoluteMcc => self.absolute_mcc,
            ThresholdMetric::Accuracy => self.accuracy,
            ThresholdMetric::Precision => self.precision,
            ThresholdMetric::F0point5 => self.f0point5,
            ThresholdMetric::F1 => self.f1,
            ThresholdMetric::F2 => self.f2,
            ThresholdMetric::MeanPerClassAccuracy => self.mean_per_class_accuracy,
            ThresholdMetric::MinPerClassAccuracy => self.min_per_class_accuracy,
            ThresholdMetric::Tns => self.tns as f64,
            ThresholdMetric::Fns => self.fns as f64,
            ThresholdMetric::Fps => self.fps as f64,
            ThresholdMetric::Tps => self.tps as f64,
            ThresholdMetric::Tnr => self.tnr,
            ThresholdMetric::Fnr => self.fnr,
            ThresholdMetric::Fpr => self.fpr,
            ThresholdMetric::Tpr => self.tpr,
        }
    }

    /// tn + fp + fn + tp
    pub fn total(&self) -> u64 {
        self.tns + self.fps + self.fns + self.tps
    }
}

/// Immutable view of the threshold table
///
/// Rows keep the order the evaluator produced them in; they need not be
/// sorted. Every row is checked to sum to the same observation count.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MetricsTable {
    rows: Vec<ThresholdRow>,
    total_observations: u64,
}

impl MetricsTable {
    /// Create a table, rejecting rows whose counts disagree on the total
    /// and thresholds that are not finite values in [0, 1]
    pub fn new(rows: Vec<ThresholdRow>) -> Result<Self> {
        let total_observations = rows.first().map_or(0, ThresholdRow::total);
        for (row, r) in rows.iter().enumerate() {
            if !(0.0..=1.0).contains(&r.threshold) {
                return Err(MetricsError::InvalidThreshold(format!("{} in row {row}", r.threshold)));
            }
            if r.total() != total_observations {
                return Err(MetricsError::InconsistentCounts {
                    row,
                    expected: total_observations,
                    actual: r.total(),
                });
            }
        }
        Ok(Self { rows, total_observations })
    }

    /// Get all rows in table order
    pub fn rows(&self) -> &[ThresholdRow] {
        &self.rows
    }

    /// Get a row by index
    pub fn row(&self, idx: usize) -> Option<&ThresholdRow> {
        self.rows.get(idx)
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Observation count shared by every row (0 for an empty table)
    pub fn total_observations(&self) -> u64 {
        self.total_observations
    }

    /// Iterate thresholds in table order
    pub fn thresholds(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(|r| r.threshold)
    }

    /// Iterate one column in table order
    pub fn column(&self, metric: ThresholdMetric) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(move |r| r.value(metric))
    }
}

impl Serialize for MetricsTable {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.rows.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for MetricsTable {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let rows = Vec::<ThresholdRow>::deserialize(deserializer)?;
        MetricsTable::new(rows).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_counts_rates() {
        let row = ThresholdRow::from_counts(0.1, 70, 30, 10, 90);
        assert_relative_eq!(row.tpr, 0.9, epsilon = 1e-12);
        assert_relative_eq!(row.tnr, 0.7, epsilon = 1e-12);
        assert_relative_eq!(row.fpr, 0.3, epsilon = 1e-12);
        assert_relative_eq!(row.fnr, 0.1, epsilon = 1e-12);
        assert_relative_eq!(row.accuracy, 0.8, epsilon = 1e-12);
        assert_relative_eq!(row.precision, 0.75, epsilon = 1e-12);
        assert_relative_eq!(row.min_per_class_accuracy, 0.7, epsilon = 1e-12);
        assert_relative_eq!(row.mean_per_class_accuracy, 0.8, epsilon = 1e-12);
        assert_eq!(row.total(), 200);
    }

    #[test]
    fn test_from_counts_zero_denominators() {
        let row = ThresholdRow::from_counts(1.0, 10, 0, 5, 0);
        assert_eq!(row.precision, 0.0);
        assert_eq!(row.f1, 0.0);
        assert_eq!(row.absolute_mcc, 0.0);
        assert!(!row.f2.is_nan());
    }

    #[test]
    fn test_value_counts_widen() {
        let row = ThresholdRow::from_counts(0.5, 90, 10, 30, 70);
        assert_eq!(row.value(ThresholdMetric::Tns), 90.0);
        assert_eq!(row.value(ThresholdMetric::Fps), 10.0);
        assert_eq!(row.value(ThresholdMetric::Fns), 30.0);
        assert_eq!(row.value(ThresholdMetric::Tps), 70.0);
    }

    #[test]
    fn test_table_total_observations() {
        let table = MetricsTable::new(vec![
            ThresholdRow::from_counts(0.1, 70, 30, 10, 90),
            ThresholdRow::from_counts(0.5, 90, 10, 30, 70),
        ])
        .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.total_observations(), 200);
        assert_eq!(table.thresholds().collect::<Vec<_>>(), vec![0.1, 0.5]);
    }

    #[test]
    fn test_table_rejects_inconsistent_counts() {
        let err = MetricsTable::new(vec![
            ThresholdRow::from_counts(0.1, 70, 30, 10, 90),
            ThresholdRow::from_counts(0.5, 90, 10, 30, 71),
        ])
        .unwrap_err();
        assert!(matches!(err, MetricsError::InconsistentCounts { row: 1, expected: 200, actual: 201 }));
    }

    #[test]
    fn test_empty_table_is_valid() {
        let table = MetricsTable::new(vec![]).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.total_observations(), 0);
    }

    #[test]
    fn test_table_rejects_non_finite_threshold() {
        let err = MetricsTable::new(vec![
            ThresholdRow::from_counts(0.1, 70, 30, 10, 90),
            ThresholdRow::from_counts(f64::NAN, 90, 10, 30, 70),
        ])
        .unwrap_err();
        assert!(matches!(err, MetricsError::InvalidThreshold(ref m) if m.contains("row 1")));

        let err = MetricsTable::new(vec![ThresholdRow::from_counts(1.5, 90, 10, 30, 70)]).unwrap_err();
        assert!(matches!(err, MetricsError::InvalidThreshold(_)));
    }

    #[test]
    fn test_deserialize_derives_missing_rates() {
        let row: ThresholdRow =
            serde_json::from_str(r#"{"threshold": 0.1, "tns": 70, "fps": 30, "fns": 10, "tps": 90}"#).unwrap();
        assert_relative_eq!(row.precision, 0.75, epsilon = 1e-12);
        assert_relative_eq!(row.tpr, 0.9, epsilon = 1e-12);
        assert_relative_eq!(row.fpr, 0.3, epsilon = 1e-12);
        assert_relative_eq!(row.accuracy, 0.8, epsilon = 1e-12);
        assert_eq!(row, ThresholdRow::from_counts(0.1, 70, 30, 10, 90));
    }

    #[test]
    fn test_deserialize_keeps_reported_rates() {
        let row: ThresholdRow = serde_json::from_str(
            r#"{"threshold": 0.1, "tns": 70, "fps": 30, "fns": 10, "tps": 90, "f1": 0.5, "tpr": 0.91}"#,
        )
        .unwrap();
        assert_eq!(row.f1, 0.5);
        assert_eq!(row.tpr, 0.91);
        assert_relative_eq!(row.precision, 0.75, epsilon = 1e-12);
    }

    #[test]
    fn test_deserialize_requires_counts() {
        let result: std::result::Result<ThresholdRow, _> =
            serde_json::from_str(r#"{"threshold": 0.1, "tns": 70, "fps": 30, "tpr": 0.9, "precision": 0.75}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let json = r#"[
            {"threshold": 0.1, "tns": 70, "fps": 30, "fns": 10, "tps": 90},
            {"threshold": 0.5, "tns": 90, "fps": 10, "fns": 30, "tps": 69}
        ]"#;
        let result: std::result::Result<MetricsTable, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
