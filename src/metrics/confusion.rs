//! Binary confusion matrix derived from one threshold row

use std::fmt;

use serde::Serialize;

use super::names::ThresholdMetric;
use super::table::ThresholdRow;

/// Where the threshold of a confusion-matrix request came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdSource {
    /// Threshold given explicitly by the caller
    Explicit,
    /// Threshold that maximizes the named metric
    MaxMetric(ThresholdMetric),
}

/// 2x2 confusion matrix at one threshold
///
/// Laid out as `[[tn, fp], [fn, tp]]`: rows are actual classes, columns are
/// predicted classes, negative class first.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BinaryConfusionMatrix {
    counts: [[u64; 2]; 2],
    domain: [String; 2],
    threshold: f64,
    source: ThresholdSource,
}

impl BinaryConfusionMatrix {
    /// Build the matrix for `row`
    ///
    /// # Panics
    /// If the row's counts do not sum to `total_observations`. Tables are
    /// validated on construction, so this indicates corrupted data.
    pub fn from_row(
        row: &ThresholdRow,
        total_observations: u64,
        domain: &[String; 2],
        source: ThresholdSource,
    ) -> Self {
        let positives = row.tps + row.fns;
        let negatives = row.tns + row.fps;
        assert_eq!(
            positives + negatives,
            total_observations,
            "confusion matrix counts at threshold {} do not sum to the observation count",
            row.threshold
        );

        Self {
            counts: [[negatives - row.fps, row.fps], [positives - row.tps, row.tps]],
            domain: domain.clone(),
            threshold: row.threshold,
            source,
        }
    }

    /// Raw matrix: `counts()[actual][predicted]`
    pub fn counts(&self) -> &[[u64; 2]; 2] {
        &self.counts
    }

    /// Negative and positive class labels
    pub fn domain(&self) -> &[String; 2] {
        &self.domain
    }

    /// Threshold stored in the row the matrix was built from
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn source(&self) -> ThresholdSource {
        self.source
    }

    pub fn true_negatives(&self) -> u64 {
        self.counts[0][0]
    }

    pub fn false_positives(&self) -> u64 {
        self.counts[0][1]
    }

    pub fn false_negatives(&self) -> u64 {
        self.counts[1][0]
    }

    pub fn true_positives(&self) -> u64 {
        self.counts[1][1]
    }

    /// Total number of observations
    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }

    /// Header describing how the threshold was chosen
    pub fn header(&self) -> String {
        match self.source {
            ThresholdSource::Explicit => format!("@ threshold={}", self.threshold),
            ThresholdSource::MaxMetric(metric) => {
                format!("max {} @ threshold={}", metric, self.threshold)
            }
        }
    }
}

impl fmt::Display for BinaryConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Confusion Matrix (Act/Pred) for {}", self.header())?;

        let width = self.domain.iter().map(String::len).max().unwrap_or(0).max(6);
        write!(f, "{:width$}", "")?;
        for label in &self.domain {
            write!(f, " {label:>width$}")?;
        }
        writeln!(f, " {:>8}  Rate", "Error")?;

        let mut errors = 0;
        for (i, label) in self.domain.iter().enumerate() {
            let row = self.counts[i];
            let actual: u64 = row.iter().sum();
            let wrong = row[1 - i];
            errors += wrong;
            write!(f, "{label:width$}")?;
            for count in row {
                write!(f, " {count:>width$}")?;
            }
            writeln!(f, " {:>8.4}  ({wrong}/{actual})", ratio(wrong, actual))?;
        }

        let total = self.total();
        write!(f, "{:width$}", "Total")?;
        for j in 0..2 {
            write!(f, " {:>width$}", self.counts[0][j] + self.counts[1][j])?;
        }
        writeln!(f, " {:>8.4}  ({errors}/{total})", ratio(errors, total))
    }
}

fn ratio(num: u64, den: u64) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}
