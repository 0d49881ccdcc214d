//! Threshold specifications and metric query results

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{MetricsError, Result};

/// Which thresholds a metric query should be answered at
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ThresholdSpec {
    /// The threshold that maximizes the queried metric
    #[default]
    Max,
    /// A single threshold
    Single(f64),
    /// Several thresholds, answered in the given order
    List(Vec<f64>),
    /// Every row of the table, in table order
    All,
}

impl ThresholdSpec {
    /// Whether results for this request collapse to a single scalar
    pub fn is_scalar(&self) -> bool {
        matches!(self, ThresholdSpec::Max | ThresholdSpec::Single(_))
    }
}

impl From<f64> for ThresholdSpec {
    fn from(t: f64) -> Self {
        ThresholdSpec::Single(t)
    }
}

impl From<Vec<f64>> for ThresholdSpec {
    fn from(ts: Vec<f64>) -> Self {
        ThresholdSpec::List(ts)
    }
}

impl From<&[f64]> for ThresholdSpec {
    fn from(ts: &[f64]) -> Self {
        ThresholdSpec::List(ts.to_vec())
    }
}

impl From<Option<f64>> for ThresholdSpec {
    fn from(t: Option<f64>) -> Self {
        t.map_or(ThresholdSpec::Max, ThresholdSpec::Single)
    }
}

impl FromStr for ThresholdSpec {
    type Err = MetricsError;

    /// `""`/`"max"` → Max, `"all"` → All, `"0.5"` → Single, `"0.1,0.5"` → List
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        match s {
            "" | "max" => return Ok(ThresholdSpec::Max),
            "all" => return Ok(ThresholdSpec::All),
            _ => {}
        }

        let parse = |part: &str| {
            let part = part.trim();
            part.parse::<f64>().map_err(|_| MetricsError::InvalidThreshold(format!("'{part}' (not a number)")))
        };
        if s.contains(',') {
            s.split(',').map(parse).collect::<Result<Vec<_>>>().map(ThresholdSpec::List)
        } else {
            parse(s).map(ThresholdSpec::Single)
        }
    }
}

/// Summary of a metric query, shaped by the request
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Summary {
    /// Request was `Max` or a single threshold
    Scalar(f64),
    /// Request was a list or `All`: values in result order
    Values(Vec<f64>),
}

impl Summary {
    /// Scalar value, if the summary is scalar
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Summary::Scalar(v) => Some(*v),
            Summary::Values(_) => None,
        }
    }

    fn map(&self, f: impl Fn(f64) -> f64) -> Summary {
        match self {
            Summary::Scalar(v) => Summary::Scalar(f(*v)),
            Summary::Values(vs) => Summary::Values(vs.iter().copied().map(f).collect()),
        }
    }
}

/// Metric values at the requested thresholds
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MetricQueryResult {
    pairs: Vec<(f64, f64)>,
    summary: Summary,
}

impl MetricQueryResult {
    /// Create a result; `scalar` fixes the summary shape
    ///
    /// A scalar result must hold exactly one pair.
    pub(crate) fn new(pairs: Vec<(f64, f64)>, scalar: bool) -> Self {
        let summary = if scalar {
            debug_assert_eq!(pairs.len(), 1, "scalar results hold one pair");
            Summary::Scalar(pairs.first().map_or(f64::NAN, |&(_, v)| v))
        } else {
            Summary::Values(pairs.iter().map(|&(_, v)| v).collect())
        };
        Self { pairs, summary }
    }

    /// (threshold, value) pairs in request order
    pub fn pairs(&self) -> &[(f64, f64)] {
        &self.pairs
    }

    /// Thresholds in request order
    pub fn thresholds(&self) -> impl Iterator<Item = f64> + '_ {
        self.pairs.iter().map(|&(t, _)| t)
    }

    /// Values in request order
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.pairs.iter().map(|&(_, v)| v)
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    /// Scalar value, if the request was `Max` or a single threshold
    pub fn value(&self) -> Option<f64> {
        self.summary.as_scalar()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Complement every value (`1 - v`), e.g. accuracy into error
    pub fn to_error(&self) -> MetricQueryResult {
        let complement = |v: f64| 1.0 - v;
        Self {
            pairs: self.pairs.iter().map(|&(t, v)| (t, complement(v))).collect(),
            summary: self.summary.map(complement),
        }
    }
}

impl fmt::Display for MetricQueryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>12} {:>12}", "threshold", "value")?;
        for (t, v) in &self.pairs {
            writeln!(f, "{t:>12.6} {v:>12.6}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_parse_spec() {
        assert_eq!("".parse::<ThresholdSpec>().unwrap(), ThresholdSpec::Max);
        assert_eq!("max".parse::<ThresholdSpec>().unwrap(), ThresholdSpec::Max);
        assert_eq!("all".parse::<ThresholdSpec>().unwrap(), ThresholdSpec::All);
        assert_eq!("0.5".parse::<ThresholdSpec>().unwrap(), ThresholdSpec::Single(0.5));
        assert_eq!(
            "0.1, 0.5,0.9".parse::<ThresholdSpec>().unwrap(),
            ThresholdSpec::List(vec![0.1, 0.5, 0.9])
        );
    }

    #[test]
    fn test_parse_non_numeric() {
        let err = "0.1,abc".parse::<ThresholdSpec>().unwrap_err();
        assert!(matches!(err, MetricsError::InvalidThreshold(ref s) if s.contains("abc")));
    }

    #[test]
    fn test_conversions() {
        assert!(ThresholdSpec::from(0.3).is_scalar());
        assert!(ThresholdSpec::from(None::<f64>).is_scalar());
        assert!(!ThresholdSpec::from(vec![0.3]).is_scalar());
        assert!(!ThresholdSpec::All.is_scalar());
    }

    #[test]
    fn test_scalar_summary() {
        let result = MetricQueryResult::new(vec![(0.1, 0.9)], true);
        assert_eq!(result.value(), Some(0.9));
        assert_eq!(result.summary(), &Summary::Scalar(0.9));
    }

    #[test]
    fn test_list_summary_drops_thresholds() {
        let result = MetricQueryResult::new(vec![(0.5, 0.7), (0.1, 0.9)], false);
        assert_eq!(result.value(), None);
        assert_eq!(result.summary(), &Summary::Values(vec![0.7, 0.9]));
        assert_eq!(result.thresholds().collect::<Vec<_>>(), vec![0.5, 0.1]);
    }

    #[test]
    fn test_single_element_list_stays_list() {
        let result = MetricQueryResult::new(vec![(0.5, 0.7)], false);
        assert_eq!(result.summary(), &Summary::Values(vec![0.7]));
    }

    #[test]
    fn test_to_error_scalar() {
        let error = MetricQueryResult::new(vec![(0.1, 0.8)], true).to_error();
        assert_abs_diff_eq!(error.value().unwrap(), 0.2, epsilon = 1e-12);
        assert_eq!(error.pairs()[0].0, 0.1);
    }

    #[test]
    fn test_to_error_list() {
        let error = MetricQueryResult::new(vec![(0.1, 0.8), (0.5, 0.6)], false).to_error();
        match error.summary() {
            Summary::Values(vs) => {
                assert_abs_diff_eq!(vs[0], 0.2, epsilon = 1e-12);
                assert_abs_diff_eq!(vs[1], 0.4, epsilon = 1e-12);
            }
            Summary::Scalar(_) => panic!("list summary expected"),
        }
    }

    #[test]
    fn test_serialize_shape() {
        let result = MetricQueryResult::new(vec![(0.1, 0.5)], true);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["summary"], serde_json::json!(0.5));
        assert_eq!(json["pairs"], serde_json::json!([[0.1, 0.5]]));
    }
}
