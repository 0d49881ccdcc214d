//! Threshold lookup with relative-tolerance matching and nearest fallback

use serde::Serialize;

use super::table::MetricsTable;
use crate::error::{MetricsError, Result};

/// Relative tolerance used to treat two thresholds as equal
pub const DEFAULT_RELATIVE_TOLERANCE: f64 = 1e-8;

/// How a requested threshold was matched to a table row
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Row threshold equals the request within tolerance
    Exact,
    /// No row matched; the closest row was substituted
    Nearest,
}

/// Result of locating a threshold in the table
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ThresholdMatch {
    /// Index of the row in table order
    pub row: usize,
    /// Threshold the caller asked for
    pub requested: f64,
    /// Threshold stored in the matched row
    pub actual: f64,
    pub kind: MatchKind,
}

impl ThresholdMatch {
    /// Whether the closest row was substituted for the request
    pub fn is_fallback(&self) -> bool {
        self.kind == MatchKind::Nearest
    }
}

/// Sorted index over the thresholds of one table
///
/// Built once per table and never mutated, so lookups are safe to share
/// across threads. Exact and nearest lookups are both O(log n).
#[derive(Clone, Debug)]
pub struct ThresholdIndex {
    /// (threshold, row) sorted by threshold, then by row
    sorted: Vec<(f64, usize)>,
    relative_tolerance: f64,
    warn_on_nearest: bool,
}

impl ThresholdIndex {
    /// Build an index using the default tolerance
    pub fn new(table: &MetricsTable) -> Self {
        Self::with_tolerance(table, DEFAULT_RELATIVE_TOLERANCE)
    }

    /// Build an index with a custom relative tolerance
    pub fn with_tolerance(table: &MetricsTable, relative_tolerance: f64) -> Self {
        let mut sorted: Vec<(f64, usize)> = table.thresholds().enumerate().map(|(i, t)| (t, i)).collect();
        sorted.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        Self { sorted, relative_tolerance, warn_on_nearest: true }
    }

    /// Enable or disable the advisory log line on nearest-threshold fallback
    pub fn warn_on_nearest(mut self, enabled: bool) -> Self {
        self.warn_on_nearest = enabled;
        self
    }

    /// Number of indexed rows
    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    /// Whether the index is empty
    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    /// Row indices in table order, bypassing tolerance matching
    pub fn all_thresholds(&self) -> std::ops::Range<usize> {
        0..self.sorted.len()
    }

    /// Resolve a requested threshold to a row
    ///
    /// Fails with `EmptyTable` on an empty table and `InvalidThreshold` when
    /// `t` is not in [0, 1]. Otherwise returns either the row matching within
    /// tolerance or, failing that, the closest row (flagged `Nearest`).
    pub fn locate(&self, t: f64) -> Result<ThresholdMatch> {
        if self.sorted.is_empty() {
            return Err(MetricsError::EmptyTable);
        }
        if !(0.0..=1.0).contains(&t) {
            return Err(MetricsError::InvalidThreshold(t.to_string()));
        }

        let (actual, row) = self.closest(t);
        if self.within_tolerance(t, actual) {
            return Ok(ThresholdMatch { row, requested: t, actual, kind: MatchKind::Exact });
        }

        if self.warn_on_nearest {
            tracing::warn!(
                requested = t,
                actual,
                "could not find exact threshold {t}; using closest threshold found {actual}"
            );
        }
        Ok(ThresholdMatch { row, requested: t, actual, kind: MatchKind::Nearest })
    }

    fn within_tolerance(&self, t: f64, c: f64) -> bool {
        let diff = (t - c).abs();
        diff == 0.0 || diff < self.relative_tolerance * t.max(c)
    }

    /// Closest (threshold, row) to `t`; ties go to the earlier table row
    fn closest(&self, t: f64) -> (f64, usize) {
        let pos = self.sorted.partition_point(|(c, _)| *c < t);
        let above = self.sorted.get(pos).copied();
        let below = pos.checked_sub(1).map(|i| self.sorted[i]);

        match (below, above) {
            (Some(b), Some(a)) => {
                let (db, da) = (t - b.0, a.0 - t);
                if db < da || (db == da && b.1 < a.1) {
                    b
                } else {
                    a
                }
            }
            (Some(b), None) => b,
            (None, Some(a)) => a,
            (None, None) => unreachable!("index is non-empty"),
        }
    }
}
