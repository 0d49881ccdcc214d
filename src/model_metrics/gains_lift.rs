//! Gains/lift table of a binary classifier

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::MetricsError;

/// One group of the gains/lift table
///
/// Groups are quantiles of the predicted probability, highest scores first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GainsLiftRow {
    pub group: u32,
    pub cumulative_data_fraction: f64,
    /// Smallest predicted probability in the group
    pub lower_threshold: f64,
    pub lift: f64,
    pub cumulative_lift: f64,
    pub response_rate: f64,
    pub score: f64,
    pub cumulative_response_rate: f64,
    pub cumulative_score: f64,
    pub capture_rate: f64,
    pub cumulative_capture_rate: f64,
    /// Percentage gain over the overall response rate
    pub gain: f64,
    pub cumulative_gain: f64,
    #[serde(default)]
    pub kolmogorov_smirnov: Option<f64>,
}

/// Gains/lift table, one row per group in group order
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<GainsLiftRow>", into = "Vec<GainsLiftRow>")]
pub struct GainsLift {
    rows: Vec<GainsLiftRow>,
}

impl TryFrom<Vec<GainsLiftRow>> for GainsLift {
    type Error = MetricsError;

    /// Reject fractions outside [0, 1] or a cumulative fraction that decreases
    fn try_from(rows: Vec<GainsLiftRow>) -> Result<Self, Self::Error> {
        let mut previous = 0.0;
        for row in &rows {
            let fraction = row.cumulative_data_fraction;
            if !(0.0..=1.0).contains(&fraction) || fraction < previous {
                return Err(MetricsError::Payload(format!(
                    "gains/lift group {} has cumulative data fraction {fraction}",
                    row.group
                )));
            }
            previous = fraction;
        }
        Ok(Self { rows })
    }
}

impl From<GainsLift> for Vec<GainsLiftRow> {
    fn from(table: GainsLift) -> Self {
        table.rows
    }
}

impl GainsLift {
    pub fn rows(&self) -> &[GainsLiftRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Largest Kolmogorov-Smirnov statistic over the groups, if reported
    pub fn kolmogorov_smirnov(&self) -> Option<f64> {
        self.rows.iter().filter_map(|r| r.kolmogorov_smirnov).reduce(f64::max)
    }

    /// Cumulative lift at the first group covering `fraction` of the data
    pub fn cumulative_lift_at(&self, fraction: f64) -> Option<f64> {
        self.rows.iter().find(|r| r.cumulative_data_fraction >= fraction).map(|r| r.cumulative_lift)
    }
}

impl fmt::Display for GainsLift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Gains/Lift Table:")?;
        writeln!(
            f,
            "{:>5} {:>10} {:>10} {:>8} {:>8} {:>9} {:>9}",
            "group", "cum_frac", "lower_thr", "lift", "cum_lift", "capture", "cum_gain"
        )?;
        for r in &self.rows {
            writeln!(
                f,
                "{:>5} {:>10.4} {:>10.4} {:>8.4} {:>8.4} {:>9.4} {:>9.2}",
                r.group,
                r.cumulative_data_fraction,
                r.lower_threshold,
                r.lift,
                r.cumulative_lift,
                r.capture_rate,
                r.cumulative_gain
            )?;
        }
        Ok(())
    }
}
