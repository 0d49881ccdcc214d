//! Binary classifier metrics

use serde::Deserialize;

use super::capabilities::{impl_scored, impl_squared_error, CustomMetric, GlmDeviance, GlmStats, LogLoss};
use super::gains_lift::GainsLift;
use crate::config::QueryConfig;
use crate::error::{MetricsError, Result};
use crate::metrics::{MaxCriteriaTable, MetricsTable, ThresholdMetrics};

fn default_domain() -> [String; 2] {
    ["0".to_string(), "1".to_string()]
}

/// Wire shape of a binomial metrics document
#[derive(Deserialize)]
struct RawBinomial {
    nobs: u64,
    #[serde(rename = "MSE")]
    mse: f64,
    #[serde(rename = "RMSE")]
    rmse: f64,
    logloss: f64,
    #[serde(rename = "AUC")]
    auc: f64,
    #[serde(default)]
    pr_auc: Option<f64>,
    #[serde(rename = "Gini")]
    gini: f64,
    #[serde(default = "default_domain")]
    domain: [String; 2],
    thresholds_and_metric_scores: MetricsTable,
    max_criteria_and_metric_scores: MaxCriteriaTable,
    #[serde(default)]
    gains_lift_table: Option<GainsLift>,
    #[serde(flatten)]
    glm: GlmStats,
    #[serde(flatten)]
    custom: CustomMetric,
}

/// Metrics of a binary classifier, including threshold queries
#[derive(Clone, Debug, Deserialize)]
#[serde(try_from = "RawBinomial")]
pub struct BinomialMetrics {
    nobs: u64,
    mse: f64,
    rmse: f64,
    logloss: f64,
    auc: f64,
    pr_auc: Option<f64>,
    gini: f64,
    gains_lift: Option<GainsLift>,
    glm: GlmStats,
    custom: CustomMetric,
    thresholds: ThresholdMetrics,
}

impl TryFrom<RawBinomial> for BinomialMetrics {
    type Error = MetricsError;

    fn try_from(raw: RawBinomial) -> Result<Self> {
        let observed = raw.thresholds_and_metric_scores.total_observations();
        if !raw.thresholds_and_metric_scores.is_empty() && observed != raw.nobs {
            return Err(MetricsError::InconsistentCounts { row: 0, expected: raw.nobs, actual: observed });
        }
        Ok(Self {
            nobs: raw.nobs,
            mse: raw.mse,
            rmse: raw.rmse,
            logloss: raw.logloss,
            auc: raw.auc,
            pr_auc: raw.pr_auc,
            gini: raw.gini,
            gains_lift: raw.gains_lift_table,
            glm: raw.glm,
            custom: raw.custom,
            thresholds: ThresholdMetrics::new(
                raw.thresholds_and_metric_scores,
                raw.max_criteria_and_metric_scores,
                raw.domain,
            ),
        })
    }
}

impl BinomialMetrics {
    /// Rebuild the threshold queries with a custom configuration
    pub fn configure(mut self, config: &QueryConfig) -> Result<Self> {
        self.thresholds = ThresholdMetrics::with_config(
            self.thresholds.table().clone(),
            self.thresholds.criteria().clone(),
            self.thresholds.domain().clone(),
            config,
        )?;
        Ok(self)
    }

    /// Threshold metric queries and confusion matrices
    pub fn thresholds(&self) -> &ThresholdMetrics {
        &self.thresholds
    }

    /// Area under the ROC curve
    pub fn auc(&self) -> f64 {
        self.auc
    }

    /// Area under the precision-recall curve
    pub fn pr_auc(&self) -> Option<f64> {
        self.pr_auc
    }

    /// Gini coefficient
    pub fn gini(&self) -> f64 {
        self.gini
    }

    /// Gains/lift table, when the evaluation produced one
    pub fn gains_lift(&self) -> Option<&GainsLift> {
        self.gains_lift.as_ref()
    }

    /// ROC coordinates: (false positive rates, true positive rates)
    pub fn roc(&self) -> (Vec<f64>, Vec<f64>) {
        self.thresholds.roc()
    }
}

impl_scored!(BinomialMetrics);
impl_squared_error!(BinomialMetrics);

impl LogLoss for BinomialMetrics {
    fn logloss(&self) -> f64 {
        self.logloss
    }
}

impl GlmDeviance for BinomialMetrics {
    fn glm_stats(&self) -> &GlmStats {
        &self.glm
    }
}
