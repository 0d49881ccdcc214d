//! Evaluation metrics per model category
//!
//! Each category carries only the measures it can report, and capability
//! traits (`SquaredError`, `LogLoss`, ...) are implemented only where they
//! apply. Payloads are JSON objects tagged by `schema_type`.

mod binomial;
mod capabilities;
mod gains_lift;
mod multiclass;
mod regression;
mod unsupervised;


use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{MetricsError, Result};

pub use binomial::BinomialMetrics;
pub use capabilities::{CustomMetric, GlmDeviance, GlmStats, LogLoss, ResidualError, Scored, SquaredError};
pub use gains_lift::{GainsLift, GainsLiftRow};
pub use multiclass::{ClassMetrics, MulticlassConfusion};
pub use regression::{HglmMetrics, RegressionMetrics};
pub use unsupervised::{AnomalyMetrics, ClusteringMetrics, DimReductionMetrics};

/// Model category of a metrics payload
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MetricsCategory {
    Regression,
    Binomial,
    Multinomial,
    Ordinal,
    Clustering,
    Anomaly,
    DimReduction,
    Hglm,
}

impl fmt::Display for MetricsCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Metrics reported by an evaluation, by model category
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "schema_type")]
pub enum ModelMetrics {
    #[serde(
        rename = "ModelMetricsRegression",
        alias = "ModelMetricsRegressionGeneric",
        alias = "ModelMetricsRegressionGLM",
        alias = "ModelMetricsRegressionGLMGeneric"
    )]
    Regression(RegressionMetrics),
    #[serde(
        rename = "ModelMetricsBinomial",
        alias = "ModelMetricsBinomialGeneric",
        alias = "ModelMetricsBinomialGLM",
        alias = "ModelMetricsBinomialGLMGeneric"
    )]
    Binomial(BinomialMetrics),
    #[serde(rename = "ModelMetricsMultinomial", alias = "ModelMetricsMultinomialGeneric")]
    Multinomial(ClassMetrics),
    #[serde(rename = "ModelMetricsOrdinal", alias = "ModelMetricsOrdinalGeneric")]
    Ordinal(ClassMetrics),
    #[serde(rename = "ModelMetricsClustering")]
    Clustering(ClusteringMetrics),
    #[serde(rename = "ModelMetricsAnomaly")]
    Anomaly(AnomalyMetrics),
    #[serde(rename = "ModelMetricsGLRM")]
    DimReduction(DimReductionMetrics),
    #[serde(rename = "ModelMetricsHGLMGaussianGaussian", alias = "ModelMetricsHGLMGaussianGaussianGeneric")]
    Hglm(HglmMetrics),
}

impl ModelMetrics {
    /// Parse a JSON metrics payload
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn category(&self) -> MetricsCategory {
        match self {
            ModelMetrics::Regression(_) => MetricsCategory::Regression,
            ModelMetrics::Binomial(_) => MetricsCategory::Binomial,
            ModelMetrics::Multinomial(_) => MetricsCategory::Multinomial,
            ModelMetrics::Ordinal(_) => MetricsCategory::Ordinal,
            ModelMetrics::Clustering(_) => MetricsCategory::Clustering,
            ModelMetrics::Anomaly(_) => MetricsCategory::Anomaly,
            ModelMetrics::DimReduction(_) => MetricsCategory::DimReduction,
            ModelMetrics::Hglm(_) => MetricsCategory::Hglm,
        }
    }

    /// Accessors shared by every category
    pub fn scored(&self) -> &dyn Scored {
        match self {
            ModelMetrics::Regression(m) => m,
            ModelMetrics::Binomial(m) => m,
            ModelMetrics::Multinomial(m) | ModelMetrics::Ordinal(m) => m,
            ModelMetrics::Clustering(m) => m,
            ModelMetrics::Anomaly(m) => m,
            ModelMetrics::DimReduction(m) => m,
            ModelMetrics::Hglm(m) => m,
        }
    }

    /// Squared-error measures; every category except anomaly detection
    pub fn squared_error(&self) -> Option<&dyn SquaredError> {
        match self {
            ModelMetrics::Regression(m) => Some(m),
            ModelMetrics::Binomial(m) => Some(m),
            ModelMetrics::Multinomial(m) | ModelMetrics::Ordinal(m) => Some(m),
            ModelMetrics::Clustering(m) => Some(m),
            ModelMetrics::DimReduction(m) => Some(m),
            ModelMetrics::Hglm(m) => Some(m),
            ModelMetrics::Anomaly(_) => None,
        }
    }

    /// Log loss; classifiers only
    pub fn log_loss(&self) -> Option<&dyn LogLoss> {
        match self {
            ModelMetrics::Binomial(m) => Some(m),
            ModelMetrics::Multinomial(m) | ModelMetrics::Ordinal(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_binomial(&self) -> Option<&BinomialMetrics> {
        match self {
            ModelMetrics::Binomial(m) => Some(m),
            _ => None,
        }
    }

    /// Take the binomial metrics, failing for any other category
    pub fn into_binomial(self) -> Result<BinomialMetrics> {
        match self {
            ModelMetrics::Binomial(m) => Ok(m),
            other => Err(MetricsError::Payload(format!(
                "threshold queries need binomial metrics, got {}",
                other.category()
            ))),
        }
    }
}

/// Load a metrics payload from a JSON file
pub fn load_metrics<P: AsRef<Path>>(path: P) -> Result<ModelMetrics> {
    let json = fs::read_to_string(path.as_ref()).map_err(|e| MetricsError::io(path.as_ref(), e))?;
    ModelMetrics::from_json(&json)
}
