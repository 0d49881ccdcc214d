//! Clustering, anomaly detection and dimensionality reduction metrics

use serde::Deserialize;

use super::capabilities::{impl_scored, impl_squared_error, CustomMetric};

/// Metrics of a clustering model
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ClusteringMetrics {
    nobs: u64,
    #[serde(rename = "MSE")]
    mse: f64,
    #[serde(rename = "RMSE")]
    rmse: f64,
    #[serde(default)]
    tot_withinss: Option<f64>,
    #[serde(default)]
    totss: Option<f64>,
    #[serde(default)]
    betweenss: Option<f64>,
    #[serde(flatten)]
    custom: CustomMetric,
}

impl ClusteringMetrics {
    /// Total within-cluster sum of squared error
    pub fn tot_withinss(&self) -> Option<f64> {
        self.tot_withinss
    }

    /// Total sum of squared error to the grand mean
    pub fn totss(&self) -> Option<f64> {
        self.totss
    }

    /// Between-cluster sum of squared error
    pub fn betweenss(&self) -> Option<f64> {
        self.betweenss
    }
}

impl_scored!(ClusteringMetrics);
impl_squared_error!(ClusteringMetrics);

/// Metrics of an anomaly detector; no squared-error measures apply
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AnomalyMetrics {
    nobs: u64,
    #[serde(default)]
    mean_score: Option<f64>,
    #[serde(default)]
    mean_normalized_score: Option<f64>,
    #[serde(flatten)]
    custom: CustomMetric,
}

impl AnomalyMetrics {
    /// Mean anomaly score (average tree path length for isolation forests)
    pub fn mean_score(&self) -> Option<f64> {
        self.mean_score
    }

    /// Mean normalized anomaly score
    pub fn mean_normalized_score(&self) -> Option<f64> {
        self.mean_normalized_score
    }
}

impl_scored!(AnomalyMetrics);

/// Metrics of a low-rank reconstruction model
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DimReductionMetrics {
    nobs: u64,
    #[serde(rename = "MSE")]
    mse: f64,
    #[serde(rename = "RMSE")]
    rmse: f64,
    #[serde(default)]
    numerr: Option<f64>,
    #[serde(default)]
    caterr: Option<f64>,
    #[serde(flatten)]
    custom: CustomMetric,
}

impl DimReductionMetrics {
    /// Sum of squared error over non-missing numeric entries
    pub fn num_err(&self) -> Option<f64> {
        self.numerr
    }

    /// Misclassified categories over non-missing categorical entries
    pub fn cat_err(&self) -> Option<f64> {
        self.caterr
    }
}

impl_scored!(DimReductionMetrics);
impl_squared_error!(DimReductionMetrics);
