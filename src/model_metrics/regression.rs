//! Regression and hierarchical GLM metrics

use serde::Deserialize;

use super::capabilities::{impl_scored, impl_squared_error, CustomMetric, GlmDeviance, GlmStats, ResidualError};

/// Metrics of a regression model
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RegressionMetrics {
    nobs: u64,
    #[serde(rename = "MSE")]
    mse: f64,
    #[serde(rename = "RMSE")]
    rmse: f64,
    mae: f64,
    rmsle: f64,
    mean_residual_deviance: f64,
    /// Reported by GLM regressions only
    #[serde(default)]
    r2: Option<f64>,
    #[serde(flatten)]
    glm: GlmStats,
    #[serde(flatten)]
    custom: CustomMetric,
}

impl RegressionMetrics {
    /// R² coefficient of determination, if reported
    pub fn r2(&self) -> Option<f64> {
        self.r2
    }
}

impl_scored!(RegressionMetrics);
impl_squared_error!(RegressionMetrics);

impl ResidualError for RegressionMetrics {
    fn mae(&self) -> f64 {
        self.mae
    }

    fn rmsle(&self) -> f64 {
        self.rmsle
    }

    fn mean_residual_deviance(&self) -> f64 {
        self.mean_residual_deviance
    }
}

impl GlmDeviance for RegressionMetrics {
    fn glm_stats(&self) -> &GlmStats {
        &self.glm
    }
}

/// Metrics of a hierarchical GLM (Gaussian fixed and random effects)
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct HglmMetrics {
    nobs: u64,
    #[serde(rename = "MSE")]
    mse: f64,
    #[serde(rename = "RMSE")]
    rmse: f64,
    /// Coefficients of the fixed columns
    #[serde(default)]
    fixedf: Vec<f64>,
    /// Coefficients of the random columns
    #[serde(default)]
    ranef: Vec<f64>,
    /// Standard errors of the fixed coefficients
    #[serde(default)]
    sefe: Vec<f64>,
    /// Standard errors of the random coefficients
    #[serde(default)]
    sere: Vec<f64>,
    /// Residual variance of the mean model
    #[serde(default)]
    varfix: f64,
    /// Variances of the random columns
    #[serde(default)]
    varranef: Vec<f64>,
    #[serde(default)]
    converge: bool,
    /// H-likelihood
    #[serde(default)]
    hlik: f64,
    /// Conditional AIC
    #[serde(default)]
    caic: f64,
    #[serde(flatten)]
    custom: CustomMetric,
}

impl HglmMetrics {
    pub fn fixed_coefficients(&self) -> &[f64] {
        &self.fixedf
    }

    pub fn random_coefficients(&self) -> &[f64] {
        &self.ranef
    }

    pub fn fixed_std_errors(&self) -> &[f64] {
        &self.sefe
    }

    pub fn random_std_errors(&self) -> &[f64] {
        &self.sere
    }

    /// Dispersion parameter of the mean model
    pub fn fixed_dispersion(&self) -> f64 {
        self.varfix
    }

    /// Dispersion parameters of the random columns
    pub fn random_dispersion(&self) -> &[f64] {
        &self.varranef
    }

    pub fn converged(&self) -> bool {
        self.converge
    }

    pub fn h_likelihood(&self) -> f64 {
        self.hlik
    }

    pub fn conditional_aic(&self) -> f64 {
        self.caic
    }
}

impl_scored!(HglmMetrics);
impl_squared_error!(HglmMetrics);
