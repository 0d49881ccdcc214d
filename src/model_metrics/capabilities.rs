//! Capability traits implemented by the metric categories that support them

use serde::{Deserialize, Serialize};

/// User-supplied custom metric reported alongside the built-in ones
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomMetric {
    #[serde(default, rename = "custom_metric_name")]
    pub name: Option<String>,
    #[serde(default, rename = "custom_metric_value")]
    pub value: Option<f64>,
}

/// GLM deviance statistics; present only for GLM-family models
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GlmStats {
    #[serde(default)]
    pub null_deviance: Option<f64>,
    #[serde(default)]
    pub residual_deviance: Option<f64>,
    #[serde(default)]
    pub null_degrees_of_freedom: Option<u64>,
    #[serde(default)]
    pub residual_degrees_of_freedom: Option<u64>,
    #[serde(default, rename = "AIC")]
    pub aic: Option<f64>,
}

/// Accessors shared by every category
pub trait Scored {
    /// Number of observations the metrics were computed on
    fn nobs(&self) -> u64;

    /// Custom metric as (name, value), if one was reported
    fn custom_metric(&self) -> Option<(&str, f64)>;
}

/// Squared-error measures
pub trait SquaredError {
    fn mse(&self) -> f64;

    fn rmse(&self) -> f64;
}

/// Residual error measures of regression models
pub trait ResidualError {
    fn mae(&self) -> f64;

    fn rmsle(&self) -> f64;

    fn mean_residual_deviance(&self) -> f64;
}

/// Log loss of probabilistic classifiers
pub trait LogLoss {
    fn logloss(&self) -> f64;
}

/// GLM deviance accessors
pub trait GlmDeviance {
    fn glm_stats(&self) -> &GlmStats;

    fn null_deviance(&self) -> Option<f64> {
        self.glm_stats().null_deviance
    }

    fn residual_deviance(&self) -> Option<f64> {
        self.glm_stats().residual_deviance
    }

    fn null_degrees_of_freedom(&self) -> Option<u64> {
        self.glm_stats().null_degrees_of_freedom
    }

    fn residual_degrees_of_freedom(&self) -> Option<u64> {
        self.glm_stats().residual_degrees_of_freedom
    }

    fn aic(&self) -> Option<f64> {
        self.glm_stats().aic
    }
}

impl CustomMetric {
    pub(crate) fn pair(&self) -> Option<(&str, f64)> {
        match (&self.name, self.value) {
            (Some(name), Some(value)) => Some((name.as_str(), value)),
            _ => None,
        }
    }
}

/// Implement `Scored` for a struct with `nobs` and `custom` fields
macro_rules! impl_scored {
    ($($ty:ty),+) => {
        $(
            impl $crate::model_metrics::Scored for $ty {
                fn nobs(&self) -> u64 {
                    self.nobs
                }

                fn custom_metric(&self) -> Option<(&str, f64)> {
                    self.custom.pair()
                }
            }
        )+
    };
}

/// Implement `SquaredError` for a struct with `mse` and `rmse` fields
macro_rules! impl_squared_error {
    ($($ty:ty),+) => {
        $(
            impl $crate::model_metrics::SquaredError for $ty {
                fn mse(&self) -> f64 {
                    self.mse
                }

                fn rmse(&self) -> f64 {
                    self.rmse
                }
            }
        )+
    };
}

pub(crate) use impl_scored;
pub(crate) use impl_squared_error;
