//! Query configuration
//!
//! Loaded from YAML. Every field has a default, so partial documents are fine.
//!
//! ```yaml
//! relative_tolerance: 1.0e-8
//! default_metric: f1
//! warn_on_nearest: true
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MetricsError, Result};
use crate::metrics::{canonicalize, DEFAULT_RELATIVE_TOLERANCE};

/// Tunables for threshold lookup and confusion-matrix defaults
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueryConfig {
    /// Relative bound under which a requested threshold matches a row
    pub relative_tolerance: f64,
    /// Metric used for confusion matrices when nothing is requested
    pub default_metric: String,
    /// Log an advisory when the nearest threshold is substituted
    pub warn_on_nearest: bool,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            relative_tolerance: DEFAULT_RELATIVE_TOLERANCE,
            default_metric: "f1".to_string(),
            warn_on_nearest: true,
        }
    }
}

impl QueryConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: QueryConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check field values
    pub fn validate(&self) -> Result<()> {
        if !(self.relative_tolerance.is_finite() && self.relative_tolerance > 0.0) {
            return Err(MetricsError::Payload(format!(
                "relative_tolerance must be a positive number, got {}",
                self.relative_tolerance
            )));
        }
        canonicalize(&self.default_metric)?;
        Ok(())
    }
}

/// Load a query configuration from a YAML file
pub fn load_config<P: AsRef<Path>>(config_path: P) -> Result<QueryConfig> {
    let yaml = fs::read_to_string(config_path.as_ref())
        .map_err(|e| MetricsError::io(config_path.as_ref(), e))?;
    QueryConfig::from_yaml(&yaml)
}
