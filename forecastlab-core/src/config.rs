//! Engine configuration — quantile fit and submission standardization knobs.
//!
//! Loaded from TOML; every table and field is optional:
//!
//! ```toml
//! [fit]
//! max_iterations = 100
//! initial_step = 0.05
//! tolerance = 1e-4
//! tail_weight = 1.0
//!
//! [standardize]
//! min_open_tail = 0.001
//! uniform_mix = 0.01
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from loading or validating an [`EngineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Settings for the quantile → slider pattern search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitConfig {
    /// Upper bound on search iterations (each tries two moves per open
    /// bound that asks for a tail).
    pub max_iterations: usize,
    /// First step size for the tail-component weights.
    pub initial_step: f64,
    /// The search stops once the step shrinks below this.
    pub tolerance: f64,
    /// Weight of squared tail-probability errors relative to squared
    /// quartile-location errors.
    pub tail_weight: f64,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            initial_step: 0.05,
            tolerance: 1e-4,
            tail_weight: 1.0,
        }
    }
}

/// Settings for turning a dataset into a submittable `continuousCdf`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StandardizeConfig {
    /// Minimum mass kept outside an open bound. Must be positive.
    pub min_open_tail: f64,
    /// Share of inbound mass spread uniformly so the CDF strictly increases.
    pub uniform_mix: f64,
}

impl Default for StandardizeConfig {
    fn default() -> Self {
        Self {
            min_open_tail: 0.001,
            uniform_mix: 0.01,
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub fit: FitConfig,
    pub standardize: StandardizeConfig,
}

impl EngineConfig {
    /// Parse and validate a TOML string.
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let fit = &self.fit;
        if fit.max_iterations == 0 {
            return Err(invalid("fit.max_iterations", "must be at least 1"));
        }
        if !(fit.initial_step > 0.0 && fit.initial_step <= 1.0) {
            return Err(invalid(
                "fit.initial_step",
                format!("must be in (0, 1], got {}", fit.initial_step),
            ));
        }
        if !(fit.tolerance > 0.0 && fit.tolerance <= fit.initial_step) {
            return Err(invalid(
                "fit.tolerance",
                format!("must be in (0, initial_step], got {}", fit.tolerance),
            ));
        }
        if !(fit.tail_weight.is_finite() && fit.tail_weight >= 0.0) {
            return Err(invalid(
                "fit.tail_weight",
                format!("must be finite and >= 0, got {}", fit.tail_weight),
            ));
        }

        let std = &self.standardize;
        if !(std.min_open_tail > 0.0 && std.min_open_tail < 0.5) {
            return Err(invalid(
                "standardize.min_open_tail",
                format!("must be in (0, 0.5), got {}", std.min_open_tail),
            ));
        }
        if !(std.uniform_mix > 0.0 && std.uniform_mix <= 1.0) {
            return Err(invalid(
                "standardize.uniform_mix",
                format!("must be in (0, 1], got {}", std.uniform_mix),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_default() {
        let config = EngineConfig::from_toml("").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn partial_tables_keep_defaults() {
        let config = EngineConfig::from_toml("[fit]\nmax_iterations = 7\n").unwrap();
        assert_eq!(config.fit.max_iterations, 7);
        assert_eq!(config.fit.initial_step, FitConfig::default().initial_step);
        assert_eq!(config.standardize, StandardizeConfig::default());
    }

    #[test]
    fn default_passes_validation() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_uniform_mix_is_rejected() {
        let err = EngineConfig::from_toml("[standardize]\nuniform_mix = 0.0\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "standardize.uniform_mix",
                ..
            }
        ));
    }

    #[test]
    fn zero_open_tail_is_rejected() {
        let err = EngineConfig::from_toml("[standardize]\nmin_open_tail = 0.0\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "standardize.min_open_tail",
                ..
            }
        ));
    }

    #[test]
    fn tolerance_above_step_is_rejected() {
        let err =
            EngineConfig::from_toml("[fit]\ninitial_step = 0.01\ntolerance = 0.1\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "fit.tolerance", .. }));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = EngineConfig::from_toml("[fit\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = EngineConfig::from_file(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn toml_round_trip() {
        let config = EngineConfig {
            fit: FitConfig {
                max_iterations: 40,
                initial_step: 0.1,
                tolerance: 1e-3,
                tail_weight: 2.5,
            },
            standardize: StandardizeConfig {
                min_open_tail: 0.002,
                uniform_mix: 0.05,
            },
        };
        let s = toml::to_string(&config).unwrap();
        assert_eq!(EngineConfig::from_toml(&s).unwrap(), config);
    }
}
