//! Forecast files — a question and a forecast in one TOML document.
//!
//! ```toml
//! question_id = 31337        # optional
//!
//! [question]
//! range_min = 0.0
//! range_max = 100.0
//! # zero_point = -1.0        # log-scaled questions only
//! open_lower_bound = false
//! open_upper_bound = true
//! inbound_outcome_count = 200
//!
//! [forecast]
//! type = "slider"
//! components = [
//!     { left = 0.3, center = 0.45, right = 0.6, weight = 1.0 },
//! ]
//! ```
//!
//! Quantile input uses `type = "quantile"` with `q1`, `median`, `q3` in the
//! question's units and optional `below_lower` / `above_upper` probabilities.

use std::path::Path;

use anyhow::{Context, Result};
use forecastlab_core::domain::{ContinuousForecast, ContinuousQuestion, QuantileError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastFile {
    #[serde(default)]
    pub question_id: Option<u64>,
    pub question: ContinuousQuestion,
    pub forecast: ContinuousForecast,
}

impl ForecastFile {
    pub fn from_toml(s: &str) -> Result<Self> {
        toml::from_str(s).context("invalid forecast file")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read forecast file {}", path.display()))?;
        Self::from_toml(&contents).with_context(|| format!("in {}", path.display()))
    }

    /// User-facing problems with a quantile table. Slider input always passes.
    pub fn check(&self) -> Result<(), QuantileError> {
        match &self.forecast {
            ContinuousForecast::Slider { .. } => Ok(()),
            ContinuousForecast::Quantile(quantiles) => quantiles.validate(&self.question),
        }
    }
}
