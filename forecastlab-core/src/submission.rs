//! Submission payloads — the standardized `continuousCdf` and its JSON envelope.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::StandardizeConfig;
use crate::domain::{ContinuousForecast, ContinuousQuestion, Dataset};

/// Share of the distribution that always stays on the axis after the tails
/// are raised to their minimum.
const MIN_INBOUND_SHARE: f64 = 0.01;

/// Smallest tail an open bound keeps, whatever the configuration says.
/// An open upper bound must not end at 1.
const MIN_OPEN_TAIL_FLOOR: f64 = 1e-6;

/// Tolerance on the last value of a closed-upper CDF.
const CLOSED_UPPER_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("continuous CDF has {actual} values, question expects {expected}")]
    Length { expected: usize, actual: usize },
    #[error("continuous CDF value at {index} is not finite")]
    NonFinite { index: usize },
    #[error("continuous CDF value at {index} is {value}, outside [0, 1]")]
    OutOfRange { index: usize, value: f64 },
    #[error("continuous CDF is not strictly increasing at {index} ({previous} -> {value})")]
    NotIncreasing {
        index: usize,
        previous: f64,
        value: f64,
    },
    #[error("closed upper bound requires the CDF to end at 1, got {last}")]
    ClosedUpperNotOne { last: f64 },
    #[error("open upper bound requires mass above the range, but the CDF ends at {last}")]
    OpenUpperReachesOne { last: f64 },
    #[error("failed to serialize submission: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Absolute CDF ready to submit, one value per bin right edge.
///
/// The inbound PMF is blended with a uniform PMF by `uniform_mix` so every bin
/// carries mass. Open bounds keep at least `min_open_tail` outside the axis;
/// closed bounds keep none, so a closed upper bound ends at exactly 1.
pub fn standardize_cdf(dataset: &Dataset, config: &StandardizeConfig) -> Vec<f64> {
    let n = dataset.bin_count();
    if n == 0 {
        return Vec::new();
    }

    let min_tail = if config.min_open_tail.is_finite() {
        config.min_open_tail.clamp(MIN_OPEN_TAIL_FLOOR, 0.5)
    } else {
        StandardizeConfig::default().min_open_tail
    };
    let mut lower = if dataset.open_lower_bound {
        dataset.lower_tail.max(min_tail)
    } else {
        0.0
    };
    let mut upper = if dataset.open_upper_bound {
        dataset.upper_tail.max(min_tail)
    } else {
        0.0
    };
    let outside = lower + upper;
    if outside > 1.0 - MIN_INBOUND_SHARE {
        let shrink = (1.0 - MIN_INBOUND_SHARE) / outside;
        lower *= shrink;
        upper *= shrink;
        log::debug!("tails shrunk to lower={lower:.4} upper={upper:.4}");
    }
    let inbound = 1.0 - lower - upper;

    let mix = if config.uniform_mix.is_finite() {
        config.uniform_mix.clamp(f64::EPSILON, 1.0)
    } else {
        StandardizeConfig::default().uniform_mix
    };
    let uniform = 1.0 / n as f64;

    let mut running = 0.0;
    let mut cdf: Vec<f64> = dataset
        .pmf
        .iter()
        .map(|&p| {
            let p = if p.is_finite() { p.max(0.0) } else { 0.0 };
            running += (1.0 - mix) * p + mix * uniform;
            lower + inbound * running
        })
        .collect();

    // The running sum carries rounding error; pin the last edge.
    if let Some(last) = cdf.last_mut() {
        *last = 1.0 - upper;
    }
    cdf
}

/// Check a `continuousCdf` against the question it is submitted to.
pub fn validate_continuous_cdf(
    cdf: &[f64],
    question: &ContinuousQuestion,
) -> Result<(), SubmissionError> {
    let expected = question.bin_count();
    if cdf.len() != expected {
        return Err(SubmissionError::Length {
            expected,
            actual: cdf.len(),
        });
    }

    let mut previous: Option<f64> = None;
    for (index, &value) in cdf.iter().enumerate() {
        if !value.is_finite() {
            return Err(SubmissionError::NonFinite { index });
        }
        if !(0.0..=1.0).contains(&value) {
            return Err(SubmissionError::OutOfRange { index, value });
        }
        if let Some(previous) = previous {
            if value <= previous {
                return Err(SubmissionError::NotIncreasing {
                    index,
                    previous,
                    value,
                });
            }
        }
        previous = Some(value);
    }

    let last = cdf.last().copied().unwrap_or(0.0);
    if question.open_upper_bound {
        if last >= 1.0 {
            return Err(SubmissionError::OpenUpperReachesOne { last });
        }
    } else if (last - 1.0).abs() > CLOSED_UPPER_TOLERANCE {
        return Err(SubmissionError::ClosedUpperNotOne { last });
    }
    Ok(())
}

/// JSON body of a forecast submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastSubmission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_id: Option<u64>,
    pub continuous_cdf: Vec<f64>,
    pub distribution_input: ContinuousForecast,
}

impl ForecastSubmission {
    /// Discretize, standardize and validate a forecast.
    pub fn build(
        question_id: Option<u64>,
        forecast: ContinuousForecast,
        question: &ContinuousQuestion,
        config: &StandardizeConfig,
    ) -> Result<Self, SubmissionError> {
        let dataset = forecast.to_dataset(question);
        let continuous_cdf = standardize_cdf(&dataset, config);
        validate_continuous_cdf(&continuous_cdf, question)?;
        log::debug!(
            "built {} submission with {} CDF points",
            forecast.mode_name(),
            continuous_cdf.len()
        );
        Ok(Self {
            question_id,
            continuous_cdf,
            distribution_input: forecast,
        })
    }

    pub fn to_json(&self) -> Result<String, SubmissionError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// BLAKE3 hex digest of the compact JSON. Identical submissions share it.
    pub fn fingerprint(&self) -> Result<String, SubmissionError> {
        let canonical = serde_json::to_string(self)?;
        Ok(blake3::hash(canonical.as_bytes()).to_hex().to_string())
    }
}
