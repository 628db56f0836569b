//! Quantile input — the typed alternative to dragging sliders.
//!
//! The user enters values at the 25th/50th/75th percentiles and, for open
//! bounds, the probability of resolving outside the range. Each entry is a
//! `(probability, value)` point on the CDF:
//!
//! | kind     | probability          | value        |
//! |----------|----------------------|--------------|
//! | `Lower`  | `below_lower`        | `range_min`  |
//! | `Q1`     | 0.25                 | `q1`         |
//! | `Median` | 0.50                 | `median`     |
//! | `Q3`     | 0.75                 | `q3`         |
//! | `Upper`  | `1 - above_upper`    | `range_max`  |

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::question::ContinuousQuestion;
use super::scaling::Scaling;
use crate::math::PROB_EPSILON;

/// Tail probabilities may not pass the first quartile.
pub const MAX_TAIL_PROBABILITY: f64 = 0.25;

/// Which point of the quantile table an entry is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantileKind {
    Lower,
    Q1,
    Median,
    Q3,
    Upper,
}

impl QuantileKind {
    pub const ALL: [QuantileKind; 5] = [
        QuantileKind::Lower,
        QuantileKind::Q1,
        QuantileKind::Median,
        QuantileKind::Q3,
        QuantileKind::Upper,
    ];

    /// CDF level of the interior quantiles; `None` for the bound markers,
    /// whose probability is part of the forecast.
    pub fn fixed_probability(&self) -> Option<f64> {
        match self {
            QuantileKind::Q1 => Some(0.25),
            QuantileKind::Median => Some(0.5),
            QuantileKind::Q3 => Some(0.75),
            QuantileKind::Lower | QuantileKind::Upper => None,
        }
    }
}

/// A single `(probability, value)` point; `value` is in the question's units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quantile {
    pub kind: QuantileKind,
    pub probability: f64,
    pub value: f64,
}

/// The five-point quantile table of one forecast.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuantileSet {
    /// Probability of resolving below `range_min` (0 for a closed bound).
    #[serde(default)]
    pub below_lower: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Probability of resolving above `range_max` (0 for a closed bound).
    #[serde(default)]
    pub above_upper: f64,
}

/// User-facing problems with a quantile table.
///
/// The engine never fails on these (it sanitizes); they exist so the input
/// widget can explain what is wrong.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuantileError {
    #[error("{kind:?} must be a finite number")]
    NonFinite { kind: QuantileKind },
    #[error("{lower:?} ({lower_value}) must be below {upper:?} ({upper_value})")]
    NotIncreasing {
        lower: QuantileKind,
        lower_value: f64,
        upper: QuantileKind,
        upper_value: f64,
    },
    #[error("{kind:?} ({value}) is outside the question range [{range_min}, {range_max}]")]
    OutsideRange {
        kind: QuantileKind,
        value: f64,
        range_min: f64,
        range_max: f64,
    },
    #[error("{kind:?} ({value}) must be strictly inside the closed bound at {bound}")]
    OnClosedBound {
        kind: QuantileKind,
        value: f64,
        bound: f64,
    },
    #[error("the {side} bound is closed, so its tail probability must be 0 (got {probability})")]
    TailOnClosedBound { side: &'static str, probability: f64 },
    #[error("{side} tail probability must be in [0, 0.25] (got {probability})")]
    TailOutOfRange { side: &'static str, probability: f64 },
}

impl QuantileSet {
    pub fn new(q1: f64, median: f64, q3: f64) -> Self {
        Self {
            below_lower: 0.0,
            q1,
            median,
            q3,
            above_upper: 0.0,
        }
    }

    pub fn with_tails(mut self, below_lower: f64, above_upper: f64) -> Self {
        self.below_lower = below_lower;
        self.above_upper = above_upper;
        self
    }

    /// The table as five `(probability, value)` points, lower bound first.
    pub fn quantiles(&self, scaling: &Scaling) -> [Quantile; 5] {
        [
            Quantile {
                kind: QuantileKind::Lower,
                probability: self.below_lower,
                value: scaling.range_min,
            },
            Quantile {
                kind: QuantileKind::Q1,
                probability: 0.25,
                value: self.q1,
            },
            Quantile {
                kind: QuantileKind::Median,
                probability: 0.5,
                value: self.median,
            },
            Quantile {
                kind: QuantileKind::Q3,
                probability: 0.75,
                value: self.q3,
            },
            Quantile {
                kind: QuantileKind::Upper,
                probability: 1.0 - self.above_upper,
                value: scaling.range_max,
            },
        ]
    }

    /// Check the table against the question; returns the first problem found.
    pub fn validate(&self, question: &ContinuousQuestion) -> Result<(), QuantileError> {
        let interior = [
            (QuantileKind::Q1, self.q1),
            (QuantileKind::Median, self.median),
            (QuantileKind::Q3, self.q3),
        ];
        let tails = [
            (QuantileKind::Lower, self.below_lower),
            (QuantileKind::Upper, self.above_upper),
        ];
        for (kind, value) in interior.iter().chain(tails.iter()) {
            if !value.is_finite() {
                return Err(QuantileError::NonFinite { kind: *kind });
            }
        }

        for pair in interior.windows(2) {
            let (lower, lower_value) = pair[0];
            let (upper, upper_value) = pair[1];
            if lower_value >= upper_value {
                return Err(QuantileError::NotIncreasing {
                    lower,
                    lower_value,
                    upper,
                    upper_value,
                });
            }
        }

        let scaling = &question.scaling;
        for &(kind, value) in &interior {
            if value < scaling.range_min || value > scaling.range_max {
                return Err(QuantileError::OutsideRange {
                    kind,
                    value,
                    range_min: scaling.range_min,
                    range_max: scaling.range_max,
                });
            }
        }
        if !question.open_lower_bound && self.q1 <= scaling.range_min {
            return Err(QuantileError::OnClosedBound {
                kind: QuantileKind::Q1,
                value: self.q1,
                bound: scaling.range_min,
            });
        }
        if !question.open_upper_bound && self.q3 >= scaling.range_max {
            return Err(QuantileError::OnClosedBound {
                kind: QuantileKind::Q3,
                value: self.q3,
                bound: scaling.range_max,
            });
        }

        check_tail("lower", self.below_lower, question.open_lower_bound)?;
        check_tail("upper", self.above_upper, question.open_upper_bound)?;
        Ok(())
    }
}

fn check_tail(side: &'static str, probability: f64, open: bool) -> Result<(), QuantileError> {
    if !open {
        if probability != 0.0 {
            return Err(QuantileError::TailOnClosedBound { side, probability });
        }
        return Ok(());
    }
    // Inclusive: a kernel whose left handle sits on the bound leaks exactly 0.25.
    if !(0.0..=MAX_TAIL_PROBABILITY + PROB_EPSILON).contains(&probability) {
        return Err(QuantileError::TailOutOfRange { side, probability });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question() -> ContinuousQuestion {
        ContinuousQuestion::new(Scaling::linear(0.0, 100.0))
    }

    #[test]
    fn valid_table_passes() {
        assert!(QuantileSet::new(20.0, 40.0, 70.0).validate(&question()).is_ok());
    }

    #[test]
    fn non_increasing_is_rejected() {
        let err = QuantileSet::new(40.0, 40.0, 70.0).validate(&question()).unwrap_err();
        assert!(matches!(err, QuantileError::NotIncreasing { lower: QuantileKind::Q1, .. }));
    }

    #[test]
    fn closed_bound_rejects_quartile_on_bound() {
        let err = QuantileSet::new(0.0, 40.0, 70.0).validate(&question()).unwrap_err();
        assert!(matches!(err, QuantileError::OnClosedBound { kind: QuantileKind::Q1, .. }));
    }

    #[test]
    fn open_bound_allows_quartile_on_bound() {
        let q = question().with_bounds(true, false);
        assert!(QuantileSet::new(0.0, 40.0, 70.0).validate(&q).is_ok());
    }

    #[test]
    fn closed_bound_rejects_tail() {
        let err = QuantileSet::new(20.0, 40.0, 70.0)
            .with_tails(0.1, 0.0)
            .validate(&question())
            .unwrap_err();
        assert_eq!(
            err,
            QuantileError::TailOnClosedBound {
                side: "lower",
                probability: 0.1
            }
        );
    }

    #[test]
    fn open_tail_may_not_pass_first_quartile() {
        let q = question().with_bounds(false, true);
        let err = QuantileSet::new(20.0, 40.0, 70.0)
            .with_tails(0.0, 0.3)
            .validate(&q)
            .unwrap_err();
        assert!(matches!(err, QuantileError::TailOutOfRange { side: "upper", .. }));
    }

    #[test]
    fn tail_of_a_quarter_is_accepted() {
        let q = question().with_bounds(true, false);
        let set = QuantileSet::new(0.0, 10.0, 40.0).with_tails(0.25, 0.0);
        assert!(set.validate(&q).is_ok());
        let set = set.with_tails(0.25 + 1e-12, 0.0);
        assert!(set.validate(&q).is_ok());
        let set = set.with_tails(0.26, 0.0);
        assert!(set.validate(&q).is_err());
    }

    #[test]
    fn outside_range_is_rejected() {
        let err = QuantileSet::new(20.0, 40.0, 170.0).validate(&question()).unwrap_err();
        assert!(matches!(err, QuantileError::OutsideRange { kind: QuantileKind::Q3, .. }));
    }

    #[test]
    fn nan_is_rejected() {
        let err = QuantileSet::new(f64::NAN, 40.0, 70.0).validate(&question()).unwrap_err();
        assert_eq!(err, QuantileError::NonFinite { kind: QuantileKind::Q1 });
    }

    #[test]
    fn quantile_points_carry_bound_probabilities() {
        let set = QuantileSet::new(20.0, 40.0, 70.0).with_tails(0.05, 0.1);
        let points = set.quantiles(&Scaling::linear(0.0, 100.0));
        assert_eq!(points[0].probability, 0.05);
        assert_eq!(points[0].value, 0.0);
        assert_eq!(points[4].probability, 0.9);
        assert_eq!(points[4].value, 100.0);
        assert_eq!(points[2].kind.fixed_probability(), Some(0.5));
    }
}
