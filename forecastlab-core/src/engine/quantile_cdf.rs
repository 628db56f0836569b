//! Quantile table → binned PMF/CDF.
//!
//! The quantile input mode draws its own chart: a piecewise-linear CDF through
//! the five table points in internal coordinates,
//! `(0, below_lower) (q1, 0.25) (median, 0.5) (q3, 0.75) (1, 1 - above_upper)`,
//! sampled at the bin edges.

use serde::{Deserialize, Serialize};

use crate::domain::{ContinuousQuestion, Dataset, QuantileSet};
use crate::domain::quantile::MAX_TAIL_PROBABILITY;
use crate::math::{bin_edges, piecewise_linear};

/// A quantile table mapped to the internal axis and sanitized.
///
/// Locations are clamped into `[0, 1]` and sorted; tails are 0 on closed
/// bounds and clamped into `[0, 0.25]` on open ones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InternalQuantiles {
    pub below_lower: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub above_upper: f64,
}

impl InternalQuantiles {
    pub fn from_set(quantiles: &QuantileSet, question: &ContinuousQuestion) -> Self {
        let scaling = &question.scaling;
        let mut locations = [
            scaling.unscale_to_axis(quantiles.q1),
            scaling.unscale_to_axis(quantiles.median),
            scaling.unscale_to_axis(quantiles.q3),
        ];
        locations.sort_by(f64::total_cmp);

        Self {
            below_lower: tail(quantiles.below_lower, question.open_lower_bound),
            q1: locations[0],
            median: locations[1],
            q3: locations[2],
            above_upper: tail(quantiles.above_upper, question.open_upper_bound),
        }
    }

    /// The five CDF points, sorted by location.
    pub fn cdf_points(&self) -> [(f64, f64); 5] {
        [
            (0.0, self.below_lower),
            (self.q1, 0.25),
            (self.median, 0.5),
            (self.q3, 0.75),
            (1.0, 1.0 - self.above_upper),
        ]
    }
}

fn tail(probability: f64, open: bool) -> f64 {
    if !open || !probability.is_finite() {
        return 0.0;
    }
    probability.clamp(0.0, MAX_TAIL_PROBABILITY)
}

/// Discretize a quantile table over the question's bins.
///
/// Tails become the dataset's `lower_tail` / `upper_tail`; a quartile sitting
/// on a bound puts its step into the edge bin.
pub fn dataset_from_quantiles(quantiles: &QuantileSet, question: &ContinuousQuestion) -> Dataset {
    let n = question.bin_count();
    let internal = InternalQuantiles::from_set(quantiles, question);
    let points = internal.cdf_points();
    let edges = bin_edges(n);

    // Edge values, with the endpoints pinned to the tail levels so steps at a
    // bound land inside the edge bins.
    let mut values: Vec<f64> = edges.iter().map(|&x| piecewise_linear(&points, x)).collect();
    values[0] = internal.below_lower;
    values[n] = 1.0 - internal.above_upper;

    let mass: Vec<f64> = values.windows(2).map(|w| (w[1] - w[0]).max(0.0)).collect();

    Dataset::from_mass(
        mass,
        internal.below_lower,
        internal.above_upper,
        question.open_lower_bound,
        question.open_upper_bound,
    )
}
