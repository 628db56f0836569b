//! Quantile table → slider components (best-effort, lossy).
//!
//! The fit is a mixture of up to three components:
//! - a main component carrying the quartiles
//! - on an open lower bound with a non-zero target tail, a needle component
//!   at 0 that puts half its weight below the bound
//! - likewise a needle at 1 for an open upper bound
//!
//! For given needle weights the main component's handles are solved in closed
//! form so that the mixture's quartiles land on the table's. A bounded compass
//! search then moves the needle weights to minimize
//!
//! ```text
//! Σ (quartile location - target)²  +  tail_weight · Σ_open (tail - target)²
//! ```
//!
//! rejecting any candidate whose worst quartile error exceeds
//! [`QUARTILE_SLACK`] (or the starting error, if that is already larger).
//! Quartiles therefore round trip to within the slack on the internal axis.
//! Tails are matched as far as slider mixtures reach: a needle moves at most
//! half of [`MAX_TAIL_WEIGHT`] out of bounds, and a target tail below the
//! main kernel's own leak cannot be reduced.

use serde::{Deserialize, Serialize};

use crate::config::FitConfig;
use crate::domain::{ContinuousQuestion, Dataset, QuantileSet, SliderComponent};
use crate::engine::bins::bin_weights_from_sliders;
use crate::engine::quantile_cdf::InternalQuantiles;
use crate::engine::quartiles::percentile_location;
use crate::math::kernel::LN_3;

/// Below this objective value the fit is considered exact.
const EXACT_FIT: f64 = 1e-14;

/// Largest quartile-location error (internal axis) a search step may accept.
pub const QUARTILE_SLACK: f64 = 0.01;

/// Upper bound on each needle's weight. Keeps the main component's
/// percentile targets strictly inside (0, 1).
pub const MAX_TAIL_WEIGHT: f64 = 0.24;

/// Width of a needle component.
const NEEDLE_SPREAD: f64 = 1e-9;

/// Needles lighter than this are dropped from the result.
const MIN_NEEDLE_WEIGHT: f64 = 1e-6;

/// Outcome of fitting slider components to a quantile table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderFit {
    pub components: Vec<SliderComponent>,
    /// Final objective value (sum of squared errors).
    pub residual: f64,
    pub iterations: usize,
    /// True if the search ran down to its tolerance (or hit an exact fit)
    /// rather than out of iterations.
    pub converged: bool,
}

impl SliderFit {
    /// Components that need no fitting (already slider input).
    pub fn exact(components: Vec<SliderComponent>) -> Self {
        Self {
            components,
            residual: 0.0,
            iterations: 0,
            converged: true,
        }
    }
}

/// Needle weights below / above the bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TailWeights {
    lower: f64,
    upper: f64,
}

impl TailWeights {
    const NONE: Self = Self {
        lower: 0.0,
        upper: 0.0,
    };

    fn get(&self, dim: usize) -> f64 {
        if dim == 0 {
            self.lower
        } else {
            self.upper
        }
    }

    fn with(mut self, dim: usize, value: f64) -> Self {
        if dim == 0 {
            self.lower = value;
        } else {
            self.upper = value;
        }
        self
    }
}

fn logit(p: f64) -> f64 {
    (p / (1.0 - p)).ln()
}

/// Main-component handles whose mixture with the needles puts the quartiles
/// at `target`. Needles sit at the bounds, so for interior `x` the mixture
/// CDF is `lower + main · F(x)`.
fn main_handles(target: &InternalQuantiles, tails: TailWeights) -> [f64; 3] {
    let main = 1.0 - tails.lower - tails.upper;
    let x = [target.q1, target.median, target.q3];
    let l = [0.25, 0.5, 0.75].map(|p| logit((p - tails.lower) / main));

    let (center, left_scale, right_scale) = if l[1] <= 0.0 {
        let left_scale = (x[1] - x[0]) / (l[1] - l[0]);
        let center = x[1] - left_scale * l[1];
        (center, left_scale, ((x[2] - center) / l[2]).max(0.0))
    } else {
        let right_scale = (x[2] - x[1]) / (l[2] - l[1]);
        let center = x[1] - right_scale * l[1];
        (center, ((x[0] - center) / l[0]).max(0.0), right_scale)
    };

    let center = center.clamp(0.0, 1.0);
    [
        (center - left_scale * LN_3).clamp(0.0, center),
        center,
        (center + right_scale * LN_3).clamp(center, 1.0),
    ]
}

fn mixture(target: &InternalQuantiles, tails: TailWeights) -> Vec<SliderComponent> {
    let [left, center, right] = main_handles(target, tails);
    let main = 1.0 - tails.lower - tails.upper;
    let mut components = vec![SliderComponent::new(left, center, right, main)];
    if tails.lower > MIN_NEEDLE_WEIGHT {
        components.push(SliderComponent::new(0.0, 0.0, NEEDLE_SPREAD, tails.lower));
    }
    if tails.upper > MIN_NEEDLE_WEIGHT {
        components.push(SliderComponent::new(
            1.0 - NEEDLE_SPREAD,
            1.0,
            1.0,
            tails.upper,
        ));
    }
    components
}

/// Errors of one candidate mixture.
#[derive(Debug, Clone, Copy)]
struct Score {
    value: f64,
    worst_quartile: f64,
}

struct Objective<'a> {
    target: InternalQuantiles,
    question: &'a ContinuousQuestion,
    tail_weight: f64,
}

impl Objective<'_> {
    fn dataset(&self, components: &[SliderComponent]) -> Dataset {
        bin_weights_from_sliders(
            components,
            self.question.open_lower_bound,
            self.question.open_upper_bound,
            self.question.bin_count(),
        )
    }

    fn score(&self, tails: TailWeights) -> Score {
        let dataset = self.dataset(&mixture(&self.target, tails));
        let cdf = dataset.absolute_cdf();
        let at = |p: f64| percentile_location(&cdf, dataset.lower_tail, p);

        let errors = [
            at(0.25) - self.target.q1,
            at(0.5) - self.target.median,
            at(0.75) - self.target.q3,
        ];
        let mut value: f64 = errors.iter().map(|e| e * e).sum();
        if self.question.open_lower_bound {
            value += self.tail_weight * (dataset.lower_tail - self.target.below_lower).powi(2);
        }
        if self.question.open_upper_bound {
            value += self.tail_weight * (dataset.upper_tail - self.target.above_upper).powi(2);
        }
        Score {
            value,
            worst_quartile: errors.iter().fold(0.0, |acc, e| acc.max(e.abs())),
        }
    }
}

/// Fit slider components to a quantile table.
pub fn fit_slider_to_quantiles(
    quantiles: &QuantileSet,
    question: &ContinuousQuestion,
    config: &FitConfig,
) -> SliderFit {
    let target = InternalQuantiles::from_set(quantiles, question);
    let objective = Objective {
        target,
        question,
        tail_weight: config.tail_weight.max(0.0),
    };

    // Only bounds that are open and asked for a tail get a needle.
    let dims: Vec<usize> = [
        question.open_lower_bound && target.below_lower > 0.0,
        question.open_upper_bound && target.above_upper > 0.0,
    ]
    .iter()
    .enumerate()
    .filter_map(|(dim, &searched)| searched.then_some(dim))
    .collect();

    let mut tails = TailWeights::NONE;
    let start = objective.score(tails);
    let allowed = start.worst_quartile.max(QUARTILE_SLACK);
    let mut best = start.value;
    let mut step = config.initial_step;
    let mut iterations = 0;

    while !dims.is_empty()
        && iterations < config.max_iterations
        && step > config.tolerance
        && best > EXACT_FIT
    {
        iterations += 1;
        let mut improved = false;

        for &dim in &dims {
            for direction in [1.0, -1.0] {
                let weight = (tails.get(dim) + direction * step).clamp(0.0, MAX_TAIL_WEIGHT);
                let candidate = tails.with(dim, weight);
                if candidate == tails {
                    continue;
                }
                let score = objective.score(candidate);
                if score.worst_quartile <= allowed && score.value < best {
                    tails = candidate;
                    best = score.value;
                    improved = true;
                }
            }
        }

        if !improved {
            step /= 2.0;
        }
    }

    let converged = dims.is_empty() || step <= config.tolerance || best <= EXACT_FIT;
    let components = mixture(&target, tails);
    log::debug!(
        "slider fit: residual={best:.3e} iterations={iterations} converged={converged} \
         tail_weights={tails:?} main={:?}",
        components[0]
    );

    SliderFit {
        components,
        residual: best,
        iterations,
        converged,
    }
}
