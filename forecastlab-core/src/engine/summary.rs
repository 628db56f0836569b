//! Summary statistics of a dataset (chart readouts).

use serde::{Deserialize, Serialize};

use crate::domain::{Dataset, Scaling};
use crate::engine::quartiles::{percentile_location, Quartiles};

/// Quartiles and mean in the question's units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NominalSummary {
    pub lower25: f64,
    pub median: f64,
    pub upper75: f64,
    pub mean: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributionSummary {
    /// Quartiles of the whole distribution (open-bound tails included), internal axis.
    pub quartiles: Quartiles,
    /// Mean of the inbound PMF at bin centers, internal axis.
    pub mean: f64,
    pub lower_tail: f64,
    pub upper_tail: f64,
    pub nominal: NominalSummary,
}

pub fn summarize(dataset: &Dataset, scaling: &Scaling) -> DistributionSummary {
    let cdf = dataset.absolute_cdf();
    let at = |p: f64| percentile_location(&cdf, dataset.lower_tail, p);
    let quartiles = Quartiles {
        lower25: at(0.25),
        median: at(0.5),
        upper75: at(0.75),
    };

    let mut mean = 0.0;
    let mut nominal_mean = 0.0;
    for (i, p) in dataset.pmf.iter().enumerate() {
        let center = dataset.bin_center(i);
        mean += p * center;
        nominal_mean += p * scaling.scale_internal(center);
    }

    DistributionSummary {
        quartiles,
        mean,
        lower_tail: dataset.lower_tail,
        upper_tail: dataset.upper_tail,
        nominal: NominalSummary {
            lower25: scaling.scale_internal(quartiles.lower25),
            median: scaling.scale_internal(quartiles.median),
            upper75: scaling.scale_internal(quartiles.upper75),
            mean: nominal_mean,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::assert_approx;

    #[test]
    fn uniform_summary() {
        let d = Dataset::uniform(10, false, false);
        let s = summarize(&d, &Scaling::linear(0.0, 50.0));
        assert_approx(s.quartiles.median, 0.5, 1e-9);
        assert_approx(s.mean, 0.5, 1e-9);
        assert_approx(s.nominal.median, 25.0, 1e-6);
        assert_approx(s.nominal.mean, 25.0, 1e-6);
        assert_approx(s.nominal.lower25, 12.5, 1e-6);
    }

    #[test]
    fn tails_shift_quartiles() {
        // 20% below the axis: the 25th percentile is only 5 points into the axis.
        let d = Dataset::from_mass(vec![0.2; 4], 0.2, 0.0, true, false);
        let s = summarize(&d, &Scaling::linear(0.0, 1.0));
        assert_approx(s.lower_tail, 0.2, 1e-12);
        assert_approx(s.quartiles.lower25, 0.05 / 0.8, 1e-9);
    }

    #[test]
    fn log_scaling_mean_is_nominal() {
        let d = Dataset::uniform(2, false, false);
        let scaling = Scaling::logarithmic(1.0, 100.0, 0.0);
        let s = summarize(&d, &scaling);
        let expected = 0.5 * scaling.scale_internal(0.25) + 0.5 * scaling.scale_internal(0.75);
        assert_approx(s.nominal.mean, expected, 1e-9);
    }
}
