//! Dataset — the engine's discretized output.

use serde::{Deserialize, Serialize};

/// Below this inbound mass the PMF cannot be renormalized meaningfully.
const MIN_INBOUND_MASS: f64 = 1e-12;

/// Discretized distribution over `N` inbound bins.
///
/// - Bin `i` covers `[i/N, (i+1)/N]` of the internal axis.
/// - `pmf` is normalized over the inbound bins (sums to 1).
/// - `cdf[i] = pmf[0] + ... + pmf[i]`, the CDF at location `(i+1)/N`.
/// - `lower_tail` / `upper_tail` hold the share of the whole distribution that
///   left the axis through an open bound. Closed bounds fold that mass into
///   the edge bin instead, so their tail is always 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub pmf: Vec<f64>,
    pub cdf: Vec<f64>,
    pub lower_tail: f64,
    pub upper_tail: f64,
    pub open_lower_bound: bool,
    pub open_upper_bound: bool,
}

impl Dataset {
    /// Uniform distribution over `bin_count` bins, no tails.
    pub fn uniform(bin_count: usize, open_lower: bool, open_upper: bool) -> Self {
        let n = bin_count.max(1);
        Self::from_pmf(vec![1.0 / n as f64; n], 0.0, 0.0, open_lower, open_upper)
    }

    /// Build from raw (unnormalized) inbound bin masses and tail masses.
    ///
    /// Tails are expressed as shares of the total mass; the inbound vector is
    /// renormalized to sum to 1. With no usable inbound mass the inbound part
    /// falls back to uniform.
    pub fn from_mass(
        mass: Vec<f64>,
        lower_mass: f64,
        upper_mass: f64,
        open_lower: bool,
        open_upper: bool,
    ) -> Self {
        let n = mass.len().max(1);
        let mass: Vec<f64> = mass
            .into_iter()
            .map(|m| if m.is_finite() { m.max(0.0) } else { 0.0 })
            .collect();
        let lower_mass = if lower_mass.is_finite() { lower_mass.max(0.0) } else { 0.0 };
        let upper_mass = if upper_mass.is_finite() { upper_mass.max(0.0) } else { 0.0 };

        let inbound: f64 = mass.iter().sum();
        let total = inbound + lower_mass + upper_mass;
        if total <= 0.0 {
            log::debug!("distribution has no mass; falling back to uniform over {n} bins");
            return Self::uniform(n, open_lower, open_upper);
        }

        let pmf = if inbound > MIN_INBOUND_MASS {
            mass.iter().map(|m| m / inbound).collect()
        } else {
            log::debug!("distribution has no inbound mass; using a uniform inbound PMF");
            vec![1.0 / n as f64; n]
        };

        Self::from_pmf(
            pmf,
            lower_mass / total,
            upper_mass / total,
            open_lower,
            open_upper,
        )
    }

    fn from_pmf(
        pmf: Vec<f64>,
        lower_tail: f64,
        upper_tail: f64,
        open_lower: bool,
        open_upper: bool,
    ) -> Self {
        let mut running = 0.0;
        let cdf = pmf
            .iter()
            .map(|p| {
                running += p;
                running.min(1.0)
            })
            .collect();
        Self {
            pmf,
            cdf,
            lower_tail,
            upper_tail,
            open_lower_bound: open_lower,
            open_upper_bound: open_upper,
        }
    }

    /// Number of inbound bins `N`.
    pub fn bin_count(&self) -> usize {
        self.pmf.len()
    }

    /// Internal-axis location of `cdf[i]` (the right edge of bin `i`).
    pub fn bin_location(&self, i: usize) -> f64 {
        (i + 1) as f64 / self.bin_count() as f64
    }

    /// Internal-axis midpoint of bin `i`.
    pub fn bin_center(&self, i: usize) -> f64 {
        (i as f64 + 0.5) / self.bin_count() as f64
    }

    /// Share of the whole distribution that lies on the axis.
    pub fn inbound_mass(&self) -> f64 {
        (1.0 - self.lower_tail - self.upper_tail).max(0.0)
    }

    /// PMF as shares of the whole distribution (tails excluded from the bins).
    pub fn absolute_pmf(&self) -> Vec<f64> {
        let inbound = self.inbound_mass();
        self.pmf.iter().map(|p| p * inbound).collect()
    }

    /// CDF of the whole distribution at each bin's right edge:
    /// `lower_tail + inbound_mass * cdf[i]`. Its last value is `1 - upper_tail`.
    pub fn absolute_cdf(&self) -> Vec<f64> {
        let inbound = self.inbound_mass();
        self.cdf
            .iter()
            .map(|c| (self.lower_tail + inbound * c).min(1.0))
            .collect()
    }
}
