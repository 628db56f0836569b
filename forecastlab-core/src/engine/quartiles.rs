//! Percentile lookup on a binned CDF.
//!
//! `cdf[i]` sits at location `(i + 1) / N`; location 0 carries an anchor value
//! (0 for a plain inbound CDF, the lower tail for an absolute one). Between
//! these points the CDF is treated as piecewise linear, so crossings are
//! resolved to sub-bin precision.

use serde::{Deserialize, Serialize};

use crate::math::{inverse_lerp, PROB_EPSILON};

/// Interpolated 25th/50th/75th percentile locations on the internal axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quartiles {
    pub lower25: f64,
    pub median: f64,
    pub upper75: f64,
}

/// Quartiles of an inbound CDF (anchored at 0).
pub fn compute_quartiles_from_cdf(cdf: &[f64]) -> Quartiles {
    Quartiles {
        lower25: percentile_location(cdf, 0.0, 0.25),
        median: percentile_location(cdf, 0.0, 0.5),
        upper75: percentile_location(cdf, 0.0, 0.75),
    }
}

/// Location where the CDF first reaches `p`.
///
/// - The two points straddling the crossing are linearly interpolated.
/// - A plateau sitting exactly at `p` (within [`PROB_EPSILON`]) resolves to
///   the plateau's midpoint, not its start.
/// - A CDF that never reaches `p` resolves to the last bin's position (1.0).
/// - If the anchor already exceeds `p`, the answer is 0.
/// - An empty CDF is treated as uniform: the answer is `p` itself.
pub fn percentile_location(cdf: &[f64], start: f64, p: f64) -> f64 {
    let n = cdf.len();
    if n == 0 {
        return if p.is_nan() { 0.5 } else { p.clamp(0.0, 1.0) };
    }

    let point = |k: usize| -> (f64, f64) {
        if k == 0 {
            (0.0, finite_or_zero(start))
        } else {
            (k as f64 / n as f64, finite_or_zero(cdf[k - 1]))
        }
    };

    let Some(k) = (0..=n).find(|&k| point(k).1 >= p - PROB_EPSILON) else {
        return 1.0;
    };

    let (x, y) = point(k);
    if (y - p).abs() <= PROB_EPSILON {
        let mut end = k;
        while end < n && (point(end + 1).1 - p).abs() <= PROB_EPSILON {
            end += 1;
        }
        return (x + point(end).0) / 2.0;
    }
    if k == 0 {
        return 0.0;
    }

    let (x0, y0) = point(k - 1);
    inverse_lerp(x0, y0, x, y, p)
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}
