//! Interpolation helpers over sampled CDFs.

/// The `n + 1` evenly spaced bin edges of `[0, 1]`.
pub fn bin_edges(n: usize) -> Vec<f64> {
    (0..=n).map(|i| i as f64 / n as f64).collect()
}

/// Location `x` on the segment `(x0, y0)-(x1, y1)` where the line reaches `y`.
///
/// A flat segment resolves to its midpoint.
pub fn inverse_lerp(x0: f64, y0: f64, x1: f64, y1: f64, y: f64) -> f64 {
    let dy = y1 - y0;
    if dy.abs() < f64::EPSILON {
        return (x0 + x1) / 2.0;
    }
    let t = ((y - y0) / dy).clamp(0.0, 1.0);
    x0 + t * (x1 - x0)
}

/// Evaluate the piecewise-linear curve through `points` at `x`.
///
/// `points` must be sorted by `x` (ties allowed: a vertical step takes the
/// value of the last tied point). Outside the covered range the curve is
/// flat at the first/last value. An empty slice evaluates to 0.
pub fn piecewise_linear(points: &[(f64, f64)], x: f64) -> f64 {
    let Some(&(first_x, first_y)) = points.first() else {
        return 0.0;
    };
    if x < first_x {
        return first_y;
    }

    // Last point with px <= x.
    let j = points.iter().rposition(|&(px, _)| px <= x).unwrap_or(0);
    if j + 1 >= points.len() {
        return points[j].1;
    }

    let (x0, y0) = points[j];
    let (x1, y1) = points[j + 1];
    // x0 <= x < x1, so the segment has positive width.
    y0 + (x - x0) / (x1 - x0) * (y1 - y0)
}
