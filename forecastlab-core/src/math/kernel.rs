//! Slider kernel — the distribution behind one three-handle slider component.
//!
//! A component is an asymmetric logistic distribution on the unbounded axis:
//! - mode and median at `center`
//! - left half scaled so that `left` is its 25th percentile
//! - right half scaled so that `right` is its 75th percentile
//!
//! Both halves pass through 0.5 at `center`, so the CDF is continuous and the
//! density is unimodal. Mass beyond `[0, 1]` is handled by the caller
//! (folded into the edge bins or kept as an open-bound tail).

/// ln(3): the logistic quantile offset of the 25th/75th percentile.
pub const LN_3: f64 = 1.098_612_288_668_109_8;

/// Smallest scale a kernel half may have. Below this it is a step.
pub const MIN_SCALE: f64 = 1e-12;

/// Numerically stable logistic function `1 / (1 + e^-z)`.
pub fn logistic(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// Asymmetric logistic kernel for a single slider component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderKernel {
    center: f64,
    left_scale: f64,
    right_scale: f64,
}

impl SliderKernel {
    /// Build a kernel from ordered handles (`left <= center <= right`).
    pub fn from_handles(left: f64, center: f64, right: f64) -> Self {
        Self {
            center,
            left_scale: ((center - left) / LN_3).max(MIN_SCALE),
            right_scale: ((right - center) / LN_3).max(MIN_SCALE),
        }
    }

    pub fn center(&self) -> f64 {
        self.center
    }

    pub fn left_scale(&self) -> f64 {
        self.left_scale
    }

    pub fn right_scale(&self) -> f64 {
        self.right_scale
    }

    /// P(X <= x).
    pub fn cdf(&self, x: f64) -> f64 {
        if x < self.center {
            logistic((x - self.center) / self.left_scale)
        } else {
            logistic((x - self.center) / self.right_scale)
        }
    }

    /// Inverse CDF. `p` is clamped into the open interval (0, 1).
    pub fn quantile(&self, p: f64) -> f64 {
        let p = if p.is_nan() { 0.5 } else { p.clamp(1e-15, 1.0 - 1e-15) };
        let logit = (p / (1.0 - p)).ln();
        if p < 0.5 {
            self.center + self.left_scale * logit
        } else {
            self.center + self.right_scale * logit
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::assert_approx;

    #[test]
    fn handles_are_quartiles() {
        let k = SliderKernel::from_handles(0.3, 0.45, 0.7);
        assert_approx(k.cdf(0.3), 0.25, 1e-12);
        assert_approx(k.cdf(0.45), 0.5, 1e-12);
        assert_approx(k.cdf(0.7), 0.75, 1e-12);
    }

    #[test]
    fn quantile_inverts_cdf() {
        let k = SliderKernel::from_handles(0.2, 0.5, 0.6);
        for p in [0.01, 0.25, 0.4, 0.5, 0.75, 0.99] {
            assert_approx(k.cdf(k.quantile(p)), p, 1e-9);
        }
    }

    #[test]
    fn collapsed_half_is_a_step() {
        let k = SliderKernel::from_handles(0.5, 0.5, 0.6);
        assert!(k.cdf(0.499_999) < 1e-12);
        assert_approx(k.cdf(0.5), 0.5, 1e-12);
    }

    #[test]
    fn logistic_is_stable_at_extremes() {
        assert_eq!(logistic(-1e6), 0.0);
        assert_eq!(logistic(1e6), 1.0);
        assert_approx(logistic(0.0), 0.5, 1e-15);
    }
}
