//! Scaling — mapping between the internal `[0, 1]` axis and a question's units.
//!
//! Linear questions map `x` to `range_min + x * (range_max - range_min)`.
//! Log-scaled questions carry a `zero_point` outside the range; with
//! `r = (range_max - zero_point) / (range_min - zero_point)` the mapping is
//! `range_min + (range_max - range_min) * (r^x - 1) / (r - 1)`.

use serde::{Deserialize, Serialize};

/// Per-question scaling metadata. Read-only to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scaling {
    pub range_min: f64,
    pub range_max: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zero_point: Option<f64>,
}

impl Scaling {
    pub fn linear(range_min: f64, range_max: f64) -> Self {
        Self {
            range_min,
            range_max,
            zero_point: None,
        }
    }

    pub fn logarithmic(range_min: f64, range_max: f64, zero_point: f64) -> Self {
        Self {
            range_min,
            range_max,
            zero_point: Some(zero_point),
        }
    }

    /// `range_max - range_min`.
    pub fn width(&self) -> f64 {
        self.range_max - self.range_min
    }

    /// True when the range cannot be mapped (non-finite or empty).
    pub fn is_degenerate(&self) -> bool {
        !(self.range_min.is_finite() && self.range_max.is_finite() && self.width() > 0.0)
    }

    /// Growth ratio of a usable log scaling, `None` for linear behavior.
    ///
    /// A zero point inside the range, or one so far away that the ratio is
    /// indistinguishable from 1, falls back to linear.
    pub fn deriv_ratio(&self) -> Option<f64> {
        let zp = self.zero_point.filter(|z| z.is_finite())?;
        if self.is_degenerate() {
            return None;
        }
        let ratio = (self.range_max - zp) / (self.range_min - zp);
        if ratio.is_finite() && ratio > 0.0 && (ratio - 1.0).abs() > 1e-12 {
            Some(ratio)
        } else {
            None
        }
    }

    /// Internal location `x` to nominal value.
    pub fn scale_internal(&self, x: f64) -> f64 {
        if self.is_degenerate() {
            return self.range_min;
        }
        match self.deriv_ratio() {
            Some(r) => self.range_min + self.width() * (r.powf(x) - 1.0) / (r - 1.0),
            None => self.range_min + x * self.width(),
        }
    }

    /// Nominal value to internal location. Values outside the range map
    /// outside `[0, 1]`; callers clamp when they need the axis.
    pub fn unscale_nominal(&self, value: f64) -> f64 {
        if self.is_degenerate() || !value.is_finite() {
            return 0.0;
        }
        match self.deriv_ratio() {
            Some(r) => {
                let arg = (value - self.range_min) * (r - 1.0) / self.width() + 1.0;
                if arg <= 0.0 {
                    // Beyond the zero point: as far outside the axis as it gets.
                    return if r > 1.0 { f64::NEG_INFINITY } else { f64::INFINITY };
                }
                arg.ln() / r.ln()
            }
            None => (value - self.range_min) / self.width(),
        }
    }

    /// [`Self::unscale_nominal`] clamped to the axis.
    pub fn unscale_to_axis(&self, value: f64) -> f64 {
        let x = self.unscale_nominal(value);
        if x.is_nan() {
            0.0
        } else {
            x.clamp(0.0, 1.0)
        }
    }
}
