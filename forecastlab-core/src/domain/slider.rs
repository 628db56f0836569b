//! SliderComponent — one mixture term of a slider-drawn forecast.

use serde::{Deserialize, Serialize};

use crate::math::{sanitize_weight, SliderKernel};

/// One three-handle slider component on the normalized `[0, 1]` axis.
///
/// `left` and `right` are the component's 25th and 75th percentiles, `center`
/// its median. Call sites do not always keep `left <= center <= right`; use
/// [`SliderComponent::sanitized`] before evaluating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderComponent {
    pub left: f64,
    pub center: f64,
    pub right: f64,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

/// Clamp into `[0, 1]`, replacing non-finite values with `fallback`.
fn unit_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        fallback
    }
}

impl SliderComponent {
    pub fn new(left: f64, center: f64, right: f64, weight: f64) -> Self {
        Self {
            left,
            center,
            right,
            weight,
        }
    }

    /// Copy with every handle finite, inside `[0, 1]` and in order, and a
    /// non-negative finite weight.
    pub fn sanitized(&self) -> Self {
        let mut handles = [
            unit_or(self.left, 0.0),
            unit_or(self.center, 0.5),
            unit_or(self.right, 1.0),
        ];
        handles.sort_by(f64::total_cmp);
        Self {
            left: handles[0],
            center: handles[1],
            right: handles[2],
            weight: sanitize_weight(self.weight),
        }
    }

    /// Distance between the outer handles.
    pub fn spread(&self) -> f64 {
        self.right - self.left
    }

    /// True when all three handles sit on one point.
    pub fn is_collapsed(&self) -> bool {
        self.spread() <= f64::EPSILON
    }

    /// Kernel for this component. Sanitizes first.
    pub fn kernel(&self) -> SliderKernel {
        let c = self.sanitized();
        SliderKernel::from_handles(c.left, c.center, c.right)
    }
}

impl Default for SliderComponent {
    fn default() -> Self {
        Self::new(0.4, 0.5, 0.6, 1.0)
    }
}
