//! Numeric primitives shared by the engine.
//!
//! Everything here is a pure function of its arguments: no allocation beyond
//! the returned vectors, no logging, no panics on non-finite input.

pub mod interp;
pub mod kernel;
pub mod weights;

pub use interp::{bin_edges, inverse_lerp, piecewise_linear};
pub use kernel::{logistic, SliderKernel};
pub use weights::{normalize_weights, sanitize_weight};

/// Tolerance for probability comparisons (plateau detection, CDF drift).
pub const PROB_EPSILON: f64 = 1e-9;

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}
