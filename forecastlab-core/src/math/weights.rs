//! Mixture weight normalization.

/// Clean a single mixture weight: negative and non-finite weights count as zero.
pub fn sanitize_weight(weight: f64) -> f64 {
    if weight.is_finite() && weight > 0.0 {
        weight
    } else {
        0.0
    }
}

/// Normalize mixture weights so they sum to 1.
///
/// - Empty input returns an empty vector.
/// - Negative and non-finite entries count as zero.
/// - If nothing positive is left (e.g. `[0, 0, 0]`), the result is uniform
///   (`1/len` each) instead of dividing by zero.
pub fn normalize_weights(weights: &[f64]) -> Vec<f64> {
    if weights.is_empty() {
        return Vec::new();
    }

    let cleaned: Vec<f64> = weights.iter().map(|&w| sanitize_weight(w)).collect();

    // Divide by the max first so huge weights cannot overflow the sum.
    let max = cleaned.iter().copied().fold(0.0_f64, f64::max);
    if max <= 0.0 {
        let uniform = 1.0 / weights.len() as f64;
        return vec![uniform; weights.len()];
    }

    let scaled: Vec<f64> = cleaned.iter().map(|w| w / max).collect();
    let total: f64 = scaled.iter().sum();
    scaled.iter().map(|w| w / total).collect()
}
