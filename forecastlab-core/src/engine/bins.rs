//! Slider mixture → binned PMF/CDF.

use crate::domain::{Dataset, SliderComponent, MIN_INBOUND_OUTCOME_COUNT};
use crate::math::{bin_edges, normalize_weights};

/// Discretize a slider mixture over `bin_count` bins of `[0, 1]`.
///
/// Each sanitized component contributes its kernel's mass per bin, weighted by
/// its normalized weight. Mass that falls below 0 (above 1) is folded into the
/// first (last) bin when that bound is closed, and kept as a tail when it is
/// open; the inbound PMF is then renormalized to sum to 1.
///
/// Edge cases:
/// - no components → uniform PMF
/// - a collapsed component (`left == center == right`) puts its whole weight
///   into the bin containing `center`
/// - `bin_count` below 2 is raised to 2
pub fn bin_weights_from_sliders(
    components: &[SliderComponent],
    open_lower: bool,
    open_upper: bool,
    bin_count: usize,
) -> Dataset {
    let n = bin_count.max(MIN_INBOUND_OUTCOME_COUNT);
    if components.is_empty() {
        return Dataset::uniform(n, open_lower, open_upper);
    }

    let sanitized: Vec<SliderComponent> =
        components.iter().map(SliderComponent::sanitized).collect();
    let raw_weights: Vec<f64> = sanitized.iter().map(|c| c.weight).collect();
    let weights = normalize_weights(&raw_weights);
    let edges = bin_edges(n);

    let mut mass = vec![0.0; n];
    let mut below = 0.0;
    let mut above = 0.0;

    for (component, &weight) in sanitized.iter().zip(&weights) {
        if weight <= 0.0 {
            continue;
        }

        if component.is_collapsed() {
            let bin = ((component.center * n as f64).floor() as usize).min(n - 1);
            mass[bin] += weight;
            continue;
        }

        let kernel = component.kernel();
        let mut prev = kernel.cdf(edges[0]);
        below += weight * prev;
        for (i, &edge) in edges.iter().enumerate().skip(1) {
            let next = kernel.cdf(edge);
            mass[i - 1] += weight * (next - prev).max(0.0);
            prev = next;
        }
        above += weight * (1.0 - prev);
    }

    if !open_lower {
        mass[0] += below;
        below = 0.0;
    }
    if !open_upper {
        mass[n - 1] += above;
        above = 0.0;
    }

    Dataset::from_mass(mass, below, above, open_lower, open_upper)
}
