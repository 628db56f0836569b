//! Switching between slider and quantile input without losing the forecast.

use crate::config::FitConfig;
use crate::domain::{ContinuousQuestion, Dataset, QuantileSet, Scaling, SliderComponent};
use crate::engine::bins::bin_weights_from_sliders;
use crate::engine::fit::{fit_slider_to_quantiles, SliderFit};
use crate::engine::quartiles::percentile_location;

/// Quantile table of a slider forecast.
///
/// Quartiles come from the absolute CDF (open-bound tails included) and are
/// mapped to the question's units; the bound markers carry the tail masses.
pub fn get_quantiles_distribution_from_slider(
    components: &[SliderComponent],
    question: &ContinuousQuestion,
) -> QuantileSet {
    let dataset = bin_weights_from_sliders(
        components,
        question.open_lower_bound,
        question.open_upper_bound,
        question.bin_count(),
    );
    quantiles_from_dataset(&dataset, &question.scaling)
}

/// Quantile table of any dataset.
pub fn quantiles_from_dataset(dataset: &Dataset, scaling: &Scaling) -> QuantileSet {
    let cdf = dataset.absolute_cdf();
    let at = |p: f64| scaling.scale_internal(percentile_location(&cdf, dataset.lower_tail, p));
    QuantileSet {
        below_lower: dataset.lower_tail,
        q1: at(0.25),
        median: at(0.5),
        q3: at(0.75),
        above_upper: dataset.upper_tail,
    }
}

/// Slider components approximating a quantile table.
///
/// Lossy: quartiles come back within [`crate::engine::fit::QUARTILE_SLACK`] of
/// the axis, tails as close as a slider mixture allows.
pub fn get_slider_distribution_from_quantiles(
    quantiles: &QuantileSet,
    question: &ContinuousQuestion,
    config: &FitConfig,
) -> SliderFit {
    fit_slider_to_quantiles(quantiles, question, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slider_to_quantiles_uses_question_units() {
        let question = ContinuousQuestion::new(Scaling::linear(100.0, 200.0));
        let set = get_quantiles_distribution_from_slider(
            &[SliderComponent::new(0.3, 0.5, 0.6, 1.0)],
            &question,
        );
        assert!((set.q1 - 130.0).abs() < 0.5, "q1 {}", set.q1);
        assert!((set.median - 150.0).abs() < 0.5, "median {}", set.median);
        assert!((set.q3 - 160.0).abs() < 0.5, "q3 {}", set.q3);
        assert_eq!(set.below_lower, 0.0);
        assert_eq!(set.above_upper, 0.0);
    }

    #[test]
    fn open_bounds_report_tails() {
        let question = ContinuousQuestion::new(Scaling::linear(0.0, 10.0)).with_bounds(true, true);
        let set = get_quantiles_distribution_from_slider(
            &[SliderComponent::new(0.0, 0.1, 0.9, 1.0)],
            &question,
        );
        assert!((set.below_lower - 0.25).abs() < 1e-9);
        assert!(set.above_upper > 0.0);
    }

    #[test]
    fn table_from_slider_on_the_bound_validates() {
        let question =
            ContinuousQuestion::new(Scaling::linear(0.0, 100.0)).with_bounds(true, false);
        let set = get_quantiles_distribution_from_slider(
            &[SliderComponent::new(0.0, 0.1, 0.4, 1.0)],
            &question,
        );
        assert!((set.below_lower - 0.25).abs() < 1e-9, "below {}", set.below_lower);
        assert_eq!(set.validate(&question), Ok(()));
    }

    #[test]
    fn quantile_round_trip_is_close() {
        let question = ContinuousQuestion::new(Scaling::linear(0.0, 100.0));
        let table = QuantileSet::new(25.0, 40.0, 65.0);
        let fit = get_slider_distribution_from_quantiles(&table, &question, &FitConfig::default());
        let back = get_quantiles_distribution_from_slider(&fit.components, &question);
        assert!((back.q1 - 25.0).abs() < 5.0);
        assert!((back.median - 40.0).abs() < 5.0);
        assert!((back.q3 - 65.0).abs() < 5.0);
    }

    #[test]
    fn log_scaled_open_round_trip_is_close() {
        let scaling = Scaling::logarithmic(1.0, 10_000.0, 0.0);
        let question = ContinuousQuestion::new(scaling).with_bounds(true, true);
        let table = QuantileSet::new(100.0, 300.0, 1_000.0).with_tails(0.05, 0.05);
        let fit = get_slider_distribution_from_quantiles(&table, &question, &FitConfig::default());
        let back = get_quantiles_distribution_from_slider(&fit.components, &question);

        let axis = |v: f64| question.scaling.unscale_to_axis(v);
        assert!((axis(back.q1) - axis(100.0)).abs() < 0.05, "q1 {}", back.q1);
        assert!((axis(back.median) - axis(300.0)).abs() < 0.05, "median {}", back.median);
        assert!((axis(back.q3) - axis(1_000.0)).abs() < 0.05, "q3 {}", back.q3);
        assert!((back.below_lower - 0.05).abs() < 0.02, "below {}", back.below_lower);
        assert!((back.above_upper - 0.05).abs() < 0.02, "above {}", back.above_upper);
    }
}
