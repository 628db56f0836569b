//! Integration tests for the distribution engine.
//!
//! Tests:
//! 1. Symmetric single component — symmetric PMF, median at the center
//! 2. Closed lower bound folds the left tail into the first bin
//! 3. Reference scenario: 0.4/0.5/0.6 over 100 closed bins
//! 4. Bimodal mixture — two local maxima, median between them
//! 5. Forecast dispatch — slider and quantile input through the same entry points
//! 6. Log-scaled question — nominal summary follows the scaling

use forecastlab_core::config::FitConfig;
use forecastlab_core::domain::{
    ContinuousForecast, ContinuousQuestion, QuantileSet, Scaling, SliderComponent,
};
use forecastlab_core::engine::{bin_weights_from_sliders, compute_quartiles_from_cdf, summarize};

// ──────────────────────────────────────────────
// Helpers
// ──────────────────────────────────────────────

fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "actual={actual}, expected={expected}, epsilon={epsilon}"
    );
}

fn argmax(values: &[f64]) -> usize {
    values
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(i, _)| i)
        .unwrap()
}

// ──────────────────────────────────────────────
// Binning
// ──────────────────────────────────────────────

#[test]
fn symmetric_component_gives_symmetric_pmf() {
    let c = SliderComponent::new(0.4, 0.5, 0.6, 1.0);
    let d = bin_weights_from_sliders(&[c], false, false, 100);

    for i in 0..50 {
        assert_approx(d.pmf[i], d.pmf[99 - i], 1e-9);
    }
    let q = compute_quartiles_from_cdf(&d.cdf);
    assert_approx(q.median, 0.5, 1e-6);
}

#[test]
fn closed_lower_bound_folds_tail_into_first_bin() {
    let c = SliderComponent::new(0.0, 0.05, 0.1, 1.0);
    let d = bin_weights_from_sliders(&[c], false, false, 100);
    assert!(d.pmf[0] > 0.0);
    // The folded quarter of the kernel makes the first bin the heaviest.
    assert_eq!(argmax(&d.pmf), 0);
    assert_eq!(d.lower_tail, 0.0);

    let open = bin_weights_from_sliders(&[c], true, false, 100);
    assert!(open.pmf[0] < d.pmf[0]);
    assert!(open.lower_tail > 0.2);
}

#[test]
fn reference_scenario_single_component() {
    let c = SliderComponent::new(0.4, 0.5, 0.6, 1.0);
    let d = bin_weights_from_sliders(&[c], false, false, 100);

    assert_eq!(d.pmf.len(), 100);
    assert!(d.pmf.iter().all(|p| *p >= 0.0));
    assert_approx(d.pmf.iter().sum::<f64>(), 1.0, 1e-6);

    let q = compute_quartiles_from_cdf(&d.cdf);
    assert!((0.48..=0.52).contains(&q.median), "median {}", q.median);
    assert!((q.lower25 - 0.4).abs() < 0.01, "q1 {}", q.lower25);
    assert!((q.upper75 - 0.6).abs() < 0.01, "q3 {}", q.upper75);
}

#[test]
fn bimodal_mixture_has_two_peaks() {
    let components = [
        SliderComponent::new(0.28, 0.3, 0.32, 0.5),
        SliderComponent::new(0.68, 0.7, 0.72, 0.5),
    ];
    let d = bin_weights_from_sliders(&components, false, false, 100);

    let left_peak = argmax(&d.pmf[..50]);
    let right_peak = 50 + argmax(&d.pmf[50..]);
    assert!((28..=31).contains(&left_peak), "left peak at {left_peak}");
    assert!((68..=71).contains(&right_peak), "right peak at {right_peak}");
    assert!(d.pmf[50] < d.pmf[left_peak] / 10.0);

    let q = compute_quartiles_from_cdf(&d.cdf);
    assert!(q.median > 0.3 && q.median < 0.7, "median {}", q.median);
}

#[test]
fn weights_shift_the_median() {
    let heavy_left = [
        SliderComponent::new(0.18, 0.2, 0.22, 3.0),
        SliderComponent::new(0.78, 0.8, 0.82, 1.0),
    ];
    let d = bin_weights_from_sliders(&heavy_left, false, false, 100);
    let q = compute_quartiles_from_cdf(&d.cdf);
    assert!(q.median < 0.25, "median {}", q.median);
}

// ──────────────────────────────────────────────
// Dispatch
// ──────────────────────────────────────────────

#[test]
fn slider_and_quantile_input_share_entry_points() {
    let question = ContinuousQuestion::new(Scaling::linear(0.0, 100.0)).with_bin_count(100);
    let slider = ContinuousForecast::Slider {
        components: vec![SliderComponent::new(0.3, 0.45, 0.7, 1.0)],
    };
    let quantile = ContinuousForecast::Quantile(QuantileSet::new(30.0, 45.0, 70.0));

    let from_slider = summarize(&slider.to_dataset(&question), &question.scaling);
    let from_table = summarize(&quantile.to_dataset(&question), &question.scaling);

    assert!((from_slider.nominal.median - 45.0).abs() < 1.0);
    assert!((from_table.nominal.median - 45.0).abs() < 1.0);
    assert!((from_slider.nominal.lower25 - from_table.nominal.lower25).abs() < 1.0);
    assert!((from_slider.nominal.upper75 - from_table.nominal.upper75).abs() < 1.0);
}

#[test]
fn mode_switch_keeps_the_forecast() {
    let question = ContinuousQuestion::new(Scaling::linear(0.0, 100.0));
    let original = ContinuousForecast::Slider {
        components: vec![SliderComponent::new(0.2, 0.35, 0.6, 1.0)],
    };

    let as_table = original.clone().into_quantile_mode(&question);
    assert_eq!(as_table.mode_name(), "quantile");
    let back = as_table.into_slider_mode(&question, &FitConfig::default());
    assert_eq!(back.mode_name(), "slider");

    let before = summarize(&original.to_dataset(&question), &question.scaling);
    let after = summarize(&back.to_dataset(&question), &question.scaling);
    assert!((before.nominal.median - after.nominal.median).abs() < 5.0);
    assert!((before.nominal.lower25 - after.nominal.lower25).abs() < 5.0);
    assert!((before.nominal.upper75 - after.nominal.upper75).abs() < 5.0);
}

#[test]
fn log_question_summary_is_in_question_units() {
    let question = ContinuousQuestion::new(Scaling::logarithmic(1.0, 1000.0, 0.0));
    let forecast = ContinuousForecast::Slider {
        components: vec![SliderComponent::new(0.4, 0.5, 0.6, 1.0)],
    };
    let s = summarize(&forecast.to_dataset(&question), &question.scaling);

    // Halfway along a 1..1000 log axis is ~31.6.
    assert!((s.nominal.median - 1000f64.sqrt()).abs() < 1.0, "median {}", s.nominal.median);
    assert!(s.nominal.lower25 < s.nominal.median && s.nominal.median < s.nominal.upper75);
}
