//! ContinuousForecast — the two input modes as one tagged type.

use serde::{Deserialize, Serialize};

use super::dataset::Dataset;
use super::quantile::QuantileSet;
use super::question::ContinuousQuestion;
use super::slider::SliderComponent;
use crate::config::FitConfig;
use crate::engine::{
    bin_weights_from_sliders, dataset_from_quantiles, get_quantiles_distribution_from_slider,
    get_slider_distribution_from_quantiles, SliderFit,
};

/// A continuous forecast as entered by the user.
///
/// Every engine entry point matches on this exhaustively, so a new input mode
/// cannot be silently ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContinuousForecast {
    /// Mixture of three-handle slider components.
    Slider { components: Vec<SliderComponent> },
    /// Typed quantile table.
    Quantile(QuantileSet),
}

impl ContinuousForecast {
    /// Short name of the input mode ("slider" / "quantile").
    pub fn mode_name(&self) -> &'static str {
        match self {
            ContinuousForecast::Slider { .. } => "slider",
            ContinuousForecast::Quantile(_) => "quantile",
        }
    }

    /// Discretize the forecast over the question's bins.
    pub fn to_dataset(&self, question: &ContinuousQuestion) -> Dataset {
        match self {
            ContinuousForecast::Slider { components } => bin_weights_from_sliders(
                components,
                question.open_lower_bound,
                question.open_upper_bound,
                question.bin_count(),
            ),
            ContinuousForecast::Quantile(quantiles) => dataset_from_quantiles(quantiles, question),
        }
    }

    /// Quantile view of the forecast.
    pub fn to_quantiles(&self, question: &ContinuousQuestion) -> QuantileSet {
        match self {
            ContinuousForecast::Slider { components } => {
                get_quantiles_distribution_from_slider(components, question)
            }
            ContinuousForecast::Quantile(quantiles) => *quantiles,
        }
    }

    /// Slider view of the forecast. Lossy for quantile input.
    pub fn to_sliders(&self, question: &ContinuousQuestion, fit: &FitConfig) -> SliderFit {
        match self {
            ContinuousForecast::Slider { components } => SliderFit::exact(components.clone()),
            ContinuousForecast::Quantile(quantiles) => {
                get_slider_distribution_from_quantiles(quantiles, question, fit)
            }
        }
    }

    /// Switch to quantile input without losing the forecast.
    pub fn into_quantile_mode(self, question: &ContinuousQuestion) -> Self {
        ContinuousForecast::Quantile(self.to_quantiles(question))
    }

    /// Switch to slider input. Quantile tables are approximated.
    pub fn into_slider_mode(self, question: &ContinuousQuestion, fit: &FitConfig) -> Self {
        match self {
            ContinuousForecast::Slider { .. } => self,
            ContinuousForecast::Quantile(_) => ContinuousForecast::Slider {
                components: self.to_sliders(question, fit).components,
            },
        }
    }
}
