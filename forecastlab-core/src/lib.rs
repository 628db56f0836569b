//! Forecastlab Core — continuous-forecast distribution engine.
//!
//! Turns a forecaster's input into the discretized distribution that gets
//! charted and submitted:
//! - Domain types (slider components, quantile tables, question scaling, datasets)
//! - Slider mixture → binned PMF/CDF with open/closed bound handling
//! - Quantile table → binned PMF/CDF
//! - Interpolated quartiles, summary statistics
//! - Slider ⇄ quantile conversion (the reverse direction is a bounded fit)
//! - Submission payloads: standardized `continuousCdf`, validation, fingerprint

pub mod config;
pub mod domain;
pub mod engine;
pub mod math;
pub mod submission;

pub use config::{ConfigError, EngineConfig, FitConfig, StandardizeConfig};
pub use domain::{
    ContinuousForecast, ContinuousQuestion, Dataset, QuantileSet, Scaling, SliderComponent,
};
pub use math::normalize_weights;
