//! Domain types for continuous forecasts.

pub mod dataset;
pub mod forecast;
pub mod quantile;
pub mod question;
pub mod scaling;
pub mod slider;

pub use dataset::Dataset;
pub use forecast::ContinuousForecast;
pub use quantile::{Quantile, QuantileError, QuantileKind, QuantileSet};
pub use question::{ContinuousQuestion, DEFAULT_INBOUND_OUTCOME_COUNT, MIN_INBOUND_OUTCOME_COUNT};
pub use scaling::Scaling;
pub use slider::SliderComponent;
