//! Distribution engine — slider/quantile forecasts to discretized PMF/CDF and back.
//!
//! All functions are pure and synchronous, and none of them fails on numeric
//! input: malformed handles, weights and CDFs are sanitized instead.
//!
//! - `bins`: slider mixture → `Dataset`
//! - `quantile_cdf`: quantile table → `Dataset`
//! - `quartiles`: CDF → interpolated percentile locations
//! - `convert` / `fit`: switching between the two input modes
//! - `summary`: quartiles and mean in internal and nominal units

pub mod bins;
pub mod convert;
pub mod fit;
pub mod quantile_cdf;
pub mod quartiles;
pub mod summary;

pub use bins::bin_weights_from_sliders;
pub use convert::{
    get_quantiles_distribution_from_slider, get_slider_distribution_from_quantiles,
    quantiles_from_dataset,
};
pub use fit::{fit_slider_to_quantiles, SliderFit};
pub use quantile_cdf::{dataset_from_quantiles, InternalQuantiles};
pub use quartiles::{compute_quartiles_from_cdf, percentile_location, Quartiles};
pub use summary::{summarize, DistributionSummary, NominalSummary};
