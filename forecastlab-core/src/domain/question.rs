//! ContinuousQuestion — the read-only question metadata the engine consumes.

use serde::{Deserialize, Serialize};

use super::scaling::Scaling;

/// Default number of inbound bins of a continuous question.
pub const DEFAULT_INBOUND_OUTCOME_COUNT: usize = 200;

/// Fewest bins the engine will work with.
pub const MIN_INBOUND_OUTCOME_COUNT: usize = 2;

fn default_inbound_outcome_count() -> usize {
    DEFAULT_INBOUND_OUTCOME_COUNT
}

/// Scaling, bounds and resolution of one continuous question.
///
/// Owned by the question; the engine only reads it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContinuousQuestion {
    #[serde(flatten)]
    pub scaling: Scaling,
    #[serde(default)]
    pub open_lower_bound: bool,
    #[serde(default)]
    pub open_upper_bound: bool,
    #[serde(default = "default_inbound_outcome_count")]
    pub inbound_outcome_count: usize,
}

impl ContinuousQuestion {
    /// Closed-bound question with the default bin count.
    pub fn new(scaling: Scaling) -> Self {
        Self {
            scaling,
            open_lower_bound: false,
            open_upper_bound: false,
            inbound_outcome_count: DEFAULT_INBOUND_OUTCOME_COUNT,
        }
    }

    pub fn with_bounds(mut self, open_lower: bool, open_upper: bool) -> Self {
        self.open_lower_bound = open_lower;
        self.open_upper_bound = open_upper;
        self
    }

    pub fn with_bin_count(mut self, bin_count: usize) -> Self {
        self.inbound_outcome_count = bin_count;
        self
    }

    /// Bin count actually used by the engine.
    pub fn bin_count(&self) -> usize {
        self.inbound_outcome_count.max(MIN_INBOUND_OUTCOME_COUNT)
    }
}
