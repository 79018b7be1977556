// src/strategy/traits.rs

use crate::model::{FixedInputs, SampledTrialParams};
use std::fmt::Debug;

/// Costs every strategy shares for a single trial.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrialContext {
    /// Funded repair spend for the whole cohort over the whole horizon.
    pub total_repair_cost: f64,
}

/// A way of funding devices for the cohort.
///
/// Implementations must be pure: the same inputs always give the same cost.
/// `Send + Sync` lets the parallel runner share one instance across workers.
pub trait FundingStrategy: Debug + Send + Sync {
    /// Short label used in reports.
    fn label(&self) -> &'static str;

    /// Cohort-wide total cost of this strategy for one trial.
    ///
    /// # Arguments
    /// * `fixed` - Run-wide inputs.
    /// * `sampled` - This trial's clamped draws.
    /// * `context` - Costs shared with the other strategies.
    fn total_cost(
        &self,
        fixed: &FixedInputs,
        sampled: &SampledTrialParams,
        context: &TrialContext,
    ) -> f64;
}
