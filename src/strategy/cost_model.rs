// src/strategy/cost_model.rs

use crate::model::{FixedInputs, SampledTrialParams, TrialResult};
use crate::strategy::implementations::{HireStrategy, PurchaseStrategy};
use crate::strategy::traits::{FundingStrategy, TrialContext};

/// Funded repair spend for the cohort over the full horizon.
///
/// Formula: repair_cost * funding_coverage * repair_frequency
///          * usage_duration * num_participants
pub fn total_repair_cost(fixed: &FixedInputs, sampled: &SampledTrialParams) -> f64 {
    let repair_funded_unit = sampled.repair_cost * fixed.funding_coverage;
    repair_funded_unit
        * sampled.repair_frequency
        * fixed.usage_duration
        * fixed.num_participants as f64
}

/// Prices one trial under both strategies.
///
/// Pure and deterministic in its arguments.
pub fn evaluate(fixed: &FixedInputs, sampled: &SampledTrialParams) -> TrialResult {
    let context = TrialContext {
        total_repair_cost: total_repair_cost(fixed, sampled),
    };

    TrialResult {
        purchase_total: PurchaseStrategy.total_cost(fixed, sampled, &context),
        hire_total: HireStrategy.total_cost(fixed, sampled, &context),
    }
}
