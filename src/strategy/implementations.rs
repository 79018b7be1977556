// src/strategy/implementations.rs

use crate::model::{FixedInputs, SampledTrialParams};
use crate::strategy::traits::{FundingStrategy, TrialContext};

const MONTHS_PER_YEAR: f64 = 12.0;

// =========================================================================
// 1. Purchase
// =========================================================================

/// The funder buys one device per participant up front and pays yearly
/// maintenance on it.
///
/// When a single sampled repair costs more than `replacement_threshold` of a
/// new device, the cohort is assumed to replace devices at the upgrade rate:
/// `num_participants * purchase_cost * upgrade_prob` is added on top.
#[derive(Debug, Clone, Copy, Default)]
pub struct PurchaseStrategy;

impl PurchaseStrategy {
    pub fn new() -> Self {
        Self
    }

    /// Strict comparison; a repair exactly at the threshold does not trigger.
    pub fn upgrade_triggered(fixed: &FixedInputs, sampled: &SampledTrialParams) -> bool {
        sampled.repair_cost > fixed.purchase_cost * sampled.replacement_threshold
    }
}

impl FundingStrategy for PurchaseStrategy {
    fn label(&self) -> &'static str {
        "Purchase"
    }

    fn total_cost(
        &self,
        fixed: &FixedInputs,
        sampled: &SampledTrialParams,
        context: &TrialContext,
    ) -> f64 {
        let n = fixed.num_participants as f64;

        let devices = n * fixed.purchase_cost;
        let maintenance = n * fixed.maintenance_cost * fixed.usage_duration;
        let mut total = devices + maintenance + context.total_repair_cost;

        if Self::upgrade_triggered(fixed, sampled) {
            total += n * fixed.purchase_cost * fixed.upgrade_prob;
        }
        total
    }
}

// =========================================================================
// 2. Hire
// =========================================================================

/// The funder rents one device per participant for the whole horizon.
/// Rental is quoted monthly.
#[derive(Debug, Clone, Copy, Default)]
pub struct HireStrategy;

impl HireStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl FundingStrategy for HireStrategy {
    fn label(&self) -> &'static str {
        "Hire"
    }

    fn total_cost(
        &self,
        fixed: &FixedInputs,
        sampled: &SampledTrialParams,
        context: &TrialContext,
    ) -> f64 {
        let n = fixed.num_participants as f64;
        let rental = n * sampled.rental_cost * MONTHS_PER_YEAR * fixed.usage_duration;
        rental + context.total_repair_cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sampled(repair_cost: f64, threshold: f64) -> SampledTrialParams {
        SampledTrialParams {
            repair_frequency: 1.0,
            repair_cost,
            rental_cost: 100.0,
            replacement_threshold: threshold,
        }
    }

    #[test]
    fn upgrade_switches_exactly_past_the_threshold() {
        let fixed = FixedInputs {
            purchase_cost: 1000.0,
            ..FixedInputs::default()
        };
        // Boundary is 1000 * 0.25 = 250.
        assert!(!PurchaseStrategy::upgrade_triggered(&fixed, &sampled(249.99, 0.25)));
        assert!(!PurchaseStrategy::upgrade_triggered(&fixed, &sampled(250.0, 0.25)));
        assert!(PurchaseStrategy::upgrade_triggered(&fixed, &sampled(250.01, 0.25)));
    }

    #[test]
    fn upgrade_adds_replacement_purchases() {
        let fixed = FixedInputs {
            num_participants: 10,
            purchase_cost: 1000.0,
            maintenance_cost: 0.0,
            upgrade_prob: 0.5,
            ..FixedInputs::default()
        };
        let context = TrialContext::default();
        let strategy = PurchaseStrategy::new();

        let below = strategy.total_cost(&fixed, &sampled(100.0, 0.25), &context);
        let above = strategy.total_cost(&fixed, &sampled(300.0, 0.25), &context);

        assert_eq!(below, 10_000.0);
        assert_eq!(above, 10_000.0 + 5_000.0);
    }

    #[test]
    fn hire_annualizes_monthly_rent() {
        let fixed = FixedInputs {
            num_participants: 2,
            usage_duration: 3.0,
            ..FixedInputs::default()
        };
        let context = TrialContext {
            total_repair_cost: 50.0,
        };
        let cost = HireStrategy::new().total_cost(&fixed, &sampled(0.0, 0.5), &context);
        assert_eq!(cost, 2.0 * 100.0 * 12.0 * 3.0 + 50.0);
    }
}
