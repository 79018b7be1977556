// src/model/inputs.rs

use crate::error::{Result, SimError};
use serde::{Deserialize, Serialize};

/// Inputs that stay constant for a whole run.
///
/// All currency fields are in the same unit (dollars in the CLI).
/// `funding_coverage` and `upgrade_prob` are fractions in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FixedInputs {
    /// Carried for reporting; no cost formula draws on it.
    pub initial_budget: f64,
    pub purchase_cost: f64,
    /// Per device, per year.
    pub maintenance_cost: f64,
    /// Per device, per repair. Must equal `VariabilityConfig::repair_cost`'s
    /// center; each trial samples its own value around it.
    pub repair_cost: f64,
    /// Share of each repair paid by the funding agency.
    pub funding_coverage: f64,
    pub num_participants: u32,
    pub upgrade_prob: f64,
    /// Years.
    pub usage_duration: f64,
}

impl Default for FixedInputs {
    fn default() -> Self {
        Self {
            initial_budget: 100_000.0,
            purchase_cost: 5_000.0,
            maintenance_cost: 500.0,
            repair_cost: 300.0,
            funding_coverage: 0.8,
            num_participants: 100,
            upgrade_prob: 0.2,
            usage_duration: 5.0,
        }
    }
}

impl FixedInputs {
    /// Checks the ranges the cost model relies on.
    ///
    /// `MonteCarloEstimator::run` calls this once at entry, never per trial.
    pub fn validate(&self) -> Result<()> {
        non_negative("initial_budget", self.initial_budget)?;
        non_negative("purchase_cost", self.purchase_cost)?;
        non_negative("maintenance_cost", self.maintenance_cost)?;
        non_negative("repair_cost", self.repair_cost)?;
        fraction("funding_coverage", self.funding_coverage)?;
        fraction("upgrade_prob", self.upgrade_prob)?;

        if self.num_participants == 0 {
            return Err(SimError::invalid("num_participants must be at least 1"));
        }
        if !(self.usage_duration.is_finite() && self.usage_duration > 0.0) {
            return Err(SimError::invalid(format!(
                "usage_duration must be positive, got {}",
                self.usage_duration
            )));
        }
        Ok(())
    }
}

/// Center and standard deviation of one randomized quantity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spread {
    pub center: f64,
    pub spread: f64,
}

impl Spread {
    pub fn new(center: f64, spread: f64) -> Self {
        Self { center, spread }
    }

    /// A spread of zero: every draw returns `center`.
    pub fn fixed(center: f64) -> Self {
        Self::new(center, 0.0)
    }

    fn validate(&self, name: &str) -> Result<()> {
        if !self.center.is_finite() {
            return Err(SimError::invalid(format!(
                "{name} center must be finite, got {}",
                self.center
            )));
        }
        if !(self.spread.is_finite() && self.spread >= 0.0) {
            return Err(SimError::invalid(format!(
                "{name} spread must be a non-negative number, got {}",
                self.spread
            )));
        }
        Ok(())
    }
}

/// The four quantities that are redrawn every trial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariabilityConfig {
    /// Repairs per device per year.
    pub repair_frequency: Spread,
    pub repair_cost: Spread,
    /// Per device, per month.
    pub rental_cost: Spread,
    /// Fraction of the purchase price.
    pub replacement_threshold: Spread,
}

impl Default for VariabilityConfig {
    fn default() -> Self {
        Self {
            repair_frequency: Spread::new(1.5, 0.5),
            repair_cost: Spread::new(300.0, 100.0),
            rental_cost: Spread::new(200.0, 50.0),
            replacement_threshold: Spread::new(0.5, 0.1),
        }
    }
}

impl VariabilityConfig {
    /// Same centers, every spread set to zero.
    pub fn without_variability(&self) -> Self {
        Self {
            repair_frequency: Spread::fixed(self.repair_frequency.center),
            repair_cost: Spread::fixed(self.repair_cost.center),
            rental_cost: Spread::fixed(self.rental_cost.center),
            replacement_threshold: Spread::fixed(self.replacement_threshold.center),
        }
    }

    /// Called by `Sampler::new`, so every run checks it once at entry.
    pub fn validate(&self) -> Result<()> {
        self.repair_frequency.validate("repair_frequency")?;
        self.repair_cost.validate("repair_cost")?;
        self.rental_cost.validate("rental_cost")?;
        self.replacement_threshold.validate("replacement_threshold")
    }
}

/// The repair cost baseline lives in both input sets; a run needs them to agree.
pub fn check_repair_baseline(fixed: &FixedInputs, variability: &VariabilityConfig) -> Result<()> {
    let center = variability.repair_cost.center;
    if fixed.repair_cost == center {
        Ok(())
    } else {
        Err(SimError::invalid(format!(
            "repair_cost {} disagrees with the sampled repair_cost center {center}",
            fixed.repair_cost
        )))
    }
}

fn non_negative(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SimError::invalid(format!(
            "{name} must be non-negative, got {value}"
        )))
    }
}

fn fraction(name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SimError::invalid(format!(
            "{name} must lie in [0, 1], got {value}"
        )))
    }
}
