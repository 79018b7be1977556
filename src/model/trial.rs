// src/model/trial.rs

use serde::Serialize;

/// One trial's draw of the randomized quantities, already clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SampledTrialParams {
    pub repair_frequency: f64,
    pub repair_cost: f64,
    pub rental_cost: f64,
    pub replacement_threshold: f64,
}

/// Cohort-wide total cost of each strategy for one trial.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrialResult {
    pub purchase_total: f64,
    pub hire_total: f64,
}

/// Row shape for the per-trial sample export.
#[derive(Debug, Clone, Serialize)]
pub struct TrialRecord {
    pub trial: usize,
    pub purchase_total: f64,
    pub hire_total: f64,
}
