// src/simulation/engine.rs

use crate::error::{Result, SimError};
use crate::model::{
    check_repair_baseline, FixedInputs, TrialRecord, TrialResult, VariabilityConfig,
};
use crate::simulation::config::SimulationConfig;
use crate::simulation::sampler::Sampler;
use crate::simulation::stats::{RunningStats, SeriesStats, StdDevKind};
use crate::strategy::cost_model;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use serde::Serialize;
use std::ops::Range;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Trials per unit of work. Sequential and parallel runs share the same
/// partition so a seeded run gives bit-identical results either way.
const BATCH_SIZE: usize = 100;

/// Everything a presentation layer needs from one run.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationOutcome {
    /// Per-trial totals, in trial order.
    pub purchase_costs: Vec<f64>,
    pub hire_costs: Vec<f64>,
    pub purchase: SeriesStats,
    pub hire: SeriesStats,
    pub trials: usize,
    /// Replaying with this seed reproduces the run.
    pub seed: u64,
    pub std_dev: StdDevKind,
}

impl SimulationOutcome {
    pub fn results(&self) -> impl Iterator<Item = TrialResult> + '_ {
        self.purchase_costs
            .iter()
            .zip(&self.hire_costs)
            .map(|(&purchase_total, &hire_total)| TrialResult {
                purchase_total,
                hire_total,
            })
    }

    pub fn records(&self) -> Vec<TrialRecord> {
        self.results()
            .enumerate()
            .map(|(trial, r)| TrialRecord {
                trial,
                purchase_total: r.purchase_total,
                hire_total: r.hire_total,
            })
            .collect()
    }
}

/// Shared flag for stopping a run between trials.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Runs the sampler and cost model for a fixed number of independent trials.
pub struct MonteCarloEstimator {
    config: SimulationConfig,
    cancel: CancelToken,
}

/// One batch worth of trials plus its running statistics.
struct BatchOutput {
    results: Vec<TrialResult>,
    purchase: RunningStats,
    hire: RunningStats,
}

impl MonteCarloEstimator {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            cancel: CancelToken::new(),
        }
    }

    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn run(
        &self,
        fixed: &FixedInputs,
        variability: &VariabilityConfig,
    ) -> Result<SimulationOutcome> {
        let trials = self.config.trials;
        if trials == 0 {
            return Err(SimError::invalid("trial count must be positive, got 0"));
        }
        fixed.validate()?;
        check_repair_baseline(fixed, variability)?;
        let sampler = Sampler::new(variability)?;
        let seed = self.config.seed.unwrap_or_else(rand::random);

        info!(
            trials,
            seed,
            parallel = self.config.parallel,
            "starting cost estimate"
        );

        let batches: Vec<Range<usize>> = (0..trials.div_ceil(BATCH_SIZE))
            .map(|b| b * BATCH_SIZE..((b + 1) * BATCH_SIZE).min(trials))
            .collect();

        let outputs: Vec<BatchOutput> = if self.config.parallel {
            batches
                .into_par_iter()
                .map(|range| self.run_batch(range, seed, fixed, &sampler))
                .collect::<Result<_>>()?
        } else {
            batches
                .into_iter()
                .map(|range| self.run_batch(range, seed, fixed, &sampler))
                .collect::<Result<_>>()?
        };

        let mut purchase_costs = Vec::with_capacity(trials);
        let mut hire_costs = Vec::with_capacity(trials);
        let mut purchase_acc = RunningStats::default();
        let mut hire_acc = RunningStats::default();

        for batch in outputs {
            purchase_acc = purchase_acc.merge(batch.purchase);
            hire_acc = hire_acc.merge(batch.hire);
            for r in batch.results {
                purchase_costs.push(r.purchase_total);
                hire_costs.push(r.hire_total);
            }
        }

        let kind = self.config.std_dev;
        let (purchase, hire) = match (purchase_acc.finish(kind), hire_acc.finish(kind)) {
            (Some(p), Some(h)) => (p, h),
            _ => return Err(SimError::invalid("run produced no trials")),
        };

        info!(
            purchase_mean = purchase.mean,
            purchase_se = purchase.standard_error,
            hire_mean = hire.mean,
            hire_se = hire.standard_error,
            "cost estimate complete"
        );

        Ok(SimulationOutcome {
            purchase_costs,
            hire_costs,
            purchase,
            hire,
            trials,
            seed,
            std_dev: kind,
        })
    }

    fn run_batch(
        &self,
        range: Range<usize>,
        seed: u64,
        fixed: &FixedInputs,
        sampler: &Sampler,
    ) -> Result<BatchOutput> {
        debug!(start = range.start, end = range.end, "running batch");

        let mut output = BatchOutput {
            results: Vec::with_capacity(range.len()),
            purchase: RunningStats::default(),
            hire: RunningStats::default(),
        };

        for trial in range {
            // Trials are atomic; cancellation is only observed between them.
            if self.cancel.is_cancelled() {
                return Err(SimError::Cancelled);
            }
            let mut rng = trial_rng(seed, trial);
            let sampled = sampler.sample(&mut rng);
            let result = cost_model::evaluate(fixed, &sampled);

            output.purchase.push(result.purchase_total);
            output.hire.push(result.hire_total);
            output.results.push(result);
        }
        Ok(output)
    }
}

/// Independent generator for one trial, keyed by run seed and trial index.
fn trial_rng(seed: u64, trial: usize) -> StdRng {
    let mut key = [0u8; 32];
    key[..8].copy_from_slice(&seed.to_le_bytes());
    key[8..16].copy_from_slice(&(trial as u64).to_le_bytes());
    StdRng::from_seed(key)
}

/// Single-shot estimate with default settings and a fresh seed.
pub fn run(
    fixed: &FixedInputs,
    variability: &VariabilityConfig,
    trials: usize,
) -> Result<SimulationOutcome> {
    MonteCarloEstimator::new(SimulationConfig::with_trials(trials)).run(fixed, variability)
}
