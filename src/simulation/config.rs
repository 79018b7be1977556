// src/simulation/config.rs

use crate::error::{Result, SimError};
use crate::simulation::stats::StdDevKind;

pub const DEFAULT_TRIALS: usize = 1000;

#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub trials: usize,
    /// Run seed. `None` draws one from entropy; the outcome records it.
    pub seed: Option<u64>,
    pub parallel: bool,
    pub std_dev: StdDevKind,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            seed: None,
            parallel: false,
            std_dev: StdDevKind::Population,
        }
    }
}

impl SimulationConfig {
    pub fn with_trials(trials: usize) -> Self {
        Self {
            trials,
            ..Self::default()
        }
    }
}

/// Converts a host-supplied signed trial count, rejecting zero and negatives.
pub fn trial_count(requested: i64) -> Result<usize> {
    if requested <= 0 {
        return Err(SimError::invalid(format!(
            "trial count must be positive, got {requested}"
        )));
    }
    usize::try_from(requested)
        .map_err(|_| SimError::invalid(format!("trial count {requested} is too large")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_runs_a_thousand_trials() {
        assert_eq!(SimulationConfig::default().trials, 1000);
    }

    #[test]
    fn trial_count_rejects_zero_and_negative() {
        assert!(matches!(trial_count(0), Err(SimError::InvalidConfiguration(_))));
        assert!(matches!(trial_count(-5), Err(SimError::InvalidConfiguration(_))));
        assert_eq!(trial_count(250).unwrap(), 250);
    }
}
