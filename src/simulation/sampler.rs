// src/simulation/sampler.rs

use crate::error::{Result, SimError};
use crate::model::{SampledTrialParams, Spread, VariabilityConfig};
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Draws one clamped parameter set per trial.
///
/// The normal distributions are built once per run; `sample` itself cannot
/// fail. Draws are clamped rather than rejected, so each quantity follows a
/// censored normal.
#[derive(Debug, Clone)]
pub struct Sampler {
    repair_frequency: Normal<f64>,
    repair_cost: Normal<f64>,
    rental_cost: Normal<f64>,
    replacement_threshold: Normal<f64>,
}

impl Sampler {
    pub fn new(config: &VariabilityConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            repair_frequency: normal("repair_frequency", config.repair_frequency)?,
            repair_cost: normal("repair_cost", config.repair_cost)?,
            rental_cost: normal("rental_cost", config.rental_cost)?,
            replacement_threshold: normal("replacement_threshold", config.replacement_threshold)?,
        })
    }

    /// Takes exactly four draws from `rng`, in field order.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> SampledTrialParams {
        let repair_frequency = self.repair_frequency.sample(rng);
        let repair_cost = self.repair_cost.sample(rng);
        let rental_cost = self.rental_cost.sample(rng);
        let replacement_threshold = self.replacement_threshold.sample(rng);

        SampledTrialParams {
            repair_frequency: repair_frequency.max(0.0),
            repair_cost: repair_cost.max(0.0),
            rental_cost: rental_cost.max(0.0),
            replacement_threshold: replacement_threshold.clamp(0.0, 1.0),
        }
    }
}

fn normal(name: &str, spread: Spread) -> Result<Normal<f64>> {
    Normal::new(spread.center, spread.spread).map_err(|e| {
        SimError::invalid(format!(
            "{name}: cannot sample N({}, {}): {e}",
            spread.center, spread.spread
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn clamps_hold_under_extreme_spreads() {
        let config = VariabilityConfig {
            repair_frequency: Spread::new(0.0, 50.0),
            repair_cost: Spread::new(-100.0, 10_000.0),
            rental_cost: Spread::new(10.0, 1_000.0),
            replacement_threshold: Spread::new(0.5, 25.0),
        };
        let sampler = Sampler::new(&config).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..10_000 {
            let p = sampler.sample(&mut rng);
            assert!(p.repair_frequency >= 0.0);
            assert!(p.repair_cost >= 0.0);
            assert!(p.rental_cost >= 0.0);
            assert!((0.0..=1.0).contains(&p.replacement_threshold));
        }
    }

    #[test]
    fn zero_spread_returns_centers() {
        let config = VariabilityConfig::default().without_variability();
        let sampler = Sampler::new(&config).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..100 {
            let p = sampler.sample(&mut rng);
            assert_eq!(p.repair_frequency, 1.5);
            assert_eq!(p.repair_cost, 300.0);
            assert_eq!(p.rental_cost, 200.0);
            assert_eq!(p.replacement_threshold, 0.5);
        }
    }

    #[test]
    fn centers_outside_domain_are_clamped_when_fixed() {
        let config = VariabilityConfig {
            repair_frequency: Spread::fixed(-2.0),
            repair_cost: Spread::fixed(-1.0),
            rental_cost: Spread::fixed(-3.0),
            replacement_threshold: Spread::fixed(1.7),
        };
        let sampler = Sampler::new(&config).unwrap();
        let p = sampler.sample(&mut StdRng::seed_from_u64(1));

        assert_eq!(p.repair_frequency, 0.0);
        assert_eq!(p.repair_cost, 0.0);
        assert_eq!(p.rental_cost, 0.0);
        assert_eq!(p.replacement_threshold, 1.0);
    }

    #[test]
    fn nan_center_is_rejected_up_front() {
        let config = VariabilityConfig {
            replacement_threshold: Spread::new(f64::NAN, 0.1),
            ..VariabilityConfig::default()
        };
        assert!(matches!(
            Sampler::new(&config),
            Err(SimError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn negative_spread_is_rejected_up_front() {
        let config = VariabilityConfig {
            repair_cost: Spread::new(300.0, -1.0),
            ..VariabilityConfig::default()
        };
        assert!(matches!(
            Sampler::new(&config),
            Err(SimError::InvalidConfiguration(_))
        ));
    }
}
