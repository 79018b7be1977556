//! Monte Carlo estimate of what it costs to fund assistive technology for a
//! cohort by buying devices versus hiring them.
//!
//! Each trial draws repair frequency, repair cost, rental cost and the
//! replacement threshold from clamped normal distributions, prices both
//! strategies, and the run reduces the two cost series to a mean and a
//! standard error.

pub mod error;
pub mod io;
pub mod logging;
pub mod model;
pub mod simulation;
pub mod strategy;

pub use error::{Result, SimError};
pub use model::{FixedInputs, SampledTrialParams, Spread, TrialResult, VariabilityConfig};
pub use simulation::config::{trial_count, SimulationConfig, DEFAULT_TRIALS};
pub use simulation::engine::{run, CancelToken, MonteCarloEstimator, SimulationOutcome};
pub use simulation::sampler::Sampler;
pub use simulation::stats::{SeriesStats, StdDevKind};
pub use strategy::cost_model::evaluate;
