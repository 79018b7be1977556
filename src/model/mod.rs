pub mod inputs;
pub mod trial;

pub use inputs::{check_repair_baseline, FixedInputs, Spread, VariabilityConfig};
pub use trial::{SampledTrialParams, TrialRecord, TrialResult};
