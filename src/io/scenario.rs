// src/io/scenario.rs

use crate::error::Result;
use crate::model::{FixedInputs, Spread, VariabilityConfig};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// A saved set of run parameters.
///
/// Every section is optional; missing fields fall back to the defaults.
/// The repair cost appears both as `fixed.repair_cost` and as the center of
/// `variability.repair_cost`; when only one is given the other follows it.
///
/// ```json
/// {
///   "fixed": { "num_participants": 250, "usage_duration": 7, "repair_cost": 450 },
///   "variability": { "rental_cost": { "center": 180, "spread": 40 } },
///   "trials": 5000,
///   "seed": 42
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScenarioFile")]
pub struct Scenario {
    pub fixed: FixedInputs,
    pub variability: VariabilityConfig,
    pub trials: Option<i64>,
    pub seed: Option<u64>,
}

/// On-disk shape; keeps track of which repair cost fields were written.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ScenarioFile {
    fixed: Map<String, Value>,
    variability: VariabilityFile,
    trials: Option<i64>,
    seed: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct VariabilityFile {
    repair_frequency: Option<Spread>,
    repair_cost: Option<Spread>,
    rental_cost: Option<Spread>,
    replacement_threshold: Option<Spread>,
}

impl TryFrom<ScenarioFile> for Scenario {
    type Error = serde_json::Error;

    fn try_from(file: ScenarioFile) -> std::result::Result<Self, Self::Error> {
        let fixed_repair_given = file.fixed.contains_key("repair_cost");
        let mut fixed: FixedInputs = serde_json::from_value(Value::Object(file.fixed))?;

        let defaults = VariabilityConfig::default();
        let given = file.variability;
        let repair_cost = match given.repair_cost {
            // Both written: kept as-is, the estimator rejects a disagreement.
            Some(spread) if fixed_repair_given => spread,
            Some(spread) => {
                fixed.repair_cost = spread.center;
                spread
            }
            None => Spread::new(fixed.repair_cost, defaults.repair_cost.spread),
        };

        Ok(Scenario {
            fixed,
            variability: VariabilityConfig {
                repair_frequency: given.repair_frequency.unwrap_or(defaults.repair_frequency),
                repair_cost,
                rental_cost: given.rental_cost.unwrap_or(defaults.rental_cost),
                replacement_threshold: given
                    .replacement_threshold
                    .unwrap_or(defaults.replacement_threshold),
            },
            trials: file.trials,
            seed: file.seed,
        })
    }
}

impl Scenario {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading scenario");
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}
