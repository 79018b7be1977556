// src/simulation/stats.rs

use serde::{Deserialize, Serialize};

/// Which denominator the standard deviation uses.
///
/// `Population` (divide by N) is the default and what published figures from
/// this model have used. `Sample` (divide by N - 1) is the textbook choice
/// for estimating a standard error from a finite draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StdDevKind {
    #[default]
    Population,
    Sample,
}

/// Mean and standard error of one cost series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesStats {
    pub mean: f64,
    pub std_dev: f64,
    pub standard_error: f64,
}

impl SeriesStats {
    /// Returns `None` for an empty series.
    pub fn from_samples(samples: &[f64], kind: StdDevKind) -> Option<Self> {
        samples
            .iter()
            .fold(RunningStats::default(), |mut acc, &x| {
                acc.push(x);
                acc
            })
            .finish(kind)
    }
}

/// Streaming mean/variance accumulator (Welford), mergeable across workers.
///
/// A series of identical values keeps `m2` at exactly zero, so a run without
/// variability reports a standard error of exactly zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
}

impl RunningStats {
    pub fn push(&mut self, x: f64) {
        self.count += 1;
        let delta = x - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (x - self.mean);
    }

    /// Combines two partial accumulators (Chan et al.).
    pub fn merge(self, other: Self) -> Self {
        if self.count == 0 {
            return other;
        }
        if other.count == 0 {
            return self;
        }
        let count = self.count + other.count;
        let delta = other.mean - self.mean;
        let (na, nb, n) = (self.count as f64, other.count as f64, count as f64);

        Self {
            count,
            mean: self.mean + delta * nb / n,
            m2: self.m2 + other.m2 + delta * delta * na * nb / n,
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// A single value with `StdDevKind::Sample` reports zero spread rather
    /// than dividing by zero.
    pub fn finish(&self, kind: StdDevKind) -> Option<SeriesStats> {
        if self.count == 0 {
            return None;
        }
        let n = self.count as f64;
        let variance = match kind {
            StdDevKind::Population => self.m2 / n,
            StdDevKind::Sample if self.count > 1 => self.m2 / (n - 1.0),
            StdDevKind::Sample => 0.0,
        };
        let std_dev = variance.max(0.0).sqrt();

        Some(SeriesStats {
            mean: self.mean,
            std_dev,
            standard_error: std_dev / n.sqrt(),
        })
    }
}
