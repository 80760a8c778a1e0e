//! Configuration parameters for the VNS algorithm.

use crate::error::Error;
use crate::objective::Objective;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Which search scheme the driver runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Basic VNS: no initial descent, sampled descent after each shake.
    Vns,
    /// General VNS: full VND initially and after each shake.
    Gvns,
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Vns => f.write_str("vns"),
            Variant::Gvns => f.write_str("gvns"),
        }
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "vns" => Ok(Variant::Vns),
            "gvns" => Ok(Variant::Gvns),
            other => Err(format!("unknown variant '{}'", other)),
        }
    }
}

/// Configuration settings for the VNS algorithm.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Objective to minimize
    pub objective: Objective,
    /// Search scheme
    pub variant: Variant,
    /// Maximum number of outer iterations
    pub max_iterations: usize,
    /// Maximum number of consecutive outer iterations without improvement
    pub max_no_improve: usize,
    /// Number of shake structures (k_max)
    pub k_max_shake: usize,
    /// Seed for the run's random source; `None` draws fresh entropy
    pub seed: Option<u64>,
    /// Optional time limit for the algorithm
    pub time_limit: Option<Duration>,
    /// Assets sampled per call of the sampled descent
    pub sampled_assets: usize,
    /// Random team exchanges tried by the sampled descent for f2 objectives
    pub sampled_swaps: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            objective: Objective::Distance,
            variant: Variant::Gvns,
            max_iterations: 1000,
            max_no_improve: 50,
            k_max_shake: 3,
            seed: None,
            time_limit: None,
            sampled_assets: 30,
            sampled_swaps: 10,
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Config::default()
    }

    /// Set the objective.
    pub fn with_objective(mut self, objective: Objective) -> Self {
        self.objective = objective;
        self
    }

    /// Set the search variant.
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Set the maximum number of outer iterations.
    pub fn with_max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Set the maximum iterations without improvement.
    pub fn with_max_no_improve(mut self, iterations: usize) -> Self {
        self.max_no_improve = iterations;
        self
    }

    /// Set the number of shake structures.
    pub fn with_k_max_shake(mut self, k_max: usize) -> Self {
        self.k_max_shake = k_max;
        self
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the time limit.
    pub fn with_time_limit(mut self, duration: Duration) -> Self {
        self.time_limit = Some(duration);
        self
    }

    /// Set the sample sizes of the sampled descent.
    pub fn with_sampling(mut self, assets: usize, swaps: usize) -> Self {
        self.sampled_assets = assets;
        self.sampled_swaps = swaps;
        self
    }

    /// Check that every count parameter is positive.
    pub fn validate(&self) -> Result<(), Error> {
        let counts = [
            ("max_iterations", self.max_iterations),
            ("max_no_improve", self.max_no_improve),
            ("k_max_shake", self.k_max_shake),
            ("sampled_assets", self.sampled_assets),
        ];

        for (name, value) in counts {
            if value == 0 {
                return Err(Error::InvalidConfig(format!("{} must be positive", name)));
            }
        }

        Ok(())
    }
}
