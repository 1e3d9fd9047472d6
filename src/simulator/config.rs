//! Simulation configuration.

use super::strategy::Strategy;
use crate::core::constants::{DEFAULT_BIN_WIDTH, DEFAULT_NUM_RUNS, POINTS_PER_PACK};

/// Configuration for a batch of completion runs.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulation runs to perform
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Which completion strategy every run uses
    pub strategy: Strategy,

    /// Pack points earned per opened pack (currency strategy only)
    pub points_per_pack: u64,

    /// Histogram bin width, in packs
    pub bin_width: u64,

    /// Money per pack, for the cost estimate in reports
    pub pack_cost: Option<f64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: DEFAULT_NUM_RUNS,
            seed: None,
            strategy: Strategy::CurrencyAssisted,
            points_per_pack: POINTS_PER_PACK,
            bin_width: DEFAULT_BIN_WIDTH,
            pack_cost: None,
        }
    }
}

impl SimConfig {
    /// Small batch for smoke-testing a setup
    pub fn quick(strategy: Strategy) -> Self {
        Self {
            num_runs: 50,
            strategy,
            ..Default::default()
        }
    }

    /// Seeded batch that produces the same outcomes on every run
    pub fn reproducible(strategy: Strategy, num_runs: u32, seed: u64) -> Self {
        Self {
            num_runs,
            seed: Some(seed),
            strategy,
            ..Default::default()
        }
    }
}
