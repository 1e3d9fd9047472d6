//! Repeats completion runs and collects their outcomes.
//!
//! Every run starts from an empty collection. In [`run_batch`] each run also
//! gets its own generator (`seed + run index`), so runs never share a random
//! stream.

use super::config::SimConfig;
use super::strategy::{RunRecord, Strategy};
use crate::core::constants::POINTS_PER_PACK;
use crate::error::{DrawError, DrawResult};
use crate::setup::Simulation;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Runs `strategy` `num_runs` times on one random source and returns the
/// packs opened by each run, in call order.
pub fn run_simulations(
    sim: &Simulation,
    strategy: Strategy,
    num_runs: u32,
    rng: &mut impl Rng,
) -> DrawResult<Vec<u64>> {
    (0..num_runs)
        .map(|_| {
            strategy
                .run(sim, POINTS_PER_PACK, rng)
                .map(|record| record.packs_opened)
        })
        .collect()
}

/// A run that aborted on a draw error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunFailure {
    pub run_index: u32,
    pub error: DrawError,
}

/// Records of a batch. Failed runs are kept apart; they do not stop the
/// rest of the batch.
#[derive(Debug, Clone)]
pub struct BatchResult {
    pub strategy: Strategy,
    pub num_runs: u32,
    pub records: Vec<RunRecord>,
    pub failures: Vec<RunFailure>,
}

impl BatchResult {
    /// Packs opened per successful run.
    pub fn outcomes(&self) -> Vec<u64> {
        self.records.iter().map(|r| r.packs_opened).collect()
    }
}

/// Run the configured batch with per-run seeding.
pub fn run_batch(sim: &Simulation, config: &SimConfig) -> BatchResult {
    run_batch_with(config, |rng| {
        config.strategy.run(sim, config.points_per_pack, rng)
    })
}

fn run_batch_with<F>(config: &SimConfig, mut run_once: F) -> BatchResult
where
    F: FnMut(&mut ChaCha8Rng) -> DrawResult<RunRecord>,
{
    tracing::info!(
        runs = config.num_runs,
        strategy = %config.strategy,
        seed = ?config.seed,
        "starting simulation batch"
    );

    let mut records = Vec::with_capacity(config.num_runs as usize);
    let mut failures = Vec::new();

    for run_idx in 0..config.num_runs {
        // Create RNG for this run
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        };

        match run_once(&mut rng) {
            Ok(record) => {
                tracing::debug!(
                    run = run_idx + 1,
                    packs = record.packs_opened,
                    purchases = record.purchases.len(),
                    "run finished"
                );
                records.push(record);
            }
            Err(error) => {
                tracing::warn!(run = run_idx + 1, %error, "run aborted");
                failures.push(RunFailure { run_index: run_idx, error });
            }
        }
    }

    tracing::info!(
        completed = records.len(),
        failed = failures.len(),
        "simulation batch finished"
    );

    BatchResult {
        strategy: config.strategy,
        num_runs: config.num_runs,
        records,
        failures,
    }
}
