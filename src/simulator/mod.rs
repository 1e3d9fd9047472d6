//! Monte Carlo collection-completion simulator.
//!
//! Run thousands of simulated collectors to analyze:
//! - Packs needed to finish every collection
//! - How much the pack-point shop shortens a run
//! - The spread between lucky and unlucky collectors
//!
//! Each run opens packs through the same `PackOpener` a single draw uses,
//! against a fresh `CollectionState`.

mod collection;
mod config;
mod report;
mod runner;
mod strategy;

pub use collection::CollectionState;
pub use config::SimConfig;
pub use report::{CollectionPace, Histogram, HistogramBin, SimReport};
pub use runner::{run_batch, run_simulations, BatchResult, RunFailure};
pub use strategy::{CompletionEvent, Purchase, RunRecord, RunState, Strategy};
