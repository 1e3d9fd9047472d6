//! Packsim - Monte Carlo estimates of packs needed to complete card collections
//!
//! This module exposes the simulation engine for the `simulate` binary,
//! tests, and external use.

pub mod build_info;
pub mod cards;
pub mod core;
pub mod error;
pub mod rng;
pub mod setup;
pub mod simulator;

pub use cards::{build_catalog, build_pack_definitions, Catalog, OddsTable, PackOpener};
pub use error::{ConfigError, DrawError};
pub use setup::{SetupFile, Simulation};
pub use simulator::{run_simulations, Strategy};
