//! Error types for table construction and pack draws.

use crate::cards::odds::PackClass;
use crate::cards::types::RarityTier;

/// Problems found while building the catalog, odds or pack definitions.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("catalog declares no collections")]
    NoCollections,

    #[error("collection '{0}' is declared more than once")]
    DuplicateCollection(String),

    #[error("'{0}' is reserved for the shared pool and cannot name a collection")]
    ReservedCollectionName(String),

    #[error("catalog entry for {tier} references undeclared collection '{collection}'")]
    UnknownCollection { tier: RarityTier, collection: String },

    #[error("{class} packs have no slots")]
    NoSlots { class: PackClass },

    #[error("{class} slot {slot} has invalid weight {weight} for {tier}")]
    InvalidWeight {
        class: PackClass,
        slot: usize,
        tier: RarityTier,
        weight: f64,
    },

    #[error("rare pack chance {0} is outside [0, 1]")]
    InvalidRareChance(f64),

    #[error("{class} slot {slot} can draw {tier} but '{collection}' has no {tier} cards")]
    EmptyPool {
        collection: String,
        tier: RarityTier,
        class: PackClass,
        slot: usize,
    },

    #[error("catalog has {0} cards but no slot can roll {0}")]
    UnreachableTier(RarityTier),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures while opening a single pack. Any of these aborts the run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DrawError {
    #[error("no pack definition for collection '{0}'")]
    UnknownCollection(String),

    #[error("'{collection}' has no {tier} cards to draw")]
    EmptyPool {
        collection: String,
        tier: RarityTier,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;
pub type DrawResult<T> = Result<T, DrawError>;
