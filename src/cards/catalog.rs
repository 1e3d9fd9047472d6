//! Card catalog: declared card counts and the id-assignment pass.
//!
//! Ids are handed out by walking the declared entries in order, then each
//! entry's pools in order, then counting. Anything keyed by card id relies
//! on this walk being reproducible, so the declaration is a `Vec`, never a
//! map.

use super::types::{Card, CardId, Home, RarityTier, SHARED_HOME};
use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Number of cards with one home at one tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolCount {
    pub home: Home,
    pub count: usize,
}

/// All pools of one tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub tier: RarityTier,
    pub pools: Vec<PoolCount>,
}

/// Declared shape of a catalog, before ids are assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDefinition {
    /// Collection names in rotation order. The first is the default.
    pub collections: Vec<String>,
    pub entries: Vec<CatalogEntry>,
}

impl CatalogDefinition {
    /// The built-in set: three collections plus a shared pool.
    pub fn standard() -> Self {
        // (tier, shared, mewtwo, charizard, pikachu)
        const COUNTS: [(RarityTier, usize, usize, usize, usize); 8] = [
            (RarityTier::Diamond, 25, 25, 25, 25),
            (RarityTier::DoubleDiamond, 18, 17, 17, 17),
            (RarityTier::TripleDiamond, 0, 14, 14, 14),
            (RarityTier::QuadDiamond, 0, 5, 5, 5),
            (RarityTier::Star, 0, 8, 8, 8),
            (RarityTier::DoubleStar, 0, 9, 10, 10),
            (RarityTier::TripleStar, 0, 1, 1, 1),
            (RarityTier::Ultra, 3, 0, 0, 0),
        ];

        let entries = COUNTS
            .iter()
            .map(|&(tier, shared, mewtwo, charizard, pikachu)| CatalogEntry {
                tier,
                pools: vec![
                    PoolCount { home: Home::Shared, count: shared },
                    PoolCount { home: Home::collection("mewtwo"), count: mewtwo },
                    PoolCount { home: Home::collection("charizard"), count: charizard },
                    PoolCount { home: Home::collection("pikachu"), count: pikachu },
                ],
            })
            .collect();

        Self {
            collections: vec![
                "mewtwo".to_string(),
                "charizard".to_string(),
                "pikachu".to_string(),
            ],
            entries,
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.collections.is_empty() {
            return Err(ConfigError::NoCollections);
        }

        let mut seen = HashSet::new();
        for name in &self.collections {
            if name == SHARED_HOME {
                return Err(ConfigError::ReservedCollectionName(name.clone()));
            }
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::DuplicateCollection(name.clone()));
            }
        }

        for entry in &self.entries {
            for pool in &entry.pools {
                if let Home::Collection(name) = &pool.home {
                    if !seen.contains(name.as_str()) {
                        return Err(ConfigError::UnknownCollection {
                            tier: entry.tier,
                            collection: name.clone(),
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

/// Every card with its id, plus a per-tier index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    cards: Vec<Card>,
    collections: Vec<String>,
    by_tier: [Vec<CardId>; 8],
}

impl Catalog {
    pub fn from_definition(definition: &CatalogDefinition) -> ConfigResult<Self> {
        definition.validate()?;
        Ok(Self::assign_ids(definition))
    }

    fn assign_ids(definition: &CatalogDefinition) -> Self {
        let mut cards = Vec::new();
        let mut by_tier: [Vec<CardId>; 8] = Default::default();

        for entry in &definition.entries {
            for pool in &entry.pools {
                for _ in 0..pool.count {
                    let id = cards.len();
                    cards.push(Card {
                        id,
                        rarity: entry.tier,
                        home: pool.home.clone(),
                    });
                    by_tier[entry.tier.index()].push(id);
                }
            }
        }

        Self {
            cards,
            collections: definition.collections.clone(),
            by_tier,
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Collection names in declaration order.
    pub fn collections(&self) -> &[String] {
        &self.collections
    }

    /// The collection packs fall back to once every named collection is done.
    pub fn default_collection(&self) -> &str {
        &self.collections[0]
    }

    /// Ids of every card of `tier`, ascending.
    pub fn tier_cards(&self, tier: RarityTier) -> &[CardId] {
        &self.by_tier[tier.index()]
    }
}

/// Builds the built-in catalog.
pub fn build_catalog() -> Catalog {
    Catalog::assign_ids(&CatalogDefinition::standard())
}
