//! Per-collection card pools.

use super::catalog::Catalog;
use super::odds::OddsTable;
use super::types::{CardId, RarityTier};
use crate::error::{ConfigError, ConfigResult};
use std::collections::HashMap;

/// For each collection, the ids drawable at each tier: its own cards plus
/// the shared pool, in catalog id order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackDefinitions {
    pools: HashMap<String, [Vec<CardId>; 8]>,
}

impl PackDefinitions {
    /// Pools taken as given, without any of the build-time checks.
    #[cfg(test)]
    pub(crate) fn from_pools(pools: HashMap<String, [Vec<CardId>; 8]>) -> Self {
        Self { pools }
    }

    /// Pool for `collection` at `tier`. `None` if the collection is unknown.
    pub fn pool(&self, collection: &str, tier: RarityTier) -> Option<&[CardId]> {
        self.pools
            .get(collection)
            .map(|tiers| tiers[tier.index()].as_slice())
    }

    pub fn contains(&self, collection: &str) -> bool {
        self.pools.contains_key(collection)
    }

    /// Every id a pack of `collection` can yield.
    pub fn drawable(&self, collection: &str) -> impl Iterator<Item = CardId> + '_ {
        self.pools
            .get(collection)
            .into_iter()
            .flat_map(|tiers| tiers.iter().flatten().copied())
    }
}

/// Builds every collection's pools. Fails if a tier some slot can roll has
/// no cards for a collection, or if catalog cards sit at a tier no slot
/// can roll.
pub fn build_pack_definitions(catalog: &Catalog, odds: &OddsTable) -> ConfigResult<PackDefinitions> {
    odds.validate()?;

    // Only classes a pack can actually come out as count. A card no slot
    // can roll would keep a completion run going forever.
    let classes = odds.rollable_classes();
    for tier in RarityTier::ALL {
        if catalog.tier_cards(tier).is_empty() {
            continue;
        }
        let reachable = classes
            .iter()
            .flat_map(|&class| odds.slots(class))
            .any(|slot| slot.reachable_tiers().any(|t| t == tier));
        if !reachable {
            return Err(ConfigError::UnreachableTier(tier));
        }
    }

    let mut pools = HashMap::with_capacity(catalog.collections().len());
    for collection in catalog.collections() {
        let mut tiers: [Vec<CardId>; 8] = Default::default();
        for tier in RarityTier::ALL {
            tiers[tier.index()] = catalog
                .tier_cards(tier)
                .iter()
                .copied()
                .filter(|&id| catalog.cards()[id].home.drawable_from(collection))
                .collect();
        }

        for &class in &classes {
            for (i, slot) in odds.slots(class).iter().enumerate() {
                if let Some(tier) = slot.reachable_tiers().find(|t| tiers[t.index()].is_empty()) {
                    return Err(ConfigError::EmptyPool {
                        collection: collection.clone(),
                        tier,
                        class,
                        slot: i + 1,
                    });
                }
            }
        }

        pools.insert(collection.clone(), tiers);
    }

    Ok(PackDefinitions { pools })
}
