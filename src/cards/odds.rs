//! Slot odds per pack class.

use super::types::RarityTier;
use crate::core::constants::RARE_PACK_CHANCE;
use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackClass {
    Regular,
    Rare,
}

impl fmt::Display for PackClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackClass::Regular => f.write_str("regular"),
            PackClass::Rare => f.write_str("rare"),
        }
    }
}

/// One `(tier, weight)` pair of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierWeight {
    pub tier: RarityTier,
    pub weight: f64,
}

/// Weights for one slot, walked in declared order. They may sum below 1.0;
/// the remainder means the slot stays empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotOdds(Vec<TierWeight>);

impl SlotOdds {
    pub fn new(entries: &[(RarityTier, f64)]) -> Self {
        Self(
            entries
                .iter()
                .map(|&(tier, weight)| TierWeight { tier, weight })
                .collect(),
        )
    }

    pub fn entries(&self) -> &[TierWeight] {
        &self.0
    }

    pub fn total_weight(&self) -> f64 {
        self.0.iter().map(|e| e.weight).sum()
    }

    /// First tier whose running sum exceeds `roll`, or `None` if the
    /// weights run out first.
    pub fn resolve(&self, roll: f64) -> Option<RarityTier> {
        let mut cumulative = 0.0;
        for entry in &self.0 {
            cumulative += entry.weight;
            if roll < cumulative {
                return Some(entry.tier);
            }
        }
        None
    }

    /// Tiers this slot can actually produce: a non-zero weight that starts
    /// below 1.0, since rolls never reach 1.0.
    pub fn reachable_tiers(&self) -> impl Iterator<Item = RarityTier> + '_ {
        self.0
            .iter()
            .scan(0.0, |cumulative: &mut f64, entry| {
                let start = *cumulative;
                *cumulative += entry.weight;
                Some((start, entry))
            })
            .filter(|(start, entry)| entry.weight > 0.0 && *start < 1.0)
            .map(|(_, entry)| entry.tier)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OddsTable {
    /// Chance that a pack is rare instead of regular.
    #[serde(default = "default_rare_pack_chance")]
    pub rare_pack_chance: f64,
    pub regular: Vec<SlotOdds>,
    pub rare: Vec<SlotOdds>,
}

fn default_rare_pack_chance() -> f64 {
    RARE_PACK_CHANCE
}

impl OddsTable {
    pub fn standard() -> Self {
        let guaranteed_common = SlotOdds::new(&[(RarityTier::Diamond, 1.0)]);
        let slot_4 = SlotOdds::new(&[
            (RarityTier::DoubleDiamond, 0.9),
            (RarityTier::TripleDiamond, 0.05),
            (RarityTier::QuadDiamond, 0.01666),
            (RarityTier::Star, 0.02572),
            (RarityTier::DoubleStar, 0.005),
            (RarityTier::TripleStar, 0.00222),
            (RarityTier::Ultra, 0.0004),
        ]);
        let slot_5 = SlotOdds::new(&[
            (RarityTier::DoubleDiamond, 0.6),
            (RarityTier::TripleDiamond, 0.2),
            (RarityTier::QuadDiamond, 0.06664),
            (RarityTier::Star, 0.10288),
            (RarityTier::DoubleStar, 0.02),
            (RarityTier::TripleStar, 0.00888),
            (RarityTier::Ultra, 0.0016),
        ]);
        let rare_slot = SlotOdds::new(&[
            (RarityTier::Star, 0.42105),
            (RarityTier::DoubleStar, 0.47368),
            (RarityTier::TripleStar, 0.05263),
            (RarityTier::Ultra, 0.05263),
        ]);

        Self {
            rare_pack_chance: RARE_PACK_CHANCE,
            regular: vec![
                guaranteed_common.clone(),
                guaranteed_common.clone(),
                guaranteed_common,
                slot_4,
                slot_5,
            ],
            rare: vec![rare_slot.clone(), rare_slot.clone(), rare_slot],
        }
    }

    /// Same odds for every slot of both classes, never rare. Handy for
    /// small hand-built catalogs.
    pub fn uniform(slots: usize, odds: SlotOdds) -> Self {
        Self {
            rare_pack_chance: 0.0,
            regular: vec![odds.clone(); slots],
            rare: vec![odds; slots],
        }
    }

    pub fn rare_pack_chance(&self) -> f64 {
        self.rare_pack_chance
    }

    /// Classes a pack can come out as. A zero rare chance never yields a
    /// rare pack; a chance of one never yields a regular pack.
    pub fn rollable_classes(&self) -> Vec<PackClass> {
        let mut classes = Vec::with_capacity(2);
        if self.rare_pack_chance < 1.0 {
            classes.push(PackClass::Regular);
        }
        if self.rare_pack_chance > 0.0 {
            classes.push(PackClass::Rare);
        }
        classes
    }

    pub fn slots(&self, class: PackClass) -> &[SlotOdds] {
        match class {
            PackClass::Regular => &self.regular,
            PackClass::Rare => &self.rare,
        }
    }

    pub fn slot_count(&self, class: PackClass) -> usize {
        self.slots(class).len()
    }

    /// Odds for a 1-based slot index.
    pub fn weights_for(&self, class: PackClass, slot: usize) -> Option<&SlotOdds> {
        slot.checked_sub(1).and_then(|i| self.slots(class).get(i))
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if !(0.0..=1.0).contains(&self.rare_pack_chance) {
            return Err(ConfigError::InvalidRareChance(self.rare_pack_chance));
        }

        for class in [PackClass::Regular, PackClass::Rare] {
            let slots = self.slots(class);
            if slots.is_empty() {
                return Err(ConfigError::NoSlots { class });
            }
            for (i, slot) in slots.iter().enumerate() {
                for entry in slot.entries() {
                    if !entry.weight.is_finite() || entry.weight < 0.0 {
                        return Err(ConfigError::InvalidWeight {
                            class,
                            slot: i + 1,
                            tier: entry.tier,
                            weight: entry.weight,
                        });
                    }
                }
            }
        }

        Ok(())
    }
}
