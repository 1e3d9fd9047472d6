//! Opening a single pack.
//!
//! Every random value comes from `rng.gen::<f64>()`, in a fixed order:
//! the pack class, then one roll per slot, then one pick per filled slot.
//! A scripted source can therefore replay a pack exactly.

use super::odds::{OddsTable, PackClass};
use super::packs::PackDefinitions;
use super::types::{CardId, RarityTier};
use crate::error::{DrawError, DrawResult};
use rand::Rng;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenedPack {
    pub class: PackClass,
    pub cards: Vec<CardId>,
}

/// Opens packs against fixed pools and odds. Holds no state of its own.
#[derive(Debug, Clone, Copy)]
pub struct PackOpener<'a> {
    packs: &'a PackDefinitions,
    odds: &'a OddsTable,
}

impl<'a> PackOpener<'a> {
    pub fn new(packs: &'a PackDefinitions, odds: &'a OddsTable) -> Self {
        Self { packs, odds }
    }

    pub fn open_pack(&self, collection: &str, rng: &mut impl Rng) -> DrawResult<OpenedPack> {
        if !self.packs.contains(collection) {
            return Err(DrawError::UnknownCollection(collection.to_string()));
        }
        let class = self.roll_class(rng);
        self.open_with_class(collection, class, rng)
    }

    pub fn roll_class(&self, rng: &mut impl Rng) -> PackClass {
        if rng.gen::<f64>() < self.odds.rare_pack_chance() {
            PackClass::Rare
        } else {
            PackClass::Regular
        }
    }

    /// Opens a pack of a known class, skipping the class roll.
    pub fn open_with_class(
        &self,
        collection: &str,
        class: PackClass,
        rng: &mut impl Rng,
    ) -> DrawResult<OpenedPack> {
        let tiers = self.roll_slot_tiers(class, rng);

        let mut cards = Vec::with_capacity(tiers.len());
        for tier in tiers.into_iter().flatten() {
            cards.push(self.pick(collection, tier, rng)?);
        }

        Ok(OpenedPack { class, cards })
    }

    /// Rolls every slot up front, then resolves each against its odds.
    /// `None` marks a slot whose weights ran out before its roll.
    pub fn roll_slot_tiers(&self, class: PackClass, rng: &mut impl Rng) -> Vec<Option<RarityTier>> {
        let slots = self.odds.slots(class);
        let rolls: Vec<f64> = (0..slots.len()).map(|_| rng.gen::<f64>()).collect();

        slots
            .iter()
            .zip(rolls)
            .map(|(odds, roll)| odds.resolve(roll))
            .collect()
    }

    fn pick(&self, collection: &str, tier: RarityTier, rng: &mut impl Rng) -> DrawResult<CardId> {
        let pool = self
            .packs
            .pool(collection, tier)
            .ok_or_else(|| DrawError::UnknownCollection(collection.to_string()))?;
        if pool.is_empty() {
            return Err(DrawError::EmptyPool {
                collection: collection.to_string(),
                tier,
            });
        }

        // Scaled by hand rather than gen_range: scripted replays map one deviate to one pick.
        let index = ((rng.gen::<f64>() * pool.len() as f64) as usize).min(pool.len() - 1);
        Ok(pool[index])
    }
}
