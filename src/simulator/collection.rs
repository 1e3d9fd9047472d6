//! Per-run record of owned cards.

use crate::cards::{Card, CardId, Catalog, Home, RarityTier};
use std::collections::{BTreeSet, HashMap};

/// Owned counts plus the missing-card indexes.
///
/// A card leaves every missing set the moment its count goes from 0 to 1
/// and never returns. Missing sets are ordered, so "first missing" always
/// means the lowest id.
#[derive(Debug, Clone)]
pub struct CollectionState<'a> {
    catalog: &'a Catalog,
    counts: Vec<u32>,
    missing_by_home: HashMap<Home, BTreeSet<CardId>>,
    missing_by_tier: [BTreeSet<CardId>; 8],
    all_missing: BTreeSet<CardId>,
    duplicates: u64,
}

impl<'a> CollectionState<'a> {
    /// Fresh state with nothing owned.
    pub fn new(catalog: &'a Catalog) -> Self {
        let mut missing_by_home: HashMap<Home, BTreeSet<CardId>> = catalog
            .collections()
            .iter()
            .map(|name| (Home::collection(name), BTreeSet::new()))
            .collect();
        let mut missing_by_tier: [BTreeSet<CardId>; 8] = Default::default();

        for card in catalog.cards() {
            missing_by_home
                .entry(card.home.clone())
                .or_default()
                .insert(card.id);
            missing_by_tier[card.rarity.index()].insert(card.id);
        }

        Self {
            catalog,
            counts: vec![0; catalog.len()],
            missing_by_home,
            missing_by_tier,
            all_missing: (0..catalog.len()).collect(),
            duplicates: 0,
        }
    }

    /// Records one pulled copy. Returns `true` if the card was new.
    pub fn record_draw(&mut self, card: CardId) -> bool {
        let Some(count) = self.counts.get_mut(card) else {
            return false;
        };
        *count += 1;
        if *count == 1 {
            self.mark_owned(card);
            true
        } else {
            self.duplicates += 1;
            false
        }
    }

    /// Takes a missing card without drawing it. Returns `false` and leaves
    /// the count alone if the card is already owned.
    pub fn acquire(&mut self, card: CardId) -> bool {
        match self.counts.get_mut(card) {
            Some(count) if *count == 0 => {
                *count = 1;
                self.mark_owned(card);
                true
            }
            _ => false,
        }
    }

    fn mark_owned(&mut self, card: CardId) {
        let catalog = self.catalog;
        let Card { home, rarity, .. } = &catalog.cards()[card];
        if let Some(missing) = self.missing_by_home.get_mut(home) {
            missing.remove(&card);
        }
        self.missing_by_tier[rarity.index()].remove(&card);
        self.all_missing.remove(&card);
    }

    pub fn count(&self, card: CardId) -> u32 {
        self.counts.get(card).copied().unwrap_or(0)
    }

    pub fn is_owned(&self, card: CardId) -> bool {
        self.count(card) > 0
    }

    /// Missing cards whose home is `collection`. Shared cards are not
    /// included.
    pub fn missing_for(&self, collection: &str) -> Option<&BTreeSet<CardId>> {
        self.missing_by_home.get(&Home::collection(collection))
    }

    pub fn missing_shared(&self) -> Option<&BTreeSet<CardId>> {
        self.missing_by_home.get(&Home::Shared)
    }

    pub fn collection_complete(&self, collection: &str) -> bool {
        self.missing_for(collection).map_or(true, |m| m.is_empty())
    }

    pub fn all_missing(&self) -> &BTreeSet<CardId> {
        &self.all_missing
    }

    pub fn is_complete(&self) -> bool {
        self.all_missing.is_empty()
    }

    /// Lowest-id missing card of the rarest tier that still has gaps.
    pub fn rarest_missing(&self) -> Option<(CardId, RarityTier)> {
        RarityTier::ALL.iter().find_map(|&tier| {
            self.missing_by_tier[tier.index()]
                .first()
                .map(|&card| (card, tier))
        })
    }

    /// Copies pulled of cards already owned.
    pub fn duplicates(&self) -> u64 {
        self.duplicates
    }
}
