//! Completion strategies: when to open packs, for which collection, and
//! when a run is over.
//!
//! A run is an explicit loop over [`RunState`] step methods. All run
//! counters live on the state value; nothing is captured by closures.

use super::collection::CollectionState;
use crate::cards::{CardId, Catalog, PackOpener, RarityTier};
use crate::error::DrawResult;
use crate::setup::Simulation;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Grind each collection's packs until it is complete, then the
    /// default collection's packs until nothing is missing.
    GreedyAll,
    /// Rotate between incomplete collections, buying the rarest missing
    /// card whenever the pack-point balance covers it.
    CurrencyAssisted,
}

impl Strategy {
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::GreedyAll => "greedy-all",
            Strategy::CurrencyAssisted => "currency-assisted",
        }
    }

    /// Runs one completion from an empty collection.
    pub fn run(
        &self,
        sim: &Simulation,
        points_per_pack: u64,
        rng: &mut impl Rng,
    ) -> DrawResult<RunRecord> {
        match self {
            Strategy::GreedyAll => run_greedy_all(sim, rng),
            Strategy::CurrencyAssisted => run_currency_assisted(sim, points_per_pack, rng),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A collection finishing mid-run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionEvent {
    pub collection: String,
    pub packs_opened: u64,
}

/// A card bought with pack points instead of pulled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    pub card: CardId,
    pub tier: RarityTier,
    pub price: u64,
    pub balance_before: u64,
    pub packs_opened: u64,
}

/// Everything one run produced. `packs_opened` is the outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRecord {
    pub strategy: Strategy,
    pub packs_opened: u64,
    pub completions: Vec<CompletionEvent>,
    pub purchases: Vec<Purchase>,
    pub final_points: u64,
    pub duplicates: u64,
    /// Cards still missing at the end. Always 0 for greedy-all; the
    /// currency strategy stops once every named collection is done.
    pub cards_missing: usize,
}

/// Mutable state of a single run.
#[derive(Debug, Clone)]
pub struct RunState<'a> {
    pub collection: CollectionState<'a>,
    pub packs_opened: u64,
    pub points: u64,
    completions: Vec<CompletionEvent>,
    purchases: Vec<Purchase>,
}

impl<'a> RunState<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            collection: CollectionState::new(catalog),
            packs_opened: 0,
            points: 0,
            completions: Vec::new(),
            purchases: Vec::new(),
        }
    }

    /// Opens one pack of `collection` and records every card in it.
    /// Returns how many of them were new.
    pub fn open_and_record(
        &mut self,
        opener: &PackOpener<'_>,
        collection: &str,
        rng: &mut impl Rng,
    ) -> DrawResult<usize> {
        let pack = opener.open_pack(collection, rng)?;
        self.packs_opened += 1;

        let mut new_cards = 0;
        for &card in &pack.cards {
            if self.collection.record_draw(card) {
                new_cards += 1;
            }
        }

        tracing::trace!(
            pack = self.packs_opened,
            collection,
            class = %pack.class,
            cards = pack.cards.len(),
            new_cards,
            "opened pack"
        );
        Ok(new_cards)
    }

    /// Buys the rarest missing card if the balance covers its price.
    pub fn try_purchase(&mut self) -> Option<&Purchase> {
        let (card, tier) = self.collection.rarest_missing()?;
        let price = tier.price();
        if price > self.points || !self.collection.acquire(card) {
            return None;
        }

        let purchase = Purchase {
            card,
            tier,
            price,
            balance_before: self.points,
            packs_opened: self.packs_opened,
        };
        self.points -= price;

        tracing::debug!(
            card,
            tier = %tier,
            price,
            balance = self.points,
            packs = self.packs_opened,
            "bought missing card"
        );
        self.purchases.push(purchase);
        self.purchases.last()
    }

    pub fn earn(&mut self, points: u64) {
        self.points += points;
    }

    pub fn mark_complete(&mut self, collection: &str) {
        tracing::debug!(collection, packs = self.packs_opened, "collection completed");
        self.completions.push(CompletionEvent {
            collection: collection.to_string(),
            packs_opened: self.packs_opened,
        });
    }

    pub fn finish(self, strategy: Strategy) -> RunRecord {
        RunRecord {
            strategy,
            packs_opened: self.packs_opened,
            completions: self.completions,
            purchases: self.purchases,
            final_points: self.points,
            duplicates: self.collection.duplicates(),
            cards_missing: self.collection.all_missing().len(),
        }
    }
}

fn run_greedy_all(sim: &Simulation, rng: &mut impl Rng) -> DrawResult<RunRecord> {
    let catalog = sim.catalog();
    let opener = sim.opener();
    let mut state = RunState::new(catalog);

    for collection in catalog.collections() {
        while !state.collection.collection_complete(collection) {
            state.open_and_record(&opener, collection, rng)?;
        }
        state.mark_complete(collection);
    }

    // Shared cards left over are chased through the default collection.
    let fallback = catalog.default_collection();
    while !state.collection.is_complete() {
        state.open_and_record(&opener, fallback, rng)?;
    }

    tracing::debug!(packs = state.packs_opened, "all cards completed");
    Ok(state.finish(Strategy::GreedyAll))
}

fn run_currency_assisted(
    sim: &Simulation,
    points_per_pack: u64,
    rng: &mut impl Rng,
) -> DrawResult<RunRecord> {
    let catalog = sim.catalog();
    let opener = sim.opener();
    let mut state = RunState::new(catalog);
    let mut incomplete: Vec<&str> = catalog.collections().iter().map(String::as_str).collect();

    while !incomplete.is_empty() {
        let rotation = incomplete.clone();
        for collection in rotation {
            if state.collection.collection_complete(collection) {
                state.mark_complete(collection);
                incomplete.retain(|&name| name != collection);
                continue;
            }

            state.open_and_record(&opener, collection, rng)?;
            // The balance checked here does not yet include this pack's points.
            state.try_purchase();
            state.earn(points_per_pack);
        }
    }

    Ok(state.finish(Strategy::CurrencyAssisted))
}
