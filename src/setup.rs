//! Immutable tables shared by every run, and the JSON file they load from.

use crate::cards::{
    build_catalog, build_pack_definitions, Catalog, CatalogDefinition, OddsTable, PackDefinitions,
    PackOpener,
};
use crate::error::ConfigResult;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Catalog, odds, and the pack pools built from them. Built once, then
/// only borrowed.
#[derive(Debug, Clone)]
pub struct Simulation {
    catalog: Catalog,
    odds: OddsTable,
    packs: PackDefinitions,
}

impl Simulation {
    pub fn new(catalog: Catalog, odds: OddsTable) -> ConfigResult<Self> {
        let packs = build_pack_definitions(&catalog, &odds)?;
        Ok(Self {
            catalog,
            odds,
            packs,
        })
    }

    /// Assembles a simulation from pools that skipped the build-time checks.
    #[cfg(test)]
    pub(crate) fn from_parts(catalog: Catalog, odds: OddsTable, packs: PackDefinitions) -> Self {
        Self {
            catalog,
            odds,
            packs,
        }
    }

    /// Built-in catalog and odds.
    pub fn standard() -> ConfigResult<Self> {
        Self::new(build_catalog(), OddsTable::standard())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn odds(&self) -> &OddsTable {
        &self.odds
    }

    pub fn packs(&self) -> &PackDefinitions {
        &self.packs
    }

    pub fn opener(&self) -> PackOpener<'_> {
        PackOpener::new(&self.packs, &self.odds)
    }
}

/// On-disk form of a custom setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetupFile {
    pub catalog: CatalogDefinition,
    #[serde(default = "OddsTable::standard")]
    pub odds: OddsTable,
}

impl SetupFile {
    pub fn standard() -> Self {
        Self {
            catalog: CatalogDefinition::standard(),
            odds: OddsTable::standard(),
        }
    }

    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn into_simulation(self) -> ConfigResult<Simulation> {
        let catalog = Catalog::from_definition(&self.catalog)?;
        Simulation::new(catalog, self.odds)
    }
}
