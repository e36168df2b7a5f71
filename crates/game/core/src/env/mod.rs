//! Read-only reference data consumed by the engine.
//!
//! Unit and item catalogs are static lookup tables; the engine never mutates
//! them. [`GameEnv`] bundles them with the game configuration so the
//! resolution path can reach everything it needs through one handle.
mod catalog;
mod items;
mod rng;
mod units;

pub use catalog::StaticCatalog;
pub use items::{ItemDefinition, ItemOracle, ItemTag};
pub use rng::{CombatRng, PcgRng, ScriptedRng};
pub use units::{AbilitySpec, MonsterBounty, UnitOracle, UnitTemplate};

use crate::config::GameConfig;

/// Aggregates the read-only oracles required by the engine.
#[derive(Clone, Copy)]
pub struct GameEnv<'a> {
    units: &'a dyn UnitOracle,
    items: &'a dyn ItemOracle,
    config: &'a GameConfig,
}

impl<'a> GameEnv<'a> {
    pub fn new(
        units: &'a dyn UnitOracle,
        items: &'a dyn ItemOracle,
        config: &'a GameConfig,
    ) -> Self {
        Self {
            units,
            items,
            config,
        }
    }

    /// Uses one catalog for both units and items.
    pub fn with_catalog(catalog: &'a StaticCatalog, config: &'a GameConfig) -> Self {
        Self::new(catalog, catalog, config)
    }

    pub fn units(&self) -> &'a dyn UnitOracle {
        self.units
    }

    pub fn items(&self) -> &'a dyn ItemOracle {
        self.items
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config
    }

    pub fn template(&self, name: &str) -> Option<&'a UnitTemplate> {
        self.units.template(name)
    }

    pub fn item(&self, name: &str) -> Option<&'a ItemDefinition> {
        self.items.definition(name)
    }
}

impl std::fmt::Debug for GameEnv<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEnv")
            .field("units", &self.units.unit_names().len())
            .field("items", &self.items.item_names().len())
            .field("config", self.config)
            .finish()
    }
}
