//! Content factory for building the catalog from data files.

use std::path::{Path, PathBuf};

use anyhow::ensure;
use battler_core::{GameConfig, ItemDefinition, StaticCatalog, UnitTemplate};

use crate::loaders::{ConfigLoader, ItemLoader, LoadResult, UnitLoader};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── units.ron
/// └── items.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the data shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load unit templates from `units.ron`.
    pub fn load_units(&self) -> LoadResult<Vec<UnitTemplate>> {
        UnitLoader::load(&self.data_dir.join("units.ron"))
    }

    /// Load item catalog from `items.ron`.
    pub fn load_items(&self) -> LoadResult<Vec<ItemDefinition>> {
        ItemLoader::load(&self.data_dir.join("items.ron"))
    }

    /// Loads units and items into one catalog and checks that every
    /// scheduled monster of `config` has a template.
    pub fn load_catalog(&self, config: &GameConfig) -> LoadResult<StaticCatalog> {
        let units = self.load_units()?;
        let items = self.load_items()?;

        for spawn in &config.monster_spawns {
            ensure!(
                units.iter().any(|unit| unit.name == spawn.unit),
                "monster spawn references unknown unit '{}'",
                spawn.unit
            );
        }

        let catalog = StaticCatalog::from_parts(units, items);
        tracing::info!(
            dir = %self.data_dir.display(),
            units = catalog.unit_count(),
            items = catalog.item_count(),
            "content loaded"
        );
        Ok(catalog)
    }

    /// Loads the configuration and the catalog built against it.
    pub fn load_all(&self) -> LoadResult<(GameConfig, StaticCatalog)> {
        let config = self.load_config()?;
        let catalog = self.load_catalog(&config)?;
        Ok((config, catalog))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
