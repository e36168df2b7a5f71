//! Game configuration loader.

use std::path::Path;

use anyhow::{Context, ensure};
use battler_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`GameConfig::new`]. Monster spawn squares
    /// must lie on the configured board.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Parses and validates config TOML from memory.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content).context("failed to parse config TOML")?;

        ensure!(
            config.board_width > 0 && config.board_height > 0,
            "board must be at least 1x1, got {}x{}",
            config.board_width,
            config.board_height
        );
        for spawn in &config.monster_spawns {
            ensure!(
                config.contains(spawn.position),
                "monster '{}' spawns off the board at {}",
                spawn.unit,
                spawn.position
            );
        }
        Ok(config)
    }
}
