//! Scenario files: an opening layout plus a command list.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result, bail, ensure};
use battler_core::{
    ActionCommand, GameConfig, GameState, ItemInstance, ItemOracle, Position, Side, StaticCatalog,
    UnitOracle,
};
use serde::{Deserialize, Serialize};

/// One piece of the opening layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Placement {
    /// Unit catalog key.
    pub unit: String,
    pub side: Side,
    pub position: Position,
    /// Starting HP; the template's max HP when absent.
    #[serde(default)]
    pub hp: Option<i32>,
    /// Item catalog keys attached before the first command.
    #[serde(default)]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: String,
    /// RNG seed; overridable from the command line.
    #[serde(default)]
    pub seed: u64,
    /// Keep the configured neutral monster schedule.
    #[serde(default = "default_monsters")]
    pub monsters: bool,
    pub pieces: Vec<Placement>,
    #[serde(default)]
    pub actions: Vec<ActionCommand>,
}

fn default_monsters() -> bool {
    true
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("invalid scenario {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        ron::from_str(content).context("failed to parse scenario RON")
    }

    /// Applies the scenario's monster switch to a loaded configuration.
    pub fn configure(&self, mut config: GameConfig) -> GameConfig {
        if !self.monsters {
            config.monster_spawns.clear();
        }
        config
    }

    /// Places every piece of the layout on a fresh board.
    pub fn build_board(&self, config: &GameConfig, catalog: &StaticCatalog) -> Result<GameState> {
        let mut state = GameState::new(config);
        let mut taken = BTreeSet::new();

        for placement in &self.pieces {
            let Some(template) = catalog.template(&placement.unit) else {
                bail!("unknown unit '{}'", placement.unit);
            };
            ensure!(
                config.contains(placement.position),
                "{} placed off the board at {}",
                placement.unit,
                placement.position
            );
            ensure!(
                taken.insert(placement.position),
                "two pieces placed on {}",
                placement.position
            );
            ensure!(
                placement.items.len() <= GameConfig::MAX_ITEMS,
                "{} holds more than {} items",
                placement.unit,
                GameConfig::MAX_ITEMS
            );

            let id = state.spawn(template, placement.side, placement.position);
            let Some(piece) = state.piece_mut(id) else {
                bail!("spawned piece {id} vanished");
            };
            for name in &placement.items {
                let Some(definition) = catalog.definition(name) else {
                    bail!("unknown item '{name}' on {}", placement.unit);
                };
                piece.items.push(ItemInstance::from_definition(definition));
            }
            if let Some(hp) = placement.hp {
                ensure!(
                    hp > 0,
                    "{} starts with non-positive hp {hp}",
                    placement.unit
                );
                piece.hp = hp.min(piece.max_hp());
            }
        }

        tracing::debug!(pieces = state.pieces.len(), "board built");
        Ok(state)
    }
}
