//! Unit template loader.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, bail, ensure};
use battler_core::{ChampionKind, UnitTemplate};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Unit catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitCatalog {
    pub units: Vec<UnitTemplate>,
}

/// Loader for unit templates from RON files.
pub struct UnitLoader;

impl UnitLoader {
    /// Load unit templates from a RON file containing a [`UnitCatalog`].
    pub fn load(path: &Path) -> LoadResult<Vec<UnitTemplate>> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("invalid unit catalog {}", path.display()))
    }

    /// Parses and validates a unit catalog from memory.
    ///
    /// Rejects duplicate keys, non-positive max HP, and promotion targets
    /// that are not in the same catalog. A behavior key that names no
    /// champion is kept but logged, since the engine falls back to the base
    /// behavior for it.
    pub fn parse(content: &str) -> LoadResult<Vec<UnitTemplate>> {
        let catalog: UnitCatalog =
            ron::from_str(content).context("failed to parse unit catalog RON")?;

        let mut names = BTreeSet::new();
        for unit in &catalog.units {
            if !names.insert(unit.name.as_str()) {
                bail!("duplicate unit '{}'", unit.name);
            }
            ensure!(
                unit.stats.max_hp > 0,
                "unit '{}' has non-positive max_hp {}",
                unit.name,
                unit.stats.max_hp
            );
            let behavior = unit.behavior.as_deref().unwrap_or(&unit.name);
            if behavior.parse::<ChampionKind>().is_err() {
                tracing::warn!(unit = %unit.name, behavior, "no champion behavior; using base");
            }
        }
        for unit in &catalog.units {
            if let Some(next) = &unit.promotes_to {
                ensure!(
                    names.contains(next.as_str()),
                    "unit '{}' promotes to unknown unit '{next}'",
                    unit.name
                );
            }
        }

        tracing::debug!(count = catalog.units.len(), "unit catalog parsed");
        Ok(catalog.units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_template() {
        let ron = r#"(
            units: [
                (
                    name: "king",
                    display_name: "King",
                    stats: (max_hp: 120, attack: 15, speed: 1, attack_range: 1),
                ),
            ],
        )"#;

        let units = UnitLoader::parse(ron).expect("valid");
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].stats.max_hp, 120);
        assert_eq!(units[0].stats.ability_power, 0);
        assert!(units[0].ability.is_none());
    }

    #[test]
    fn duplicate_and_dangling_promotion_are_rejected() {
        let duplicate = r#"(units: [
            (name: "a", display_name: "A", stats: (max_hp: 1)),
            (name: "a", display_name: "A", stats: (max_hp: 1)),
        ])"#;
        let dangling = r#"(units: [
            (
                name: "minion",
                display_name: "Minion",
                stats: (max_hp: 1),
                promotes_to: Some("ghost"),
            ),
        ])"#;

        assert!(UnitLoader::parse(duplicate).is_err());
        let err = UnitLoader::parse(dangling).expect_err("dangling");
        assert!(format!("{err:#}").contains("ghost"));
    }

    #[test]
    fn geometry_flags_parse_and_survive_a_round_trip() {
        use battler_core::{Directions, MovementFlags};

        let ron = r#"(units: [
            (
                name: "minion",
                display_name: "Minion",
                stats: (max_hp: 40),
                move_directions: ("VERTICAL"),
                attack_directions: ("HORIZONTAL | DIAGONAL"),
                movement: ("CANNOT_MOVE_BACKWARD"),
            ),
        ])"#;

        let units = UnitLoader::parse(ron).expect("flags parse");
        assert_eq!(units[0].move_directions, Directions::VERTICAL);
        assert_eq!(
            units[0].attack_directions,
            Directions::HORIZONTAL | Directions::DIAGONAL
        );
        assert_eq!(units[0].movement, MovementFlags::CANNOT_MOVE_BACKWARD);

        let written = ron::to_string(&UnitCatalog { units }).expect("serialize");
        let reread = UnitLoader::parse(&written).expect("reparse");
        assert_eq!(reread[0].move_directions, Directions::VERTICAL);
        assert_eq!(reread[0].movement, MovementFlags::CANNOT_MOVE_BACKWARD);
    }

    #[test]
    fn bare_string_flags_are_rejected() {
        let ron = r#"(units: [
            (
                name: "minion",
                display_name: "Minion",
                stats: (max_hp: 40),
                movement: "CANNOT_MOVE_BACKWARD",
            ),
        ])"#;

        assert!(UnitLoader::parse(ron).is_err());
    }

    #[test]
    fn range_alias_is_not_a_stat() {
        let ron = r#"(units: [
            (name: "archer", display_name: "Archer", stats: (max_hp: 10, range: 3)),
        ])"#;

        assert!(UnitLoader::parse(ron).is_err());
    }
}
