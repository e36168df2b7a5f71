//! Item catalog loader.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, bail, ensure};
use battler_core::{GameConfig, ItemDefinition};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub items: Vec<ItemDefinition>,
}

/// Loader for item catalog from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load item catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<ItemDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("invalid item catalog {}", path.display()))
    }

    /// Parses and validates an item catalog from memory.
    ///
    /// Every recipe component must be another item of the catalog, no item
    /// may list itself, and a recipe can never need more slots than a piece
    /// has.
    pub fn parse(content: &str) -> LoadResult<Vec<ItemDefinition>> {
        let catalog: ItemCatalog =
            ron::from_str(content).context("failed to parse item catalog RON")?;

        let mut by_name = BTreeMap::new();
        for item in &catalog.items {
            if by_name.insert(item.name.as_str(), item).is_some() {
                bail!("duplicate item '{}'", item.name);
            }
        }
        for item in &catalog.items {
            ensure!(
                item.recipe.len() <= GameConfig::MAX_ITEMS,
                "item '{}' needs {} components but a piece holds at most {}",
                item.name,
                item.recipe.len(),
                GameConfig::MAX_ITEMS
            );
            for component in &item.recipe {
                ensure!(component != &item.name, "item '{}' lists itself", item.name);
                ensure!(
                    by_name.contains_key(component.as_str()),
                    "item '{}' needs unknown component '{component}'",
                    item.name
                );
            }
        }

        tracing::debug!(count = catalog.items.len(), "item catalog parsed");
        Ok(catalog.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battler_core::{ItemTag, ModifierOp, StatKind};

    #[test]
    fn parses_effects_tags_and_recipes() {
        let ron = r#"(
            items: [
                (name: "long_sword", cost: 4, effects: [(stat: attack, op: add, value: 10)]),
                (
                    name: "giants_bane",
                    cost: 9,
                    effects: [(stat: attack, op: multiply, value: 110)],
                    recipe: ["long_sword"],
                    unique: true,
                    tags: [giant_slayer],
                ),
            ],
        )"#;

        let items = ItemLoader::parse(ron).expect("valid");
        let bane = &items[1];
        assert_eq!(bane.recipe, vec!["long_sword".to_owned()]);
        assert_eq!(bane.tags, vec![ItemTag::GiantSlayer]);
        assert_eq!(bane.effects[0].stat, StatKind::Attack);
        assert_eq!(bane.effects[0].op, ModifierOp::Multiply);
        assert!(bane.unique);
        assert!(!bane.consumable);
    }

    #[test]
    fn unknown_component_is_rejected() {
        let ron = r#"(items: [(name: "crown", cost: 5, recipe: ["gem"])])"#;

        let err = ItemLoader::parse(ron).expect_err("dangling");
        assert!(format!("{err:#}").contains("gem"));
    }
}
