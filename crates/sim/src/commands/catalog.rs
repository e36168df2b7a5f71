//! List the units and items of a content directory.

use std::path::PathBuf;

use anyhow::Result;
use battler_core::{ChampionKind, ItemOracle, UnitOracle};
use clap::Parser;
use console::style;

/// List loaded units and items
#[derive(Parser)]
pub struct Catalog {
    /// Content directory (defaults to the bundled data)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

impl Catalog {
    pub fn execute(self) -> Result<()> {
        let (_, catalog) = super::content(self.data_dir).load_all()?;

        println!("{}", style("Units:").bold().yellow());
        for name in catalog.unit_names() {
            let Some(unit) = catalog.template(name) else {
                continue;
            };
            let behavior = unit.behavior.as_deref().unwrap_or(name);
            let kind = behavior.parse::<ChampionKind>().unwrap_or_default();
            let ability = unit.ability.as_ref().map_or("-", |a| a.name.as_str());
            println!(
                "  {:<14} {:<14} hp {:>3}  atk {:>2}  ap {:>2}  ability {}",
                name, kind, unit.stats.max_hp, unit.stats.attack, unit.stats.ability_power, ability
            );
        }
        println!();

        println!("{}", style("Items:").bold().yellow());
        for name in catalog.item_names() {
            let Some(item) = catalog.definition(name) else {
                continue;
            };
            let recipe = if item.recipe.is_empty() {
                String::new()
            } else {
                format!("  from {}", item.recipe.join(" + "))
            };
            println!("  {:<20} {:>2}g{}", name, item.cost, recipe);
        }
        Ok(())
    }
}
