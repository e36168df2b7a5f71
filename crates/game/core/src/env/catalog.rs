use std::collections::BTreeMap;

use super::{ItemDefinition, ItemOracle, UnitOracle, UnitTemplate};

/// In-memory unit and item catalog keyed by name.
///
/// The content crate builds one from data files; tests build one by hand.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaticCatalog {
    units: BTreeMap<String, UnitTemplate>,
    items: BTreeMap<String, ItemDefinition>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(units: Vec<UnitTemplate>, items: Vec<ItemDefinition>) -> Self {
        let mut catalog = Self::new();
        for unit in units {
            catalog.insert_unit(unit);
        }
        for item in items {
            catalog.insert_item(item);
        }
        catalog
    }

    /// Adds or replaces a unit template, returning the previous one.
    pub fn insert_unit(&mut self, template: UnitTemplate) -> Option<UnitTemplate> {
        self.units.insert(template.name.clone(), template)
    }

    /// Adds or replaces an item definition, returning the previous one.
    pub fn insert_item(&mut self, definition: ItemDefinition) -> Option<ItemDefinition> {
        self.items.insert(definition.name.clone(), definition)
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

impl UnitOracle for StaticCatalog {
    fn template(&self, name: &str) -> Option<&UnitTemplate> {
        self.units.get(name)
    }

    fn unit_names(&self) -> Vec<&str> {
        self.units.keys().map(String::as_str).collect()
    }
}

impl ItemOracle for StaticCatalog {
    fn definition(&self, name: &str) -> Option<&ItemDefinition> {
        self.items.get(name)
    }

    fn item_names(&self) -> Vec<&str> {
        self.items.keys().map(String::as_str).collect()
    }
}
