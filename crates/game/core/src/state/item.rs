use crate::env::{ItemDefinition, ItemTag};
use crate::stats::StatModifier;

/// An item held by a piece.
///
/// Holds a copy of the catalog effects so the stat pipeline never needs the
/// catalog at evaluation time.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemInstance {
    pub name: String,
    pub effects: Vec<StatModifier>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Vec<ItemTag>,
    /// Gold paid for the item; credited back when it is consumed by a recipe.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cost: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub unique: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub consumable: bool,
}

impl ItemInstance {
    pub fn from_definition(definition: &ItemDefinition) -> Self {
        Self {
            name: definition.name.clone(),
            effects: definition.effects.clone(),
            tags: definition.tags.clone(),
            cost: definition.cost,
            unique: definition.unique,
            consumable: definition.consumable,
        }
    }

    pub fn with_effects(name: impl Into<String>, effects: Vec<StatModifier>) -> Self {
        Self {
            name: name.into(),
            effects,
            tags: Vec::new(),
            cost: 0,
            unique: false,
            consumable: false,
        }
    }

    pub fn tagged(mut self, tag: ItemTag) -> Self {
        self.tags.push(tag);
        self
    }

    pub fn has_tag(&self, tag: ItemTag) -> bool {
        self.tags.contains(&tag)
    }
}
