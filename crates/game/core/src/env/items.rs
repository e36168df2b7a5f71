use crate::stats::StatModifier;

/// Read-only lookup of item definitions by catalog key.
pub trait ItemOracle {
    fn definition(&self, name: &str) -> Option<&ItemDefinition>;

    /// All catalog keys, in stable order.
    fn item_names(&self) -> Vec<&str>;
}

/// Special behavior attached to an item beyond its stat effects.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum ItemTag {
    /// Bonus damage amplification against high-HP targets.
    GiantSlayer,
    /// Reduces the target's shields before absorption (policy-gated).
    ShieldBreaker,
    /// Consumed to refuse one hostile debuff and grant brief immunity.
    DebuffImmunity,
    /// Auto-attacks apply the wounded debuff.
    Wounding,
}

/// Static item definition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub name: String,
    pub cost: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<StatModifier>,
    /// Component items consumed from the buyer's inventory on purchase.
    #[cfg_attr(feature = "serde", serde(default))]
    pub recipe: Vec<String>,
    /// A piece may hold at most one copy.
    #[cfg_attr(feature = "serde", serde(default))]
    pub unique: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Vec<ItemTag>,
    /// Removed from the holder once its tag effect fires.
    #[cfg_attr(feature = "serde", serde(default))]
    pub consumable: bool,
}

impl ItemDefinition {
    pub fn new(name: impl Into<String>, cost: u32, effects: Vec<StatModifier>) -> Self {
        Self {
            name: name.into(),
            cost,
            effects,
            recipe: Vec::new(),
            unique: false,
            tags: Vec::new(),
            consumable: false,
        }
    }

    pub fn with_recipe(mut self, components: &[&str]) -> Self {
        self.recipe = components.iter().map(|c| (*c).to_owned()).collect();
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn consumable(mut self) -> Self {
        self.consumable = true;
        self
    }

    pub fn tagged(mut self, tag: ItemTag) -> Self {
        self.tags.push(tag);
        self
    }
}
