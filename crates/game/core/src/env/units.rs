use std::collections::BTreeMap;

use crate::state::{AbilityKind, Aura, BaseStats, Debuff, Directions, MovementFlags, TargetType};

/// Read-only lookup of unit templates by catalog key.
pub trait UnitOracle {
    fn template(&self, name: &str) -> Option<&UnitTemplate>;

    /// All catalog keys, in stable order.
    fn unit_names(&self) -> Vec<&str>;
}

/// Ability definition as written in the unit catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilitySpec {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: AbilityKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cooldown: i32,
    /// Cooldown the piece starts the game with.
    #[cfg_attr(feature = "serde", serde(default))]
    pub initial_cooldown: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub range: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub target: TargetType,
    /// Per-ability tunables (`damage`, `ratio`, `duration`, ...).
    #[cfg_attr(feature = "serde", serde(default))]
    pub payload: BTreeMap<String, i64>,
}

impl AbilitySpec {
    pub fn active(name: impl Into<String>, cooldown: i32, range: i32, target: TargetType) -> Self {
        Self {
            name: name.into(),
            kind: AbilityKind::Active,
            cooldown,
            initial_cooldown: 0,
            range,
            target,
            payload: BTreeMap::new(),
        }
    }

    pub fn passive(name: impl Into<String>, cooldown: i32) -> Self {
        Self {
            name: name.into(),
            kind: AbilityKind::Passive,
            cooldown,
            initial_cooldown: 0,
            range: 0,
            target: TargetType::None,
            payload: BTreeMap::new(),
        }
    }

    pub fn with_param(mut self, key: &str, value: i64) -> Self {
        self.payload.insert(key.to_owned(), value);
        self
    }
}

/// Reward for slaying a neutral monster, paid to the killer's side.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterBounty {
    #[cfg_attr(feature = "serde", serde(default))]
    pub gold: u32,
    /// Team-wide buff granted to every living piece of the killer's side.
    #[cfg_attr(feature = "serde", serde(default))]
    pub buff: Option<Debuff>,
}

/// Static definition a piece is cloned from.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitTemplate {
    /// Catalog key; also selects the champion behavior unless `behavior` is set.
    pub name: String,
    pub display_name: String,
    pub stats: BaseStats,
    #[cfg_attr(feature = "serde", serde(default))]
    pub move_directions: Directions,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attack_directions: Directions,
    #[cfg_attr(feature = "serde", serde(default))]
    pub movement: MovementFlags,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ability: Option<AbilitySpec>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub auras: Vec<Aura>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub promotes_to: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bounty: Option<MonsterBounty>,
    /// Behavior key overriding `name` when several templates share one.
    #[cfg_attr(feature = "serde", serde(default))]
    pub behavior: Option<String>,
}

impl UnitTemplate {
    pub fn new(name: impl Into<String>, stats: BaseStats) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            name,
            stats,
            move_directions: Directions::ALL,
            attack_directions: Directions::ALL,
            movement: MovementFlags::empty(),
            ability: None,
            auras: Vec::new(),
            promotes_to: None,
            bounty: None,
            behavior: None,
        }
    }

    pub fn with_ability(mut self, ability: AbilitySpec) -> Self {
        self.ability = Some(ability);
        self
    }

    pub fn with_aura(mut self, aura: Aura) -> Self {
        self.auras.push(aura);
        self
    }

    pub fn with_movement(mut self, movement: MovementFlags) -> Self {
        self.movement = movement;
        self
    }

    pub fn promoting_to(mut self, unit: impl Into<String>) -> Self {
        self.promotes_to = Some(unit.into());
        self
    }

    pub fn with_bounty(mut self, bounty: MonsterBounty) -> Self {
        self.bounty = Some(bounty);
        self
    }
}
