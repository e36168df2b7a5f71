//! Piece representation: base stats, geometry flags, ability and attachments.

use std::collections::BTreeMap;

use arrayvec::ArrayVec;
use bitflags::bitflags;

use crate::champions::ChampionKind;
use crate::combat::percent_of;
use crate::config::GameConfig;
use crate::env::{AbilitySpec, UnitTemplate};
use crate::state::{Aura, Debuff, DebuffClass, ItemInstance, PieceId, Position, ShieldQueue, Side};
use crate::stats::StatKind;

/// Unmodified stat block copied from a unit template.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct BaseStats {
    pub max_hp: i32,
    pub attack: i32,
    pub ability_power: i32,
    pub physical_resistance: i32,
    pub magic_resistance: i32,
    pub speed: i32,
    pub attack_range: i32,
    pub gold_value: i32,
    pub sunder: i32,
    pub critical_chance: i32,
    pub critical_damage: i32,
    pub cooldown_reduction: i32,
    pub lifesteal: i32,
    pub damage_amplification: i32,
}

impl BaseStats {
    pub fn get(&self, stat: StatKind) -> i32 {
        match stat {
            StatKind::MaxHp => self.max_hp,
            StatKind::Attack => self.attack,
            StatKind::AbilityPower => self.ability_power,
            StatKind::PhysicalResistance => self.physical_resistance,
            StatKind::MagicResistance => self.magic_resistance,
            StatKind::Speed => self.speed,
            StatKind::AttackRange => self.attack_range,
            StatKind::GoldValue => self.gold_value,
            StatKind::Sunder => self.sunder,
            StatKind::CriticalChance => self.critical_chance,
            StatKind::CriticalDamage => self.critical_damage,
            StatKind::CooldownReduction => self.cooldown_reduction,
            StatKind::Lifesteal => self.lifesteal,
            StatKind::DamageAmplification => self.damage_amplification,
        }
    }

    pub fn set(&mut self, stat: StatKind, value: i32) {
        let slot = match stat {
            StatKind::MaxHp => &mut self.max_hp,
            StatKind::Attack => &mut self.attack,
            StatKind::AbilityPower => &mut self.ability_power,
            StatKind::PhysicalResistance => &mut self.physical_resistance,
            StatKind::MagicResistance => &mut self.magic_resistance,
            StatKind::Speed => &mut self.speed,
            StatKind::AttackRange => &mut self.attack_range,
            StatKind::GoldValue => &mut self.gold_value,
            StatKind::Sunder => &mut self.sunder,
            StatKind::CriticalChance => &mut self.critical_chance,
            StatKind::CriticalDamage => &mut self.critical_damage,
            StatKind::CooldownReduction => &mut self.cooldown_reduction,
            StatKind::Lifesteal => &mut self.lifesteal,
            StatKind::DamageAmplification => &mut self.damage_amplification,
        };
        *slot = value;
    }
}

bitflags! {
    /// Line shapes a piece may move or attack along.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Directions: u8 {
        const HORIZONTAL = 1 << 0;
        const VERTICAL   = 1 << 1;
        const DIAGONAL   = 1 << 2;
        const ORTHOGONAL = Self::HORIZONTAL.bits() | Self::VERTICAL.bits();
        const ALL = Self::ORTHOGONAL.bits() | Self::DIAGONAL.bits();
    }
}

impl Default for Directions {
    fn default() -> Self {
        Directions::ALL
    }
}

bitflags! {
    /// Movement restrictions layered on top of the direction shape.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct MovementFlags: u8 {
        /// Moves may never increase the distance to the enemy's back rank.
        const CANNOT_MOVE_BACKWARD = 1 << 0;
        /// Moves may not have a horizontal component.
        const VERTICAL_ONLY        = 1 << 1;
    }
}

/// Whether an ability is triggered by the player or runs on its own.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AbilityKind {
    #[default]
    Active,
    Passive,
}

/// What a skill command must point at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TargetType {
    /// Self-cast; any target square is ignored.
    #[default]
    None,
    /// An empty or occupied square reachable like a move.
    Square,
    /// A friendly piece reachable like an attack.
    Ally,
    /// A hostile piece reachable like an attack.
    Enemy,
    /// Any piece reachable like an attack.
    Any,
}

/// A piece's ability with its live cooldown state.
///
/// `payload` is free-form per-ability state: tunables copied from the
/// template (`damage`, `ratio`, ...) plus counters a champion keeps between
/// turns (`fury`, `empowered`, ...).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ability {
    pub name: String,
    pub kind: AbilityKind,
    pub cooldown: i32,
    pub current_cooldown: i32,
    pub range: i32,
    pub target: TargetType,
    pub payload: BTreeMap<String, i64>,
}

impl Ability {
    pub fn from_spec(spec: &AbilitySpec) -> Self {
        Self {
            name: spec.name.clone(),
            kind: spec.kind,
            cooldown: spec.cooldown,
            current_cooldown: spec.initial_cooldown.max(0),
            range: spec.range,
            target: spec.target,
            payload: spec.payload.clone(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.current_cooldown == 0
    }

    /// Starts the cooldown, shortened by `reduction` percent (floored).
    pub fn start_cooldown(&mut self, reduction: i32) {
        let reduction = reduction.clamp(0, 100);
        self.current_cooldown = percent_of(self.cooldown, 100 - reduction).max(0);
    }

    pub fn tick_cooldown(&mut self) {
        self.current_cooldown = (self.current_cooldown - 1).max(0);
    }

    pub fn param(&self, key: &str) -> Option<i64> {
        self.payload.get(key).copied()
    }

    /// Reads a payload value as `i32`, saturating and falling back to `default`.
    pub fn param_i32(&self, key: &str, default: i32) -> i32 {
        self.param(key)
            .map(|v| v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
            .unwrap_or(default)
    }

    pub fn set_param(&mut self, key: &str, value: i64) {
        self.payload.insert(key.to_owned(), value);
    }
}

/// A unit occupying one board square.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Piece {
    pub id: PieceId,
    /// Catalog key of the template this piece was built from.
    pub unit: String,
    pub name: String,
    pub kind: ChampionKind,
    pub side: Side,
    pub position: Position,
    pub hp: i32,
    pub stats: BaseStats,
    pub move_directions: Directions,
    pub attack_directions: Directions,
    pub movement: MovementFlags,
    pub items: ArrayVec<ItemInstance, { GameConfig::MAX_ITEMS }>,
    pub debuffs: Vec<Debuff>,
    pub auras: Vec<Aura>,
    pub shields: ShieldQueue,
    pub ability: Option<Ability>,
    /// Set when the piece moves; cleared when its side's next turn begins.
    pub has_moved: bool,
    /// Successful auto-attacks made over the piece's lifetime.
    pub attack_count: u32,
    /// Round in which the piece's HP reached zero.
    pub death_round: Option<u32>,
    /// Parent piece whose death also kills this one.
    pub linked_to: Option<PieceId>,
    /// Template this piece turns into on the opposing back rank.
    pub promotes_to: Option<String>,
}

impl Piece {
    /// Builds a fresh piece at full HP from a catalog template.
    pub fn from_template(
        id: PieceId,
        template: &UnitTemplate,
        side: Side,
        position: Position,
    ) -> Self {
        let mut piece = Self {
            id,
            unit: template.name.clone(),
            name: template.display_name.clone(),
            kind: ChampionKind::resolve(template.behavior.as_deref().unwrap_or(&template.name)),
            side,
            position,
            hp: 0,
            stats: template.stats.clone(),
            move_directions: template.move_directions,
            attack_directions: template.attack_directions,
            movement: template.movement,
            items: ArrayVec::new(),
            debuffs: Vec::new(),
            auras: template.auras.clone(),
            shields: ShieldQueue::new(),
            ability: template.ability.as_ref().map(Ability::from_spec),
            has_moved: false,
            attack_count: 0,
            death_round: None,
            linked_to: None,
            promotes_to: template.promotes_to.clone(),
        };
        piece.debuffs = piece.kind.behavior().innate_effects();
        piece.hp = piece.max_hp();
        piece
    }

    /// Permanently replaces this piece's identity with `template`, keeping
    /// id, side, position, items and attachments, and restoring full HP.
    pub fn transform_into(&mut self, template: &UnitTemplate) {
        let innate: Vec<String> = self
            .kind
            .behavior()
            .innate_effects()
            .into_iter()
            .map(|d| d.id)
            .collect();
        self.debuffs.retain(|d| !innate.contains(&d.id));

        self.unit = template.name.clone();
        self.name = template.display_name.clone();
        self.kind = ChampionKind::resolve(template.behavior.as_deref().unwrap_or(&template.name));
        self.debuffs.extend(self.kind.behavior().innate_effects());
        self.stats = template.stats.clone();
        self.move_directions = template.move_directions;
        self.attack_directions = template.attack_directions;
        self.movement = template.movement;
        self.auras = template.auras.clone();
        self.ability = template.ability.as_ref().map(Ability::from_spec);
        self.promotes_to = template.promotes_to.clone();
        self.hp = self.max_hp();
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn is_neutral(&self) -> bool {
        self.side == Side::Neutral
    }

    pub fn has_class(&self, class: DebuffClass) -> bool {
        self.debuffs.iter().any(|d| d.class == class)
    }

    pub fn is_stunned(&self) -> bool {
        self.has_class(DebuffClass::Stun)
    }

    pub fn is_rooted(&self) -> bool {
        self.has_class(DebuffClass::Root)
    }

    pub fn is_wounded(&self) -> bool {
        self.has_class(DebuffClass::Wounded)
    }

    pub fn has_debuff(&self, id: &str) -> bool {
        self.debuffs.iter().any(|d| d.id == id)
    }

    pub fn has_item_tag(&self, tag: crate::env::ItemTag) -> bool {
        self.items.iter().any(|item| item.has_tag(tag))
    }

    /// Clamps HP into `[0, max_hp]` against the current effective max HP.
    pub fn clamp_hp(&mut self) {
        let max = self.max_hp();
        self.hp = self.hp.clamp(0, max);
    }

    /// Whether the piece stands on the row where the opposing side starts.
    pub fn on_enemy_back_rank(&self, board_height: i32) -> bool {
        match self.side {
            Side::Blue => self.position.y == board_height - 1,
            Side::Red => self.position.y == 0,
            Side::Neutral => false,
        }
    }
}
