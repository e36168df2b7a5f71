//! Timed effects attached to pieces: debuffs, auras and shields.

use crate::combat::DamageType;
use crate::state::{PieceId, Side};
use crate::stats::StatModifier;

/// Prefix marking debuffs projected by an aura. These are never ticked by
/// turn processing; the aura refresh pass owns their lifetime.
pub const AURA_PREFIX: &str = "aura:";

/// Duration value meaning "until explicitly removed".
pub const INFINITE: i32 = -1;

/// Crowd-control class of a debuff.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum DebuffClass {
    /// Plain stat/periodic effect.
    #[default]
    Generic,
    /// Healing received is reduced.
    Wounded,
    /// The piece cannot act.
    Stun,
    /// The piece cannot move.
    Root,
    /// Hostile debuffs are refused.
    Immunity,
}

/// A timed effect bundling stat modifiers and periodic damage/heal.
///
/// Buffs are debuffs with positive modifiers; the engine makes no distinction
/// beyond the caster's side when deciding whether an immunity applies.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Debuff {
    pub id: String,
    /// Turns remaining; [`INFINITE`] never expires on its own.
    pub duration: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<StatModifier>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage_per_turn: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage_type: DamageType,
    #[cfg_attr(feature = "serde", serde(default))]
    pub heal_per_turn: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub unique: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub class: DebuffClass,
    #[cfg_attr(feature = "serde", serde(default))]
    pub caster: Option<PieceId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub caster_side: Option<Side>,
    /// Board stamp at application, for stable ordering in outcomes.
    #[cfg_attr(feature = "serde", serde(default))]
    pub created_at: u64,
}

impl Debuff {
    pub fn new(id: impl Into<String>, duration: i32) -> Self {
        Self {
            id: id.into(),
            duration,
            effects: Vec::new(),
            damage_per_turn: 0,
            damage_type: DamageType::default(),
            heal_per_turn: 0,
            unique: false,
            class: DebuffClass::Generic,
            caster: None,
            caster_side: None,
            created_at: 0,
        }
    }

    pub fn with_effects(mut self, effects: Vec<StatModifier>) -> Self {
        self.effects = effects;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn class(mut self, class: DebuffClass) -> Self {
        self.class = class;
        self
    }

    pub fn damage_over_time(mut self, amount: i32, damage_type: DamageType) -> Self {
        self.damage_per_turn = amount;
        self.damage_type = damage_type;
        self
    }

    pub fn heal_over_time(mut self, amount: i32) -> Self {
        self.heal_per_turn = amount;
        self
    }

    pub fn cast_by(mut self, caster: PieceId, side: Side) -> Self {
        self.caster = Some(caster);
        self.caster_side = Some(side);
        self
    }

    pub fn is_aura_projection(&self) -> bool {
        self.id.starts_with(AURA_PREFIX)
    }

    pub fn is_infinite(&self) -> bool {
        self.duration == INFINITE
    }

    /// Duration ordering for unique replacement: infinite outlasts everything.
    pub fn outlasts(&self, other: &Debuff) -> bool {
        match (self.is_infinite(), other.is_infinite()) {
            (true, true) => false,
            (true, false) => true,
            (false, true) => false,
            (false, false) => self.duration > other.duration,
        }
    }

    /// Returns true if the debuff was applied by an opponent of `side`.
    /// Debuffs without a recorded caster are treated as hostile.
    pub fn is_hostile_to(&self, side: Side) -> bool {
        self.caster_side.is_none_or(|c| c.is_hostile_to(side))
    }
}

/// Which pieces an aura reaches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AuraFilter {
    Allies,
    Enemies,
    All,
}

impl AuraFilter {
    pub fn matches(self, source: Side, candidate: Side) -> bool {
        match self {
            AuraFilter::Allies => source == candidate,
            AuraFilter::Enemies => source.is_hostile_to(candidate),
            AuraFilter::All => true,
        }
    }
}

/// A range-based effect continuously projected as a debuff onto nearby pieces.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aura {
    pub id: String,
    /// Chebyshev radius.
    pub range: u32,
    pub filter: AuraFilter,
    #[cfg_attr(feature = "serde", serde(default = "default_true"))]
    pub active: bool,
    #[cfg_attr(feature = "serde", serde(default = "default_true"))]
    pub requires_caster_alive: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<StatModifier>,
}

#[cfg(feature = "serde")]
fn default_true() -> bool {
    true
}

impl Aura {
    pub fn new(id: impl Into<String>, range: u32, filter: AuraFilter) -> Self {
        Self {
            id: id.into(),
            range,
            filter,
            active: true,
            requires_caster_alive: true,
            effects: Vec::new(),
        }
    }

    pub fn with_effects(mut self, effects: Vec<StatModifier>) -> Self {
        self.effects = effects;
        self
    }

    /// Id of the debuff this aura projects.
    pub fn debuff_id(&self) -> String {
        format!("{AURA_PREFIX}{}", self.id)
    }

    /// Builds the synthetic debuff placed on each piece in range.
    pub fn project(&self, caster: PieceId, caster_side: Side, stamp: u64) -> Debuff {
        let mut debuff = Debuff::new(self.debuff_id(), INFINITE)
            .with_effects(self.effects.clone())
            .cast_by(caster, caster_side);
        debuff.created_at = stamp;
        debuff
    }
}

// ============================================================================
// Shields
// ============================================================================

/// A damage-absorption buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shield {
    pub amount: i32,
    /// Turns remaining; [`INFINITE`] never expires on its own.
    pub duration: i32,
    pub tag: String,
}

impl Shield {
    pub fn new(tag: impl Into<String>, amount: i32, duration: i32) -> Self {
        Self {
            amount: amount.max(0),
            duration,
            tag: tag.into(),
        }
    }
}

/// Shields in consumption order: index 0 absorbs first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShieldQueue {
    shields: Vec<Shield>,
}

impl ShieldQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a shield to the back of the queue. Empty shields are dropped.
    pub fn push(&mut self, shield: Shield) {
        if shield.amount > 0 {
            self.shields.push(shield);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.shields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.shields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shield> {
        self.shields.iter()
    }

    pub fn total(&self) -> i32 {
        self.shields.iter().map(|s| s.amount).sum()
    }

    /// Absorbs `damage` front to back and returns the part that got through.
    ///
    /// A shield that reaches exactly zero is removed; the relative order of
    /// the remaining shields is preserved. The tags of broken shields are
    /// appended to `broken`.
    pub fn absorb(&mut self, damage: i32, broken: &mut Vec<String>) -> i32 {
        let mut remaining = damage.max(0);
        while remaining > 0 {
            let Some(front) = self.shields.first_mut() else {
                break;
            };
            if front.amount > remaining {
                front.amount -= remaining;
                remaining = 0;
            } else {
                remaining -= front.amount;
                broken.push(self.shields.remove(0).tag);
            }
        }
        remaining
    }

    /// Halves every stored amount (floored), dropping shields that reach zero.
    pub fn halve(&mut self, broken: &mut Vec<String>) {
        for shield in &mut self.shields {
            shield.amount /= 2;
        }
        self.retain_positive(broken);
    }

    /// Decrements finite durations and removes expired shields, returning
    /// the tags that expired.
    pub fn tick(&mut self) -> Vec<String> {
        let mut expired = Vec::new();
        for shield in &mut self.shields {
            if shield.duration > 0 {
                shield.duration -= 1;
            }
        }
        self.shields.retain(|shield| {
            let keep = shield.duration != 0;
            if !keep {
                expired.push(shield.tag.clone());
            }
            keep
        });
        expired
    }

    fn retain_positive(&mut self, broken: &mut Vec<String>) {
        self.shields.retain(|shield| {
            let keep = shield.amount > 0;
            if !keep {
                broken.push(shield.tag.clone());
            }
            keep
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue(amounts: &[i32]) -> ShieldQueue {
        let mut q = ShieldQueue::new();
        for (i, amount) in amounts.iter().enumerate() {
            q.push(Shield::new(format!("s{i}"), *amount, INFINITE));
        }
        q
    }

    #[test]
    fn absorbs_front_to_back() {
        let mut q = queue(&[10, 20, 30]);
        let mut broken = Vec::new();

        assert_eq!(q.absorb(15, &mut broken), 0);
        assert_eq!(broken, vec!["s0".to_string()]);
        let left: Vec<_> = q.iter().map(|s| (s.tag.as_str(), s.amount)).collect();
        assert_eq!(left, vec![("s1", 15), ("s2", 30)]);
    }

    #[test]
    fn exact_break_removes_the_shield() {
        let mut q = queue(&[50]);
        let mut broken = Vec::new();

        assert_eq!(q.absorb(50, &mut broken), 0);
        assert!(q.is_empty());
    }

    #[test]
    fn overflow_passes_through() {
        let mut q = queue(&[10, 5]);
        let mut broken = Vec::new();

        assert_eq!(q.absorb(40, &mut broken), 25);
        assert!(q.is_empty());
        assert_eq!(broken.len(), 2);
    }

    #[test]
    fn halve_floors_and_drops_emptied_shields() {
        let mut q = queue(&[9, 1, 20]);
        let mut broken = Vec::new();

        q.halve(&mut broken);

        assert_eq!(broken, vec!["s1".to_string()]);
        let left: Vec<_> = q.iter().map(|s| (s.tag.as_str(), s.amount)).collect();
        assert_eq!(left, vec![("s0", 4), ("s2", 10)]);
    }

    #[test]
    fn tick_expires_finite_shields_only() {
        let mut q = ShieldQueue::new();
        q.push(Shield::new("brief", 10, 1));
        q.push(Shield::new("lasting", 10, INFINITE));

        assert_eq!(q.tick(), vec!["brief".to_string()]);
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn unique_replacement_ordering_treats_infinite_as_longest() {
        let finite = Debuff::new("burn", 3);
        let infinite = Debuff::new("burn", INFINITE);

        assert!(infinite.outlasts(&finite));
        assert!(!finite.outlasts(&infinite));
        assert!(!finite.outlasts(&finite.clone()));
    }
}
