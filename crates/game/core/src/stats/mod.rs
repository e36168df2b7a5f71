//! Effective-stat pipeline.
//!
//! A piece's current value for any stat is computed on demand from its base
//! value, then folded through every matching item effect (in item order) and
//! every matching debuff effect (in debuff order). Modifiers are applied
//! **sequentially against the running value**: `+10` then `x2` differs from
//! `x2` then `+10`. The final value is floored and clamped to be non-negative.
//!
//! Nothing here caches; callers re-evaluate after every mutation.

use crate::state::Piece;

/// Canonical stat keys.
///
/// `attack_range` is the only accepted spelling for the attack-range stat;
/// the alias `range` is rejected at parse time.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum StatKind {
    MaxHp,
    Attack,
    AbilityPower,
    PhysicalResistance,
    MagicResistance,
    Speed,
    AttackRange,
    GoldValue,
    Sunder,
    CriticalChance,
    CriticalDamage,
    CooldownReduction,
    Lifesteal,
    DamageAmplification,
}

/// How a modifier combines with the running value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ModifierOp {
    /// `running + value`
    Add,
    /// `running * value / 100` (value is a percentage: 200 doubles)
    Multiply,
    /// `value`, discarding the running value
    Set,
}

/// Predicate gating a modifier, evaluated against the piece that owns it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Condition {
    /// Current HP strictly below the given percentage of max HP.
    HpBelowPercent(i32),
    /// Current HP strictly above the given percentage of max HP.
    HpAbovePercent(i32),
    /// At least one shield is active.
    HasShield,
    /// The piece moved during its side's current turn.
    HasMoved,
    /// The piece has not moved during its side's current turn.
    NotMoved,
}

impl Condition {
    /// Evaluates the predicate.
    ///
    /// HP thresholds compare against the *unconditional* max HP (base plus
    /// ungated modifiers) so that a conditional max-HP modifier cannot make
    /// its own condition recursive.
    pub fn holds(&self, piece: &Piece) -> bool {
        match *self {
            Condition::HpBelowPercent(pct) => {
                let max = unconditional_stat(piece, StatKind::MaxHp);
                (piece.hp as i64) * 100 < (max as i64) * pct as i64
            }
            Condition::HpAbovePercent(pct) => {
                let max = unconditional_stat(piece, StatKind::MaxHp);
                (piece.hp as i64) * 100 > (max as i64) * pct as i64
            }
            Condition::HasShield => !piece.shields.is_empty(),
            Condition::HasMoved => piece.has_moved,
            Condition::NotMoved => !piece.has_moved,
        }
    }
}

/// A single stat modifier carried by an item effect, debuff or aura.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatModifier {
    pub stat: StatKind,
    pub op: ModifierOp,
    pub value: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub condition: Option<Condition>,
}

impl StatModifier {
    pub fn add(stat: StatKind, value: i32) -> Self {
        Self {
            stat,
            op: ModifierOp::Add,
            value,
            condition: None,
        }
    }

    /// Percentage multiplier: `multiply(Attack, 150)` is x1.5.
    pub fn multiply(stat: StatKind, percent: i32) -> Self {
        Self {
            stat,
            op: ModifierOp::Multiply,
            value: percent,
            condition: None,
        }
    }

    pub fn set(stat: StatKind, value: i32) -> Self {
        Self {
            stat,
            op: ModifierOp::Set,
            value,
            condition: None,
        }
    }

    pub fn when(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    fn apply(&self, running: f64) -> f64 {
        match self.op {
            ModifierOp::Add => running + f64::from(self.value),
            ModifierOp::Multiply => running * f64::from(self.value) / 100.0,
            ModifierOp::Set => f64::from(self.value),
        }
    }
}

/// Computes the effective value of `stat` for `piece`.
pub fn effective_stat(piece: &Piece, stat: StatKind) -> i32 {
    fold(piece, stat, true)
}

fn unconditional_stat(piece: &Piece, stat: StatKind) -> i32 {
    fold(piece, stat, false)
}

fn fold(piece: &Piece, stat: StatKind, evaluate_conditions: bool) -> i32 {
    let item_effects = piece.items.iter().flat_map(|item| item.effects.iter());
    let debuff_effects = piece.debuffs.iter().flat_map(|d| d.effects.iter());
    let base = f64::from(piece.stats.get(stat));

    let running = item_effects
        .chain(debuff_effects)
        .filter(|modifier| modifier.stat == stat)
        .filter(|modifier| match modifier.condition {
            None => true,
            Some(condition) => evaluate_conditions && condition.holds(piece),
        })
        .fold(base, |acc, modifier| modifier.apply(acc));

    let floored = running.max(0.0).floor();
    if floored >= f64::from(i32::MAX) {
        i32::MAX
    } else {
        floored as i32
    }
}

// ============================================================================
// Derived getters
// ============================================================================

impl Piece {
    pub fn stat(&self, stat: StatKind) -> i32 {
        effective_stat(self, stat)
    }

    pub fn max_hp(&self) -> i32 {
        self.stat(StatKind::MaxHp)
    }

    pub fn attack(&self) -> i32 {
        self.stat(StatKind::Attack)
    }

    pub fn ability_power(&self) -> i32 {
        self.stat(StatKind::AbilityPower)
    }

    pub fn physical_resistance(&self) -> i32 {
        self.stat(StatKind::PhysicalResistance)
    }

    pub fn magic_resistance(&self) -> i32 {
        self.stat(StatKind::MagicResistance)
    }

    pub fn speed(&self) -> i32 {
        self.stat(StatKind::Speed)
    }

    pub fn attack_range(&self) -> i32 {
        self.stat(StatKind::AttackRange)
    }

    pub fn gold_value(&self) -> i32 {
        self.stat(StatKind::GoldValue)
    }

    pub fn sunder(&self) -> i32 {
        self.stat(StatKind::Sunder)
    }

    pub fn critical_chance(&self) -> i32 {
        self.stat(StatKind::CriticalChance)
    }

    pub fn critical_damage(&self) -> i32 {
        self.stat(StatKind::CriticalDamage)
    }

    pub fn cooldown_reduction(&self) -> i32 {
        self.stat(StatKind::CooldownReduction)
    }

    pub fn lifesteal(&self) -> i32 {
        self.stat(StatKind::Lifesteal)
    }

    pub fn damage_amplification(&self) -> i32 {
        self.stat(StatKind::DamageAmplification)
    }
}
