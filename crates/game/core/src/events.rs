//! Outcome events.
//!
//! Every board mutation performed while resolving an action appends one
//! event. The resulting log is enough for a caller to diff the board against
//! the previous snapshot without re-running the rules.

use crate::combat::DamageType;
use crate::state::{GameResult, PieceId, Position, Side};

/// Why gold changed hands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum GoldReason {
    Kill,
    Income,
    Bounty,
    Refund,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GameEvent {
    TurnStarted {
        round: u32,
        side: Side,
    },
    Moved {
        piece: PieceId,
        from: Position,
        to: Position,
    },
    Attacked {
        attacker: PieceId,
        target: PieceId,
        critical: bool,
    },
    /// `amount` is the mitigated and amplified damage before shields;
    /// `hp_lost` is what actually left the HP pool.
    Damaged {
        source: Option<PieceId>,
        target: PieceId,
        damage_type: DamageType,
        amount: i32,
        absorbed: i32,
        hp_lost: i32,
    },
    Healed {
        piece: PieceId,
        amount: i32,
    },
    HpCostPaid {
        piece: PieceId,
        amount: i32,
    },
    ShieldGranted {
        piece: PieceId,
        tag: String,
        amount: i32,
    },
    ShieldBroken {
        piece: PieceId,
        tag: String,
    },
    ShieldExpired {
        piece: PieceId,
        tag: String,
    },
    DebuffApplied {
        piece: PieceId,
        debuff: String,
        duration: i32,
    },
    DebuffRefused {
        piece: PieceId,
        debuff: String,
    },
    DebuffExpired {
        piece: PieceId,
        debuff: String,
    },
    ImmunityConsumed {
        piece: PieceId,
        item: String,
    },
    DeathPrevented {
        piece: PieceId,
    },
    PieceSlain {
        piece: PieceId,
        killer: Option<PieceId>,
        round: u32,
    },
    /// Observed by the scheduler to pay monster bounties.
    MonsterSlain {
        monster: PieceId,
        unit: String,
        killer_side: Side,
    },
    GoldAwarded {
        side: Side,
        amount: u32,
        reason: GoldReason,
    },
    GoldSpent {
        side: Side,
        amount: u32,
    },
    ItemPurchased {
        piece: PieceId,
        item: String,
        consumed: Vec<String>,
    },
    AbilityUsed {
        piece: PieceId,
        ability: String,
    },
    /// A passive or on-hit ability fired.
    AbilityTriggered {
        piece: PieceId,
        ability: String,
    },
    SkillMissed {
        piece: PieceId,
        target: PieceId,
    },
    CooldownReset {
        piece: PieceId,
    },
    Promoted {
        piece: PieceId,
        from: String,
        to: String,
    },
    SoldierRecruited {
        soldier: PieceId,
        emperor: PieceId,
    },
    Pulled {
        piece: PieceId,
        from: Position,
        to: Position,
    },
    Blinked {
        piece: PieceId,
        from: Position,
        to: Position,
    },
    PieceRemoved {
        piece: PieceId,
    },
    MonsterSpawned {
        piece: PieceId,
        unit: String,
        position: Position,
    },
    GameFinished {
        result: GameResult,
    },
}
