//! Inbound action commands and their outcomes.
//!
//! # Module Structure
//!
//! - `validation`: movement/attack/ability geometry
//! - `outcome`: what the engine reports after resolving a command

pub mod outcome;
pub mod validation;

pub use outcome::ActionOutcome;
pub use validation::{TargetingError, validate_attack, validate_move, validate_skill_target};

use crate::state::{PieceId, Position, Side};

/// The four things a piece can do on its side's turn.
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
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EventKind {
    Move,
    Attack,
    Skill,
    BuyItem,
}

/// One player command against the current board.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionCommand {
    pub acting_side: Side,
    /// Square of the acting piece.
    pub caster: Position,
    pub kind: EventKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub target: Option<Position>,
    /// Item catalog key for `BuyItem`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub item: Option<String>,
    /// Expected id of the piece on `target`; checked for integrity.
    #[cfg_attr(feature = "serde", serde(default))]
    pub target_unit: Option<PieceId>,
}

impl ActionCommand {
    fn new(acting_side: Side, caster: Position, kind: EventKind) -> Self {
        Self {
            acting_side,
            caster,
            kind,
            target: None,
            item: None,
            target_unit: None,
        }
    }

    pub fn move_to(side: Side, caster: Position, dest: Position) -> Self {
        Self::new(side, caster, EventKind::Move).at(dest)
    }

    pub fn attack(side: Side, caster: Position, target: Position) -> Self {
        Self::new(side, caster, EventKind::Attack).at(target)
    }

    pub fn skill(side: Side, caster: Position, target: Option<Position>) -> Self {
        let mut command = Self::new(side, caster, EventKind::Skill);
        command.target = target;
        command
    }

    pub fn buy(side: Side, caster: Position, item: impl Into<String>) -> Self {
        let mut command = Self::new(side, caster, EventKind::BuyItem);
        command.item = Some(item.into());
        command
    }

    pub fn at(mut self, target: Position) -> Self {
        self.target = Some(target);
        self
    }

    pub fn expecting(mut self, unit: PieceId) -> Self {
        self.target_unit = Some(unit);
        self
    }
}
