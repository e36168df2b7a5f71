//! Error types for the action pipeline.

use crate::action::{EventKind, TargetingError};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{PieceId, Position, Side};

/// A declined action. Always detected before any mutation: the board is
/// left exactly as it was.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    #[error("game is already finished")]
    GameFinished,

    #[error("it is {0}'s turn")]
    NotYourTurn(Side),

    #[error("neutral pieces cannot be commanded")]
    NeutralCaster,

    #[error("caster is stunned")]
    Stunned,

    #[error("caster is rooted")]
    Rooted,

    #[error("{kind} requires a target square")]
    MissingTarget { kind: EventKind },

    #[error("invalid geometry: {0}")]
    Targeting(#[from] TargetingError),

    #[error("destination {0} is occupied")]
    Occupied(Position),

    #[error("no piece to target at {0}")]
    NoTarget(Position),

    #[error("target {0} is not hostile")]
    NotHostile(PieceId),

    #[error("target {0} is not an ally")]
    NotAlly(PieceId),

    #[error("piece has no ability")]
    NoAbility,

    #[error("ability is passive")]
    PassiveAbility,

    #[error("ability is on cooldown ({0} turns)")]
    OnCooldown(i32),

    #[error("invalid skill target: {0}")]
    InvalidSkillTarget(String),

    #[error("buy_item requires an item id")]
    MissingItem,

    #[error("unknown item '{0}'")]
    UnknownItem(String),

    #[error("not enough gold: need {needed}, have {available}")]
    InsufficientGold { needed: u32, available: u32 },

    #[error("item slots are full")]
    ItemCapReached,

    #[error("unique item '{0}' already held")]
    UniqueItemHeld(String),
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        use ActionError::*;
        match self {
            GameFinished | NeutralCaster => ErrorSeverity::Validation,
            NotYourTurn(_) | Stunned | Rooted => ErrorSeverity::Recoverable,
            MissingTarget { .. } | MissingItem | UnknownItem(_) => ErrorSeverity::Validation,
            Targeting(inner) => inner.severity(),
            Occupied(_) | NoTarget(_) | NotHostile(_) | NotAlly(_) => ErrorSeverity::Recoverable,
            NoAbility | PassiveAbility | InvalidSkillTarget(_) => ErrorSeverity::Validation,
            OnCooldown(_) => ErrorSeverity::Recoverable,
            InsufficientGold { .. } | ItemCapReached | UniqueItemHeld(_) => {
                ErrorSeverity::Recoverable
            }
        }
    }

    fn error_code(&self) -> &'static str {
        use ActionError::*;
        match self {
            GameFinished => "ACTION_GAME_FINISHED",
            NotYourTurn(_) => "ACTION_NOT_YOUR_TURN",
            NeutralCaster => "ACTION_NEUTRAL_CASTER",
            Stunned => "ACTION_STUNNED",
            Rooted => "ACTION_ROOTED",
            MissingTarget { .. } => "ACTION_MISSING_TARGET",
            Targeting(inner) => inner.error_code(),
            Occupied(_) => "ACTION_OCCUPIED",
            NoTarget(_) => "ACTION_NO_TARGET",
            NotHostile(_) => "ACTION_NOT_HOSTILE",
            NotAlly(_) => "ACTION_NOT_ALLY",
            NoAbility => "ACTION_NO_ABILITY",
            PassiveAbility => "ACTION_PASSIVE_ABILITY",
            OnCooldown(_) => "ACTION_ON_COOLDOWN",
            InvalidSkillTarget(_) => "ACTION_INVALID_SKILL_TARGET",
            MissingItem => "ACTION_MISSING_ITEM",
            UnknownItem(_) => "ACTION_UNKNOWN_ITEM",
            InsufficientGold { .. } => "ACTION_INSUFFICIENT_GOLD",
            ItemCapReached => "ACTION_ITEM_CAP_REACHED",
            UniqueItemHeld(_) => "ACTION_UNIQUE_ITEM_HELD",
        }
    }
}

/// Errors surfaced by [`GameEngine::process_action`](super::GameEngine::process_action).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecuteError {
    /// The action was declined; nothing changed.
    #[error("action rejected: {0}")]
    Rejected(#[from] ActionError),

    /// No piece of the acting side stands on the caster square.
    #[error("no {side} piece at {position}")]
    CasterNotFound { side: Side, position: Position },

    /// The command names a target piece that is not on the target square.
    #[error("target mismatch: expected {expected}, found {found:?}")]
    TargetMismatch {
        expected: PieceId,
        found: Option<PieceId>,
    },
}

impl ExecuteError {
    /// True for declined actions, false for integrity failures.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    pub fn as_rejection(&self) -> Option<&ActionError> {
        match self {
            Self::Rejected(inner) => Some(inner),
            _ => None,
        }
    }
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Rejected(inner) => inner.severity(),
            Self::CasterNotFound { .. } | Self::TargetMismatch { .. } => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Rejected(inner) => inner.error_code(),
            Self::CasterNotFound { .. } => "EXECUTE_CASTER_NOT_FOUND",
            Self::TargetMismatch { .. } => "EXECUTE_TARGET_MISMATCH",
        }
    }
}
