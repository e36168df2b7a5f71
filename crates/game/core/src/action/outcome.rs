use super::EventKind;
use crate::events::{GameEvent, GoldReason};
use crate::state::{GameStatus, PieceId, Side};

/// What resolving one command did to the board.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionOutcome {
    /// Round in which the command was resolved.
    pub round: u32,
    pub acting_side: Side,
    pub kind: EventKind,
    /// Every mutation, in order, including turn advancement.
    pub events: Vec<GameEvent>,
    /// Status after the action and turn advancement.
    pub status: GameStatus,
}

impl ActionOutcome {
    /// Total HP lost by all pieces.
    pub fn total_hp_lost(&self) -> i32 {
        self.events
            .iter()
            .map(|event| match event {
                GameEvent::Damaged { hp_lost, .. } => *hp_lost,
                _ => 0,
            })
            .sum()
    }

    /// Total pre-shield damage dealt.
    pub fn total_damage(&self) -> i32 {
        self.events
            .iter()
            .map(|event| match event {
                GameEvent::Damaged { amount, .. } => *amount,
                _ => 0,
            })
            .sum()
    }

    pub fn kills(&self) -> Vec<PieceId> {
        self.events
            .iter()
            .filter_map(|event| match event {
                GameEvent::PieceSlain { piece, .. } => Some(*piece),
                _ => None,
            })
            .collect()
    }

    /// Gold gained by `side` for the given reason.
    pub fn gold_awarded(&self, side: Side, reason: GoldReason) -> u32 {
        self.events
            .iter()
            .map(|event| match event {
                GameEvent::GoldAwarded {
                    side: s,
                    amount,
                    reason: r,
                } if *s == side && *r == reason => *amount,
                _ => 0,
            })
            .sum()
    }

    pub fn has_event(&self, predicate: impl Fn(&GameEvent) -> bool) -> bool {
        self.events.iter().any(predicate)
    }
}
