//! Authoritative board representation.
//!
//! The board is an arena of pieces addressed by stable [`PieceId`]. Nothing
//! holds a reference back into the board; every resolution step receives it
//! explicitly through the engine's effect context.
mod common;
mod effects;
mod item;
mod piece;
#[cfg(feature = "serde")]
mod root;

pub use common::{PieceId, Position, Side};
pub use effects::{
    AURA_PREFIX, Aura, AuraFilter, Debuff, DebuffClass, INFINITE, Shield, ShieldQueue,
};
pub use item::ItemInstance;
pub use piece::{Ability, AbilityKind, BaseStats, Directions, MovementFlags, Piece, TargetType};

use crate::config::{GameConfig, MonsterSpawn};
use crate::env::UnitTemplate;

/// Final result of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GameResult {
    Winner(Side),
    Draw,
}

/// Lifecycle of a game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GameStatus {
    #[default]
    InProgress,
    Finished(GameResult),
}

impl GameStatus {
    pub fn is_finished(&self) -> bool {
        matches!(self, GameStatus::Finished(_))
    }
}

/// Gold held by each player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Treasury {
    pub blue: u32,
    pub red: u32,
}

impl Treasury {
    pub fn new(starting_gold: u32) -> Self {
        Self {
            blue: starting_gold,
            red: starting_gold,
        }
    }

    /// Gold of `side`. Neutral pieces have no purse.
    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Blue => self.blue,
            Side::Red => self.red,
            Side::Neutral => 0,
        }
    }

    pub fn credit(&mut self, side: Side, amount: u32) {
        match side {
            Side::Blue => self.blue = self.blue.saturating_add(amount),
            Side::Red => self.red = self.red.saturating_add(amount),
            Side::Neutral => {}
        }
    }

    /// Removes `amount` from `side`, returning false (and leaving the purse
    /// untouched) if it cannot afford it.
    pub fn debit(&mut self, side: Side, amount: u32) -> bool {
        let purse = match side {
            Side::Blue => &mut self.blue,
            Side::Red => &mut self.red,
            Side::Neutral => return false,
        };
        match purse.checked_sub(amount) {
            Some(rest) => {
                *purse = rest;
                true
            }
            None => false,
        }
    }
}

/// Spawn bookkeeping for one scheduled neutral monster.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterTimer {
    pub spawn: MonsterSpawn,
    /// Round at which the monster (re)appears; `None` while alive or retired.
    pub next_round: Option<u32>,
    /// The live monster, if any.
    pub current: Option<PieceId>,
}

impl MonsterTimer {
    pub fn new(spawn: MonsterSpawn) -> Self {
        let next_round = Some(spawn.first_round);
        Self {
            spawn,
            next_round,
            current: None,
        }
    }
}

/// Canonical snapshot of one game.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// Round counter; its parity decides whose turn it is.
    pub round: u32,
    /// All pieces, both players and neutral monsters, in creation order.
    pub pieces: Vec<Piece>,
    pub treasury: Treasury,
    pub status: GameStatus,
    pub monsters: Vec<MonsterTimer>,
    /// Monotonic id allocator; ids are never reused.
    next_piece_id: u32,
    /// Monotonic stamp used to order debuff creation.
    next_stamp: u64,
}

impl GameState {
    /// Creates an empty board at round 0 with the configured starting gold
    /// and monster schedule.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            round: 0,
            pieces: Vec::new(),
            treasury: Treasury::new(config.starting_gold),
            status: GameStatus::InProgress,
            monsters: config
                .monster_spawns
                .iter()
                .cloned()
                .map(MonsterTimer::new)
                .collect(),
            next_piece_id: 1,
            next_stamp: 1,
        }
    }

    /// The side whose turn is active.
    pub fn active_side(&self) -> Side {
        Side::for_round(self.round)
    }

    pub fn allocate_id(&mut self) -> PieceId {
        let id = PieceId(self.next_piece_id);
        self.next_piece_id += 1;
        id
    }

    pub fn next_stamp(&mut self) -> u64 {
        let stamp = self.next_stamp;
        self.next_stamp += 1;
        stamp
    }

    /// Places a new piece built from `template` and returns its id.
    pub fn spawn(&mut self, template: &UnitTemplate, side: Side, position: Position) -> PieceId {
        let id = self.allocate_id();
        self.pieces
            .push(Piece::from_template(id, template, side, position));
        id
    }

    /// Inserts an already-built piece, assigning it a fresh id.
    pub fn insert(&mut self, mut piece: Piece) -> PieceId {
        let id = self.allocate_id();
        piece.id = id;
        self.pieces.push(piece);
        id
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id == id)
    }

    pub fn piece_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.pieces.iter_mut().find(|p| p.id == id)
    }

    /// The living piece on `position`, if any.
    pub fn piece_at(&self, position: Position) -> Option<&Piece> {
        self.pieces
            .iter()
            .find(|p| p.is_alive() && p.position == position)
    }

    pub fn is_occupied(&self, position: Position) -> bool {
        self.piece_at(position).is_some()
    }

    /// Ids of all pieces in board order. Taken as a snapshot so callers can
    /// mutate while iterating.
    pub fn ids(&self) -> Vec<PieceId> {
        self.pieces.iter().map(|p| p.id).collect()
    }

    pub fn living(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().filter(|p| p.is_alive())
    }

    /// Living pieces linked to `parent`.
    pub fn linked_to(&self, parent: PieceId) -> impl Iterator<Item = &Piece> {
        self.living().filter(move |p| p.linked_to == Some(parent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::PieceBuilder;

    #[test]
    fn ids_are_never_reused() {
        let mut state = GameState::new(&GameConfig::without_monsters());
        let a = state.insert(PieceBuilder::new("a").build());
        state.pieces.clear();
        let b = state.insert(PieceBuilder::new("b").build());

        assert_ne!(a, b);
    }

    #[test]
    fn piece_at_ignores_the_dead() {
        let mut state = GameState::new(&GameConfig::without_monsters());
        let id = state.insert(PieceBuilder::new("a").at(2, 2).build());
        assert!(state.is_occupied(Position::new(2, 2)));

        if let Some(piece) = state.piece_mut(id) {
            piece.hp = 0;
        }
        assert!(!state.is_occupied(Position::new(2, 2)));
    }

    #[test]
    fn treasury_refuses_overdraft() {
        let mut treasury = Treasury::new(5);
        assert!(!treasury.debit(Side::Blue, 6));
        assert_eq!(treasury.get(Side::Blue), 5);
        assert!(treasury.debit(Side::Blue, 5));
        assert_eq!(treasury.get(Side::Blue), 0);
    }
}
