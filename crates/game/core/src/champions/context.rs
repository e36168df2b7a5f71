//! Mutable resolution context passed to every hook.

use crate::config::GameConfig;
use crate::env::{CombatRng, GameEnv};
use crate::events::GameEvent;
use crate::state::{GameState, Piece, PieceId, Side};

/// Everything one action's resolution may touch.
///
/// Hooks receive this instead of holding references to the board, so the
/// board stays an arena addressed by [`PieceId`].
pub struct EffectContext<'a> {
    /// Mutable board.
    pub state: &'a mut GameState,

    /// Read-only catalogs and configuration.
    pub env: GameEnv<'a>,

    /// Randomness for critical strikes and hit chances.
    pub rng: &'a mut dyn CombatRng,

    /// Outcome log accumulated during the action.
    pub events: Vec<GameEvent>,

    /// Current nesting of damage hooks.
    depth: u8,
}

impl<'a> EffectContext<'a> {
    pub fn new(state: &'a mut GameState, env: GameEnv<'a>, rng: &'a mut dyn CombatRng) -> Self {
        Self {
            state,
            env,
            rng,
            events: Vec::new(),
            depth: 0,
        }
    }

    pub fn config(&self) -> &'a GameConfig {
        self.env.config()
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.state.piece(id)
    }

    pub fn piece_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.state.piece_mut(id)
    }

    /// Returns the piece only if it is still alive.
    pub fn living(&self, id: PieceId) -> Option<&Piece> {
        self.state.piece(id).filter(|p| p.is_alive())
    }

    pub fn is_alive(&self, id: PieceId) -> bool {
        self.living(id).is_some()
    }

    pub fn side_of(&self, id: PieceId) -> Option<Side> {
        self.state.piece(id).map(|p| p.side)
    }

    /// Ids of living pieces hostile to `side`, in board order.
    pub fn enemies_of(&self, side: Side) -> Vec<PieceId> {
        self.state
            .living()
            .filter(|p| p.side.is_hostile_to(side))
            .map(|p| p.id)
            .collect()
    }

    /// Runs `f` one hook level deeper, or skips it once the nesting cap is
    /// reached. Returns `None` when skipped.
    pub fn nested<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> Option<R> {
        if self.depth >= GameConfig::MAX_HOOK_DEPTH {
            tracing::warn!(depth = self.depth, "hook nesting cap reached; skipping");
            return None;
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        Some(result)
    }

    pub fn into_events(self) -> Vec<GameEvent> {
        self.events
    }
}
