//! Deterministic command replay.

use battler_core::{
    ActionCommand, ActionOutcome, CombatRng, GameEngine, GameEnv, GameError, GameEvent, GameState,
    GameStatus,
};
use serde::Serialize;

/// Result of resolving one scripted command.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Step {
    Accepted {
        index: usize,
        outcome: ActionOutcome,
    },
    Rejected {
        index: usize,
        command: ActionCommand,
        code: &'static str,
        message: String,
    },
}

impl Step {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Step::Accepted { .. })
    }
}

/// A finished replay.
#[derive(Debug, Clone, Serialize)]
pub struct Replay {
    pub seed: u64,
    /// Events emitted while opening the board.
    pub opening: Vec<GameEvent>,
    pub steps: Vec<Step>,
    pub status: GameStatus,
    pub final_round: u32,
    /// Hex-encoded SHA-256 state root of the final board.
    pub state_root: String,
}

/// Plays `commands` against `state` in order.
///
/// Rejected commands are recorded and skipped. With `strict`, the replay
/// stops after the first rejection. Commands after the game ends are still
/// submitted and come back rejected.
pub fn replay(
    state: &mut GameState,
    env: GameEnv<'_>,
    rng: &mut dyn CombatRng,
    seed: u64,
    commands: &[ActionCommand],
    strict: bool,
) -> Replay {
    let mut engine = GameEngine::new(state);
    let opening = engine.open(env, rng);

    let mut steps = Vec::with_capacity(commands.len());
    for (index, command) in commands.iter().enumerate() {
        match engine.process_action(env, rng, command) {
            Ok(outcome) => {
                tracing::info!(
                    index,
                    round = outcome.round,
                    side = %outcome.acting_side,
                    kind = %outcome.kind,
                    events = outcome.events.len(),
                    "command resolved"
                );
                steps.push(Step::Accepted { index, outcome });
            }
            Err(error) => {
                tracing::warn!(index, code = error.error_code(), %error, "command rejected");
                steps.push(Step::Rejected {
                    index,
                    command: command.clone(),
                    code: error.error_code(),
                    message: error.to_string(),
                });
                if strict {
                    break;
                }
            }
        }
    }

    let state = engine.state();
    Replay {
        seed,
        opening,
        steps,
        status: state.status,
        final_round: state.round,
        state_root: hex::encode(state.state_root()),
    }
}
