//! Scenario replay for the battler engine.
//!
//! A scenario is a RON file naming the pieces on the board and the commands
//! to play against it. [`replay`] resolves them through
//! [`GameEngine`](battler_core::GameEngine) with a seeded RNG and records
//! every step, so the same file and seed always end in the same state root.

pub mod replay;
pub mod scenario;

pub use replay::{Replay, Step, replay};
pub use scenario::{Placement, Scenario};
