//! Deterministic rules engine for a turn-based, chess-like battler.
//!
//! `battler-core` owns every board mutation: the effective-stat pipeline,
//! movement and targeting geometry, damage and mitigation, debuff and aura
//! lifecycles, per-champion ability hooks, and the turn scheduler that
//! sequences them. All state changes flow through [`engine::GameEngine`];
//! transport, persistence and rendering live outside this crate.
pub mod action;
pub mod champions;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod events;
pub mod state;
pub mod stats;
pub mod status;
pub mod testing;

pub use action::{ActionCommand, ActionOutcome, EventKind, TargetingError};
pub use champions::{Champion, ChampionKind, EffectContext, SkillTarget};
pub use combat::{DamageReport, DamageSource, DamageType};
pub use config::{GameConfig, MonsterSpawn, ShieldBreakerPolicy};
pub use engine::{ActionError, ExecuteError, GameEngine};
pub use env::{
    AbilitySpec, CombatRng, GameEnv, ItemDefinition, ItemOracle, ItemTag, MonsterBounty, PcgRng,
    ScriptedRng, StaticCatalog, UnitOracle, UnitTemplate,
};
pub use error::{ErrorSeverity, GameError};
pub use events::{GameEvent, GoldReason};
pub use state::{
    Ability, AbilityKind, Aura, AuraFilter, BaseStats, Debuff, DebuffClass, Directions, GameResult,
    GameState, GameStatus, ItemInstance, MovementFlags, Piece, PieceId, Position, Shield,
    ShieldQueue, Side, TargetType, Treasury,
};
pub use stats::{Condition, ModifierOp, StatKind, StatModifier, effective_stat};
