//! Per-unit ability hooks.
//!
//! Every piece resolves through one shared algorithm (move, auto-attack,
//! damage, turn start). A [`Champion`] overrides named extension points of
//! that algorithm; anything it does not override falls back to the base
//! behavior. [`ChampionKind`] is the closed set of behaviors, selected by
//! unit name when a piece is built from its template.
//!
//! # Hook order
//!
//! ```text
//! move    : can_move_to → on_move
//! attack  : can_attack  → on_attack → [auto_attack → post_crit_damage?] → post_attack
//! skill   : validate_skill → on_skill → cooldown
//! damage  : ... → prevents_death? → lethality → post_taken_damage
//! turn    : pre_enter_turn (cooldowns, shields, debuffs, passives)
//! ```
mod base;
mod context;
mod fighters;
mod mages;
mod marksmen;
mod support;

pub use base::{BaseChampion, SOLDIER_UNIT};
pub use context::EffectContext;

use crate::action::{TargetingError, validate_attack, validate_move};
use crate::combat::{DamageSource, auto_attack};
use crate::config::GameConfig;
use crate::engine::ActionError;
use crate::env::GameEnv;
use crate::state::{Ability, Debuff, GameState, Piece, PieceId, Position};

/// Resolved target of a skill command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkillTarget {
    NoTarget,
    Square(Position),
    Piece { id: PieceId, position: Position },
}

impl SkillTarget {
    pub fn piece(&self) -> Option<PieceId> {
        match self {
            SkillTarget::Piece { id, .. } => Some(*id),
            _ => None,
        }
    }

    pub fn position(&self) -> Option<Position> {
        match self {
            SkillTarget::NoTarget => None,
            SkillTarget::Square(position) | SkillTarget::Piece { position, .. } => Some(*position),
        }
    }
}

/// Hook interface implemented by every unit behavior.
///
/// Validation hooks take the board immutably and run before any mutation;
/// resolution hooks receive the [`EffectContext`] and must not fail.
pub trait Champion: Send + Sync {
    fn can_move_to(
        &self,
        state: &GameState,
        config: &GameConfig,
        piece: &Piece,
        dest: Position,
    ) -> Result<(), TargetingError> {
        validate_move(state, config, piece, dest, piece.speed())
    }

    fn can_attack(
        &self,
        state: &GameState,
        config: &GameConfig,
        piece: &Piece,
        dest: Position,
    ) -> Result<(), TargetingError> {
        validate_attack(state, config, piece, dest, piece.attack_range())
    }

    /// Extra checks on a skill target, after readiness and geometry passed.
    fn validate_skill(
        &self,
        _state: &GameState,
        _env: &GameEnv<'_>,
        _piece: &Piece,
        _ability: &Ability,
        _target: &SkillTarget,
    ) -> Result<(), ActionError> {
        Ok(())
    }

    /// Permanent effects a piece of this kind carries from creation.
    fn innate_effects(&self) -> Vec<Debuff> {
        Vec::new()
    }

    fn on_move(&self, ctx: &mut EffectContext<'_>, me: PieceId, dest: Position) {
        base::move_piece(ctx, me, dest);
    }

    fn on_attack(&self, ctx: &mut EffectContext<'_>, me: PieceId, target: PieceId) {
        auto_attack(ctx, me, target, 100);
    }

    fn on_skill(&self, _ctx: &mut EffectContext<'_>, _me: PieceId, _target: SkillTarget) {}

    fn on_post_attack(
        &self,
        ctx: &mut EffectContext<'_>,
        me: PieceId,
        _target: PieceId,
        dealt: i32,
    ) {
        base::lifesteal(ctx, me, dealt);
    }

    fn on_post_crit_damage(
        &self,
        _ctx: &mut EffectContext<'_>,
        _me: PieceId,
        _target: PieceId,
        _dealt: i32,
    ) {
    }

    fn on_post_taken_damage(
        &self,
        _ctx: &mut EffectContext<'_>,
        _me: PieceId,
        _source: Option<DamageSource>,
        _hp_lost: i32,
    ) {
    }

    /// Called when a hit would take `me` to zero HP. Returning true leaves
    /// the piece at 1 HP and skips lethality accounting.
    fn prevents_death(&self, _ctx: &mut EffectContext<'_>, _me: PieceId) -> bool {
        false
    }

    /// Extra gold the killer's side earns when this piece lands a kill.
    fn bonus_kill_gold(&self, _piece: &Piece) -> u32 {
        0
    }

    fn on_pre_enter_turn(&self, ctx: &mut EffectContext<'_>, me: PieceId) {
        base::pre_enter_turn(ctx, me);
    }
}

/// Closed set of unit behaviors.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ChampionKind {
    #[default]
    Base,
    King,
    Minion,
    SuperMinion,
    Soldier,
    Drake,
    Titan,
    Ranger,
    Blademaster,
    SandEmperor,
    Hookmaster,
    Warlord,
    Bloodmage,
    FrostArcher,
    Thornback,
    Guardian,
    Warden,
    Timekeeper,
    Pyromancer,
    Shadowblade,
    Berserker,
    Plaguebringer,
    Bombardier,
    Sentinel,
    Corsair,
    Spellblade,
    Oracle,
    Stormcaller,
    Juggernaut,
}

impl ChampionKind {
    /// Looks up a behavior by unit name, falling back to [`ChampionKind::Base`].
    pub fn resolve(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            tracing::warn!(unit = name, "unknown champion; using base behavior");
            ChampionKind::Base
        })
    }

    pub fn is_king(self) -> bool {
        self == ChampionKind::King
    }

    pub fn behavior(self) -> &'static dyn Champion {
        use ChampionKind::*;
        match self {
            Base | King | Minion | SuperMinion | Drake | Titan => &BaseChampion,
            Soldier => &support::Soldier,
            Ranger => &marksmen::Ranger,
            Blademaster => &fighters::Blademaster,
            SandEmperor => &support::SandEmperor,
            Hookmaster => &mages::Hookmaster,
            Warlord => &fighters::Warlord,
            Bloodmage => &mages::Bloodmage,
            FrostArcher => &marksmen::FrostArcher,
            Thornback => &fighters::Thornback,
            Guardian => &support::Guardian,
            Warden => &support::Warden,
            Timekeeper => &support::Timekeeper,
            Pyromancer => &mages::Pyromancer,
            Shadowblade => &fighters::Shadowblade,
            Berserker => &fighters::Berserker,
            Plaguebringer => &mages::Plaguebringer,
            Bombardier => &mages::Bombardier,
            Sentinel => &marksmen::Sentinel,
            Corsair => &marksmen::Corsair,
            Spellblade => &fighters::Spellblade,
            Oracle => &support::Oracle,
            Stormcaller => &mages::Stormcaller,
            Juggernaut => &fighters::Juggernaut,
        }
    }
}
