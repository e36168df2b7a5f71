//! Melee champions built around on-hit and on-damage reactions.

use super::base::{param, set_param, source, triggered};
use super::{Champion, EffectContext, SkillTarget};
use crate::combat::{DamageSource, DamageType, apply_damage, auto_attack, percent_of};
use crate::engine::ActionError;
use crate::env::GameEnv;
use crate::events::GameEvent;
use crate::state::{Ability, Debuff, GameState, INFINITE, Piece, PieceId};
use crate::stats::{Condition, StatKind, StatModifier};
use crate::status::apply_debuff;

// ============================================================================
// Blademaster
// ============================================================================

/// Critical strikes splash part of the damage onto enemies around the target.
#[derive(Clone, Copy, Debug, Default)]
pub struct Blademaster;

impl Champion for Blademaster {
    fn on_post_crit_damage(
        &self,
        ctx: &mut EffectContext<'_>,
        me: PieceId,
        target: PieceId,
        dealt: i32,
    ) {
        let ratio = param(ctx, me, "splash_ratio", 50);
        let splash = percent_of(dealt, ratio);
        let center = ctx.piece(target).map(|p| p.position);
        let (Some(center), Some(src)) = (center, source(ctx, me)) else {
            return;
        };
        if splash <= 0 {
            return;
        }

        let victims: Vec<PieceId> = ctx
            .state
            .living()
            .filter(|p| p.id != target && p.side.is_hostile_to(src.side))
            .filter(|p| p.position.chebyshev(center) == 1)
            .map(|p| p.id)
            .collect();
        if victims.is_empty() {
            return;
        }
        triggered(ctx, me, "whirling_edge");
        for victim in victims {
            apply_damage(ctx, Some(src), victim, splash, DamageType::Physical, 0);
        }
    }
}

// ============================================================================
// Warlord
// ============================================================================

/// Survives one lethal hit at 1 HP per cooldown window.
#[derive(Clone, Copy, Debug, Default)]
pub struct Warlord;

impl Champion for Warlord {
    fn prevents_death(&self, ctx: &mut EffectContext<'_>, me: PieceId) -> bool {
        let Some(piece) = ctx.piece_mut(me) else {
            return false;
        };
        let reduction = piece.cooldown_reduction();
        let Some(ability) = piece.ability.as_mut().filter(|a| a.is_ready()) else {
            return false;
        };
        ability.start_cooldown(reduction);
        triggered(ctx, me, "undying_rage");
        true
    }
}

// ============================================================================
// Thornback
// ============================================================================

/// Reflects part of the HP damage it takes as true damage.
#[derive(Clone, Copy, Debug, Default)]
pub struct Thornback;

pub const HARDENED_BUFF: &str = "hardened";

impl Champion for Thornback {
    fn on_post_taken_damage(
        &self,
        ctx: &mut EffectContext<'_>,
        me: PieceId,
        attacker: Option<DamageSource>,
        hp_lost: i32,
    ) {
        let Some(attacker) = attacker.filter(|a| a.piece != me) else {
            return;
        };
        if hp_lost <= 0 || !ctx.is_alive(attacker.piece) || !ctx.is_alive(me) {
            return;
        }
        let reflected = percent_of(hp_lost, param(ctx, me, "reflect", 20));
        if reflected <= 0 {
            return;
        }
        let src = source(ctx, me);
        triggered(ctx, me, "thorns");
        apply_damage(ctx, src, attacker.piece, reflected, DamageType::True, 0);
    }

    fn on_skill(&self, ctx: &mut EffectContext<'_>, me: PieceId, _target: SkillTarget) {
        let Some(side) = ctx.side_of(me) else {
            return;
        };
        let boost = param(ctx, me, "resist_boost", 150);
        let armor = StatModifier::multiply(StatKind::PhysicalResistance, boost);
        let buff = Debuff::new(HARDENED_BUFF, param(ctx, me, "duration", 2))
            .unique()
            .with_effects(vec![armor])
            .cast_by(me, side);
        apply_debuff(ctx, me, buff);
    }
}

// ============================================================================
// Shadowblade
// ============================================================================

/// Executes weakened targets with bonus true damage; blinks to a free square.
#[derive(Clone, Copy, Debug, Default)]
pub struct Shadowblade;

impl Champion for Shadowblade {
    fn validate_skill(
        &self,
        state: &GameState,
        _env: &GameEnv<'_>,
        _piece: &Piece,
        _ability: &Ability,
        target: &SkillTarget,
    ) -> Result<(), ActionError> {
        match target {
            SkillTarget::Square(square) if !state.is_occupied(*square) => Ok(()),
            SkillTarget::Square(square) => Err(ActionError::Occupied(*square)),
            _ => Err(ActionError::InvalidSkillTarget("blink needs a square".into())),
        }
    }

    fn on_attack(&self, ctx: &mut EffectContext<'_>, me: PieceId, target: PieceId) {
        let threshold = param(ctx, me, "execute_threshold", 50);
        let executes = ctx
            .living(target)
            .is_some_and(|t| Condition::HpBelowPercent(threshold).holds(t));

        auto_attack(ctx, me, target, 100);

        if executes && ctx.is_alive(target) {
            let attack = ctx.piece(me).map_or(0, |p| p.attack());
            let bonus = percent_of(attack, param(ctx, me, "execute_ratio", 30));
            let src = source(ctx, me);
            triggered(ctx, me, "execute");
            apply_damage(ctx, src, target, bonus, DamageType::True, 0);
        }
    }

    fn on_skill(&self, ctx: &mut EffectContext<'_>, me: PieceId, target: SkillTarget) {
        let from = ctx.piece(me).map(|p| p.position);
        let (Some(dest), Some(from)) = (target.position(), from) else {
            return;
        };
        if let Some(piece) = ctx.piece_mut(me) {
            piece.position = dest;
        }
        ctx.emit(GameEvent::Blinked {
            piece: me,
            from,
            to: dest,
        });
    }
}

// ============================================================================
// Berserker
// ============================================================================

/// Permanently hits harder while below half HP.
#[derive(Clone, Copy, Debug, Default)]
pub struct Berserker;

pub const FRENZY_EFFECT: &str = "frenzy";

impl Champion for Berserker {
    fn innate_effects(&self) -> Vec<Debuff> {
        let below_half = Condition::HpBelowPercent(50);
        let frenzy = StatModifier::multiply(StatKind::Attack, 150).when(below_half);
        vec![Debuff::new(FRENZY_EFFECT, INFINITE).with_effects(vec![frenzy])]
    }
}

// ============================================================================
// Juggernaut
// ============================================================================

/// Builds fury when hit; at full fury the next auto-attack is empowered.
#[derive(Clone, Copy, Debug, Default)]
pub struct Juggernaut;

pub const FURY: &str = "fury";

impl Champion for Juggernaut {
    fn on_post_taken_damage(
        &self,
        ctx: &mut EffectContext<'_>,
        me: PieceId,
        _source: Option<DamageSource>,
        _hp_lost: i32,
    ) {
        if !ctx.is_alive(me) {
            return;
        }
        let cap = param(ctx, me, "fury_cap", 3);
        let fury = (param(ctx, me, FURY, 0) + 1).min(cap);
        set_param(ctx, me, FURY, i64::from(fury));
    }

    fn on_attack(&self, ctx: &mut EffectContext<'_>, me: PieceId, target: PieceId) {
        let cap = param(ctx, me, "fury_cap", 3);
        let power = if param(ctx, me, FURY, 0) >= cap {
            set_param(ctx, me, FURY, 0);
            triggered(ctx, me, "unstoppable");
            100 + param(ctx, me, "fury_bonus", 50)
        } else {
            100
        };
        auto_attack(ctx, me, target, power);
    }
}

// ============================================================================
// Spellblade
// ============================================================================

/// Auto-attacks carry bonus magic damage; the skill empowers the next one.
#[derive(Clone, Copy, Debug, Default)]
pub struct Spellblade;

pub const EMPOWERED: &str = "empowered";

impl Champion for Spellblade {
    fn on_attack(&self, ctx: &mut EffectContext<'_>, me: PieceId, target: PieceId) {
        let power = if param(ctx, me, EMPOWERED, 0) > 0 {
            set_param(ctx, me, EMPOWERED, 0);
            200
        } else {
            100
        };
        auto_attack(ctx, me, target, power);

        if !ctx.is_alive(target) || !ctx.is_alive(me) {
            return;
        }
        let ratio = param(ctx, me, "on_hit_ratio", 30);
        let bonus = percent_of(ctx.piece(me).map_or(0, |p| p.ability_power()), ratio);
        if bonus > 0 {
            let src = source(ctx, me);
            apply_damage(ctx, src, target, bonus, DamageType::Magic, 0);
        }
    }

    fn on_skill(&self, ctx: &mut EffectContext<'_>, me: PieceId, _target: SkillTarget) {
        set_param(ctx, me, EMPOWERED, 1);
    }
}
