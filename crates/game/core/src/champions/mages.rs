//! Ability-power casters. Every skill here deals magic damage.

use super::base::{param, source, spell_power, triggered};
use super::{Champion, EffectContext, SkillTarget};
use crate::combat::{DamageType, WOUNDED_DEBUFF, apply_damage, heal, pay_hp_cost, percent_of};
use crate::engine::ActionError;
use crate::env::GameEnv;
use crate::events::GameEvent;
use crate::state::{Ability, Debuff, DebuffClass, GameState, Piece, PieceId, Position, Side};
use crate::status::apply_debuff;

pub const BURN_DEBUFF: &str = "burn";

fn strike(ctx: &mut EffectContext<'_>, me: PieceId, target: PieceId, amount: i32) -> i32 {
    let src = source(ctx, me);
    apply_damage(ctx, src, target, amount, DamageType::Magic, 0).hp_lost
}

// ============================================================================
// Hookmaster
// ============================================================================

/// Pays HP to throw a hook; on hit damages and drags the target adjacent.
#[derive(Clone, Copy, Debug, Default)]
pub struct Hookmaster;

impl Hookmaster {
    /// Hit chance in percent, capped at 90.
    pub fn hit_chance(ability_power: i32) -> i32 {
        (30 + ability_power / 2).min(90)
    }
}

impl Champion for Hookmaster {
    fn on_skill(&self, ctx: &mut EffectContext<'_>, me: PieceId, target: SkillTarget) {
        let Some(target) = target.piece() else {
            return;
        };
        let Some(caster) = ctx.living(me) else {
            return;
        };
        let cost = percent_of(caster.max_hp(), param(ctx, me, "hp_cost", 10)).max(1);
        let chance = Self::hit_chance(caster.ability_power());
        let origin = caster.position;

        pay_hp_cost(ctx, me, cost);

        if !ctx.rng.chance(chance) {
            tracing::debug!(piece = %me, target = %target, chance, "hook missed");
            ctx.emit(GameEvent::SkillMissed { piece: me, target });
            return;
        }

        let amount = spell_power(ctx, me, 20, 60);
        strike(ctx, me, target, amount);

        let Some(from) = ctx.living(target).map(|p| p.position) else {
            return;
        };
        let (dx, dy) = origin.step_towards(from);
        let dest = origin.offset(dx, dy);
        if dest == from || ctx.state.is_occupied(dest) {
            return;
        }
        if let Some(piece) = ctx.piece_mut(target) {
            piece.position = dest;
        }
        ctx.emit(GameEvent::Pulled {
            piece: target,
            from,
            to: dest,
        });
    }
}

// ============================================================================
// Bloodmage
// ============================================================================

#[derive(Clone, Copy, Debug, Default)]
pub struct Bloodmage;

impl Champion for Bloodmage {
    fn on_skill(&self, ctx: &mut EffectContext<'_>, me: PieceId, target: SkillTarget) {
        let Some(target) = target.piece() else {
            return;
        };
        let amount = spell_power(ctx, me, 25, 80);
        let drained = strike(ctx, me, target, amount);
        heal(ctx, me, drained);
    }
}

// ============================================================================
// Pyromancer
// ============================================================================

#[derive(Clone, Copy, Debug, Default)]
pub struct Pyromancer;

impl Champion for Pyromancer {
    fn on_skill(&self, ctx: &mut EffectContext<'_>, me: PieceId, target: SkillTarget) {
        let (Some(target), Some(side)) = (target.piece(), ctx.side_of(me)) else {
            return;
        };
        let amount = spell_power(ctx, me, 20, 50);
        strike(ctx, me, target, amount);
        if !ctx.is_alive(target) {
            return;
        }
        let burn = Debuff::new(BURN_DEBUFF, param(ctx, me, "burn_turns", 3))
            .unique()
            .damage_over_time(param(ctx, me, "burn", 10), DamageType::Magic)
            .cast_by(me, side);
        apply_debuff(ctx, target, burn);
    }
}

// ============================================================================
// Plaguebringer
// ============================================================================

/// Its shredding aura comes from the catalog; the skill blights one enemy.
#[derive(Clone, Copy, Debug, Default)]
pub struct Plaguebringer;

impl Champion for Plaguebringer {
    fn on_skill(&self, ctx: &mut EffectContext<'_>, me: PieceId, target: SkillTarget) {
        let (Some(target), Some(side)) = (target.piece(), ctx.side_of(me)) else {
            return;
        };
        let amount = spell_power(ctx, me, 15, 40);
        strike(ctx, me, target, amount);
        if !ctx.is_alive(target) {
            return;
        }
        let blight = Debuff::new(WOUNDED_DEBUFF, param(ctx, me, "duration", 3))
            .unique()
            .class(DebuffClass::Wounded)
            .cast_by(me, side);
        apply_debuff(ctx, target, blight);
    }
}

// ============================================================================
// Bombardier
// ============================================================================

/// Shells a 3x3 area centred on the target square.
#[derive(Clone, Copy, Debug, Default)]
pub struct Bombardier;

impl Champion for Bombardier {
    fn on_skill(&self, ctx: &mut EffectContext<'_>, me: PieceId, target: SkillTarget) {
        let (Some(center), Some(side)) = (target.position(), ctx.side_of(me)) else {
            return;
        };
        let radius = param(ctx, me, "radius", 1).max(0) as u32;
        let amount = spell_power(ctx, me, 20, 50);
        let victims: Vec<PieceId> = ctx
            .state
            .living()
            .filter(|p| p.side.is_hostile_to(side) && p.position.chebyshev(center) <= radius)
            .map(|p| p.id)
            .collect();
        for victim in victims {
            strike(ctx, me, victim, amount);
        }
    }
}

// ============================================================================
// Stormcaller
// ============================================================================

/// Chain lightning: the target, then up to two more enemies, each the
/// nearest not-yet-struck enemy within two squares of the previous one.
#[derive(Clone, Copy, Debug, Default)]
pub struct Stormcaller;

impl Stormcaller {
    fn next_link(
        ctx: &EffectContext<'_>,
        side: Side,
        from: Position,
        struck: &[PieceId],
        reach: u32,
    ) -> Option<PieceId> {
        ctx.state
            .living()
            .filter(|p| p.side.is_hostile_to(side) && !struck.contains(&p.id))
            .map(|p| (p.position.chebyshev(from), p.id))
            .filter(|(distance, _)| *distance <= reach)
            // min_by_key keeps the first minimum, so board order breaks ties
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, id)| id)
    }
}

impl Champion for Stormcaller {
    fn validate_skill(
        &self,
        _state: &GameState,
        _env: &GameEnv<'_>,
        _piece: &Piece,
        _ability: &Ability,
        target: &SkillTarget,
    ) -> Result<(), ActionError> {
        match target.piece() {
            Some(_) => Ok(()),
            None => Err(ActionError::InvalidSkillTarget("chain lightning needs a target".into())),
        }
    }

    fn on_skill(&self, ctx: &mut EffectContext<'_>, me: PieceId, target: SkillTarget) {
        let (Some(first), Some(side)) = (target.piece(), ctx.side_of(me)) else {
            return;
        };
        let bounces = param(ctx, me, "bounces", 2).max(0) as usize;
        let reach = param(ctx, me, "bounce_range", 2).max(0) as u32;
        let amount = spell_power(ctx, me, 20, 50);

        let mut struck = vec![first];
        let mut cursor = ctx.piece(first).map(|p| p.position);
        while struck.len() <= bounces {
            let Some(from) = cursor else {
                break;
            };
            let Some(next) = Self::next_link(ctx, side, from, &struck, reach) else {
                break;
            };
            cursor = ctx.piece(next).map(|p| p.position);
            struck.push(next);
        }

        if struck.len() > 1 {
            triggered(ctx, me, "chain_lightning");
        }
        for victim in struck {
            strike(ctx, me, victim, amount);
        }
    }
}
