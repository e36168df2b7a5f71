//! Base behavior and the shared helpers champions build on.

use super::{Champion, EffectContext};
use crate::combat::{DamageSource, heal, percent_of};
use crate::events::GameEvent;
use crate::state::{PieceId, Position};
use crate::status::process_debuffs;

/// Catalog key of the unit a sand emperor recruits minions into.
pub const SOLDIER_UNIT: &str = "soldier";

/// Plain auto-attack, no ability. Kings, minions and monsters use it as-is.
#[derive(Clone, Copy, Debug, Default)]
pub struct BaseChampion;

impl Champion for BaseChampion {}

/// Relocates `me` and marks it as having moved this turn.
pub(crate) fn move_piece(ctx: &mut EffectContext<'_>, me: PieceId, dest: Position) {
    let Some(piece) = ctx.piece_mut(me) else {
        return;
    };
    let from = piece.position;
    piece.position = dest;
    piece.has_moved = true;
    tracing::debug!(piece = %me, %from, to = %dest, "moved");
    ctx.emit(GameEvent::Moved {
        piece: me,
        from,
        to: dest,
    });
}

/// Heals the attacker for its lifesteal percentage of `dealt`.
pub(crate) fn lifesteal(ctx: &mut EffectContext<'_>, me: PieceId, dealt: i32) {
    let pct = ctx.living(me).map_or(0, |p| p.lifesteal());
    if pct > 0 && dealt > 0 {
        heal(ctx, me, percent_of(dealt, pct));
    }
}

/// Start-of-turn upkeep: clears the moved flag, ticks the ability cooldown
/// and shield durations, then processes debuffs.
pub(crate) fn pre_enter_turn(ctx: &mut EffectContext<'_>, me: PieceId) {
    let Some(piece) = ctx.piece_mut(me).filter(|p| p.is_alive()) else {
        return;
    };
    piece.has_moved = false;
    if let Some(ability) = piece.ability.as_mut() {
        ability.tick_cooldown();
    }
    let expired = piece.shields.tick();
    for tag in expired {
        ctx.emit(GameEvent::ShieldExpired { piece: me, tag });
    }
    tracing::trace!(piece = %me, "turn upkeep");
    process_debuffs(ctx, me);
}

// ============================================================================
// Ability payload helpers
// ============================================================================

/// Reads an ability payload value, or `default` if absent.
pub(crate) fn param(ctx: &EffectContext<'_>, me: PieceId, key: &str, default: i32) -> i32 {
    ctx.piece(me)
        .and_then(|p| p.ability.as_ref())
        .map_or(default, |a| a.param_i32(key, default))
}

pub(crate) fn set_param(ctx: &mut EffectContext<'_>, me: PieceId, key: &str, value: i64) {
    if let Some(ability) = ctx.piece_mut(me).and_then(|p| p.ability.as_mut()) {
        ability.set_param(key, value);
    }
}

/// `damage + ability_power * ratio / 100`, from payload keys with defaults.
pub(crate) fn spell_power(ctx: &EffectContext<'_>, me: PieceId, damage: i32, ratio: i32) -> i32 {
    let flat = param(ctx, me, "damage", damage);
    let ratio = param(ctx, me, "ratio", ratio);
    let ap = ctx.piece(me).map_or(0, |p| p.ability_power());
    flat.saturating_add(percent_of(ap, ratio))
}

pub(crate) fn source(ctx: &EffectContext<'_>, me: PieceId) -> Option<DamageSource> {
    ctx.piece(me).map(DamageSource::of)
}

/// Records that a passive or on-hit effect of `me` fired.
pub(crate) fn triggered(ctx: &mut EffectContext<'_>, me: PieceId, name: &str) {
    tracing::debug!(piece = %me, ability = name, "ability triggered");
    ctx.emit(GameEvent::AbilityTriggered {
        piece: me,
        ability: name.to_owned(),
    });
}
