//! Damage resolution: mitigation, amplification, shields and lethality.

use crate::champions::EffectContext;
use crate::config::ShieldBreakerPolicy;
use crate::env::ItemTag;
use crate::events::{GameEvent, GoldReason};
use crate::state::{Piece, PieceId, Side};

// ============================================================================
// Damage Type
// ============================================================================

/// Damage type deciding which resistance applies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum DamageType {
    /// Reduced by physical resistance.
    #[default]
    Physical,
    /// Reduced by magic resistance.
    Magic,
    /// Ignores resistances.
    True,
}

/// Who dealt a hit, captured before resolution so that a source which dies
/// mid-resolution (e.g. to reflected damage) is still credited.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageSource {
    pub piece: PieceId,
    pub side: Side,
}

impl DamageSource {
    pub fn of(piece: &Piece) -> Self {
        Self {
            piece: piece.id,
            side: piece.side,
        }
    }
}

/// Result of one damage application.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageReport {
    /// Mitigated and amplified amount, before shields.
    pub dealt: i32,
    /// Portion taken by shields.
    pub absorbed: i32,
    /// HP actually lost.
    pub hp_lost: i32,
    /// The hit took the target from alive to dead.
    pub killed: bool,
}

// ============================================================================
// Damage Calculation
// ============================================================================

/// Applies resistances.
///
/// ```text
/// physical = max(raw - max(physical_resistance - sunder, 0), 1)
/// magic    = max(raw - max(magic_resistance - sunder, 0), 1)
/// true     = max(raw, 1)
/// ```
pub fn mitigate(target: &Piece, raw: i32, damage_type: DamageType, sunder: i32) -> i32 {
    let resistance = match damage_type {
        DamageType::Physical => target.physical_resistance(),
        DamageType::Magic => target.magic_resistance(),
        DamageType::True => return raw.max(1),
    };
    let effective = (resistance - sunder).max(0);
    (raw - effective).max(1)
}

/// Total amplification percentage `source` applies against `target`.
pub fn amplification(ctx: &EffectContext<'_>, source: Option<&Piece>, target: &Piece) -> i32 {
    let Some(source) = source else {
        return 0;
    };
    let config = ctx.config();
    let mut amp = source.damage_amplification();
    if target.hp > config.giant_slayer_threshold && source.has_item_tag(ItemTag::GiantSlayer) {
        amp = amp.saturating_add(config.giant_slayer_bonus);
    }
    amp
}

/// `value * pct / 100` in 64-bit, saturated back into `i32`.
pub fn percent_of(value: i32, pct: i32) -> i32 {
    let scaled = i64::from(value) * i64::from(pct) / 100;
    scaled.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// `floor(mitigated * (amplification + 100) / 100)`, never negative.
pub fn amplify(mitigated: i32, amplification: i32) -> i32 {
    let scaled = i64::from(mitigated) * (i64::from(amplification) + 100) / 100;
    scaled.clamp(0, i64::from(i32::MAX)) as i32
}

// ============================================================================
// Damage Application
// ============================================================================

/// Resolves one damage event end to end.
///
/// Order: mitigation, amplification, shield absorption (front to back), HP
/// loss clamped at zero, death prevention, lethality accounting (gold and
/// death round, once, only for a target alive before this hit), then the
/// target's `post_taken_damage` hook.
///
/// The returned [`DamageReport::dealt`] is the pre-shield amount.
pub fn apply_damage(
    ctx: &mut EffectContext<'_>,
    source: Option<DamageSource>,
    target: PieceId,
    raw: i32,
    damage_type: DamageType,
    sunder: i32,
) -> DamageReport {
    let Some(target_piece) = ctx.living(target) else {
        return DamageReport::default();
    };

    let source_piece = source.and_then(|s| ctx.piece(s.piece));
    let mitigated = mitigate(target_piece, raw, damage_type, sunder);
    let amp = amplification(ctx, source_piece, target_piece);
    let final_damage = amplify(mitigated, amp);
    let breaks_shields = ctx.config().shield_breaker == ShieldBreakerPolicy::HalveStoredAmount
        && source_piece.is_some_and(|p| p.has_item_tag(ItemTag::ShieldBreaker));

    let Some(piece) = ctx.piece_mut(target) else {
        return DamageReport::default();
    };

    let mut broken = Vec::new();
    if breaks_shields {
        piece.shields.halve(&mut broken);
    }
    let through = piece.shields.absorb(final_damage, &mut broken);
    let absorbed = final_damage - through;

    let hp_before = piece.hp;
    piece.hp = (piece.hp - through).max(0);
    let now_dead = piece.hp == 0;

    for tag in broken {
        ctx.emit(GameEvent::ShieldBroken { piece: target, tag });
    }

    let mut killed = false;
    if now_dead {
        let kind = ctx.piece(target).map(|p| p.kind);
        let survived = kind.is_some_and(|kind| kind.behavior().prevents_death(ctx, target));
        if survived {
            if let Some(piece) = ctx.piece_mut(target) {
                piece.hp = 1;
            }
            ctx.emit(GameEvent::DeathPrevented { piece: target });
        } else {
            killed = true;
        }
    }

    let hp_lost = ctx.piece(target).map_or(0, |p| (hp_before - p.hp).max(0));
    ctx.emit(GameEvent::Damaged {
        source: source.map(|s| s.piece),
        target,
        damage_type,
        amount: final_damage,
        absorbed,
        hp_lost,
    });
    tracing::debug!(
        %target,
        ?damage_type,
        raw,
        dealt = final_damage,
        absorbed,
        hp_lost,
        "damage applied"
    );

    if killed {
        record_kill(ctx, source, target);
    }

    if let Some(kind) = ctx.piece(target).map(|p| p.kind) {
        ctx.nested(|ctx| {
            kind.behavior()
                .on_post_taken_damage(ctx, target, source, hp_lost)
        });
    }

    DamageReport {
        dealt: final_damage,
        absorbed,
        hp_lost,
        killed,
    }
}

/// Stamps the death round and pays the killer's side.
fn record_kill(ctx: &mut EffectContext<'_>, source: Option<DamageSource>, target: PieceId) {
    let round = ctx.state.round;
    let Some(victim) = ctx.piece_mut(target) else {
        return;
    };
    victim.death_round = Some(round);
    let victim_side = victim.side;
    let victim_unit = victim.unit.clone();
    let bounty = victim.gold_value().max(0) as u32;

    ctx.emit(GameEvent::PieceSlain {
        piece: target,
        killer: source.map(|s| s.piece),
        round,
    });
    tracing::debug!(%target, unit = %victim_unit, round, "piece slain");

    let Some(source) = source else {
        return;
    };
    if !source.side.is_player() {
        return;
    }

    let bonus = ctx
        .piece(source.piece)
        .map_or(0, |killer| killer.kind.behavior().bonus_kill_gold(killer));
    let amount = bounty + bonus;
    if amount > 0 {
        ctx.state.treasury.credit(source.side, amount);
        ctx.emit(GameEvent::GoldAwarded {
            side: source.side,
            amount,
            reason: GoldReason::Kill,
        });
    }

    if victim_side == Side::Neutral {
        ctx.emit(GameEvent::MonsterSlain {
            monster: target,
            unit: victim_unit,
            killer_side: source.side,
        });
    }
}
