//! The shared auto-attack resolution every champion builds on.

use super::damage::{DamageReport, DamageSource, DamageType, apply_damage, percent_of};
use crate::champions::EffectContext;
use crate::env::ItemTag;
use crate::events::GameEvent;
use crate::state::{Debuff, DebuffClass, PieceId};
use crate::status::apply_debuff;

/// Debuff applied by wounding items on hit.
pub const WOUNDED_DEBUFF: &str = "wounded";

/// Result of one auto-attack.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AttackReport {
    pub critical: bool,
    pub damage: DamageReport,
}

/// Resolves a base auto-attack from `attacker` on `target`.
///
/// `power` scales the raw attack as a percentage (100 is a plain hit).
/// Sequence: critical roll (only when critical chance is positive), physical
/// damage through [`apply_damage`], wounding on-hit, then the attacker's
/// `post_crit_damage` hook (critical hits only) and `post_attack` hook.
pub fn auto_attack(
    ctx: &mut EffectContext<'_>,
    attacker: PieceId,
    target: PieceId,
    power: i32,
) -> AttackReport {
    let Some(piece) = ctx.living(attacker) else {
        return AttackReport::default();
    };
    let source = DamageSource::of(piece);
    let kind = piece.kind;
    let attack = piece.attack();
    let crit_chance = piece.critical_chance();
    let crit_damage = match piece.critical_damage() {
        0 => ctx.config().default_critical_damage,
        pct => pct,
    };
    let sunder = piece.sunder();
    let wounding = piece.has_item_tag(ItemTag::Wounding);

    let critical = crit_chance > 0 && ctx.rng.chance(crit_chance);
    let mut raw = percent_of(attack, power);
    if critical {
        raw = percent_of(raw, crit_damage);
    }

    if let Some(piece) = ctx.piece_mut(attacker) {
        piece.attack_count += 1;
    }
    ctx.emit(GameEvent::Attacked {
        attacker,
        target,
        critical,
    });

    let damage = apply_damage(ctx, Some(source), target, raw, DamageType::Physical, sunder);

    if wounding && ctx.is_alive(target) {
        let wounded = Debuff::new(WOUNDED_DEBUFF, 2)
            .unique()
            .class(DebuffClass::Wounded)
            .cast_by(source.piece, source.side);
        apply_debuff(ctx, target, wounded);
    }

    let behavior = kind.behavior();
    if critical {
        ctx.nested(|ctx| behavior.on_post_crit_damage(ctx, attacker, target, damage.dealt));
    }
    ctx.nested(|ctx| behavior.on_post_attack(ctx, attacker, target, damage.dealt));

    AttackReport { critical, damage }
}
