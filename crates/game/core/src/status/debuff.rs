//! Debuff application and per-turn processing.

use crate::champions::EffectContext;
use crate::combat::{DamageSource, apply_damage, heal};
use crate::env::ItemTag;
use crate::events::GameEvent;
use crate::state::{Debuff, DebuffClass, PieceId, Side};

/// Id of the debuff granted when an immunity charm is consumed.
pub const IMMUNITY_DEBUFF: &str = "immunity";

/// Applies `debuff` to `target`, returning whether it (or an immunity in
/// its place) took effect.
///
/// Hostile debuffs first meet the target's immunity charm, which is spent to
/// grant a temporary immunity instead, then any active immunity, which
/// refuses them. Friendly debuffs skip both checks. A unique debuff replaces
/// an existing instance with the same id only when it outlasts it.
pub fn apply_debuff(ctx: &mut EffectContext<'_>, target: PieceId, mut debuff: Debuff) -> bool {
    let Some(piece) = ctx.living(target) else {
        return false;
    };
    let hostile = debuff.is_hostile_to(piece.side);
    let side = piece.side;

    if hostile {
        let charm = piece
            .items
            .iter()
            .position(|item| item.has_tag(ItemTag::DebuffImmunity));
        if let Some(index) = charm {
            consume_charm(ctx, target, index, side);
            return true;
        }
        if piece.has_class(DebuffClass::Immunity) {
            tracing::debug!(%target, debuff = %debuff.id, "debuff refused by immunity");
            ctx.emit(GameEvent::DebuffRefused {
                piece: target,
                debuff: debuff.id,
            });
            return false;
        }
    }

    if debuff.unique {
        if let Some(existing) = piece.debuffs.iter().position(|d| d.id == debuff.id) {
            if !debuff.outlasts(&piece.debuffs[existing]) {
                ctx.emit(GameEvent::DebuffRefused {
                    piece: target,
                    debuff: debuff.id,
                });
                return false;
            }
            if let Some(piece) = ctx.piece_mut(target) {
                piece.debuffs.remove(existing);
            }
        }
    }

    debuff.created_at = ctx.state.next_stamp();
    let (id, duration) = (debuff.id.clone(), debuff.duration);
    if let Some(piece) = ctx.piece_mut(target) {
        piece.debuffs.push(debuff);
    }
    tracing::debug!(%target, debuff = %id, duration, "debuff applied");
    ctx.emit(GameEvent::DebuffApplied {
        piece: target,
        debuff: id,
        duration,
    });
    true
}

fn consume_charm(ctx: &mut EffectContext<'_>, target: PieceId, index: usize, side: Side) {
    let duration = ctx.config().immunity_duration;
    let stamp = ctx.state.next_stamp();
    let Some(piece) = ctx.piece_mut(target) else {
        return;
    };
    let item = if piece.items[index].consumable {
        piece.items.remove(index).name
    } else {
        piece.items[index].name.clone()
    };
    let mut immunity = Debuff::new(IMMUNITY_DEBUFF, duration)
        .unique()
        .class(DebuffClass::Immunity)
        .cast_by(target, side);
    immunity.created_at = stamp;
    piece.debuffs.retain(|d| d.id != IMMUNITY_DEBUFF);
    piece.debuffs.push(immunity);

    tracing::debug!(%target, %item, "immunity charm consumed");
    ctx.emit(GameEvent::ImmunityConsumed {
        piece: target,
        item,
    });
    ctx.emit(GameEvent::DebuffApplied {
        piece: target,
        debuff: IMMUNITY_DEBUFF.to_owned(),
        duration,
    });
}

/// Runs one turn of debuff processing on `target`.
///
/// Walks debuffs from last to first, skipping aura projections. Each
/// applies its periodic damage (no sunder) and heal, then loses one turn of
/// duration and is removed on expiry. Infinite debuffs never tick down.
pub fn process_debuffs(ctx: &mut EffectContext<'_>, target: PieceId) {
    let Some(piece) = ctx.living(target) else {
        return;
    };
    let snapshot: Vec<(String, u64)> = piece
        .debuffs
        .iter()
        .rev()
        .filter(|d| !d.is_aura_projection())
        .map(|d| (d.id.clone(), d.created_at))
        .collect();

    for (id, stamp) in snapshot {
        let Some(debuff) = find(ctx, target, &id, stamp).cloned() else {
            continue;
        };

        if debuff.damage_per_turn > 0 {
            let source = match (debuff.caster, debuff.caster_side) {
                (Some(piece), Some(side)) => Some(DamageSource { piece, side }),
                _ => None,
            };
            apply_damage(
                ctx,
                source,
                target,
                debuff.damage_per_turn,
                debuff.damage_type,
                0,
            );
        }
        if debuff.heal_per_turn > 0 {
            heal(ctx, target, debuff.heal_per_turn);
        }

        if debuff.is_infinite() {
            continue;
        }
        let Some(piece) = ctx.piece_mut(target) else {
            return;
        };
        let Some(index) = piece
            .debuffs
            .iter()
            .position(|d| d.id == id && d.created_at == stamp)
        else {
            continue;
        };
        piece.debuffs[index].duration -= 1;
        if piece.debuffs[index].duration <= 0 {
            piece.debuffs.remove(index);
            ctx.emit(GameEvent::DebuffExpired {
                piece: target,
                debuff: id,
            });
        }
    }
}

fn find<'c>(
    ctx: &'c EffectContext<'_>,
    target: PieceId,
    id: &str,
    stamp: u64,
) -> Option<&'c Debuff> {
    ctx.piece(target)?
        .debuffs
        .iter()
        .find(|d| d.id == id && d.created_at == stamp)
}

/// Removes every debuff with `id` from `target`.
pub fn remove_debuff(ctx: &mut EffectContext<'_>, target: PieceId, id: &str) -> bool {
    let Some(piece) = ctx.piece_mut(target) else {
        return false;
    };
    let before = piece.debuffs.len();
    piece.debuffs.retain(|d| d.id != id);
    let removed = piece.debuffs.len() != before;
    if removed {
        ctx.emit(GameEvent::DebuffExpired {
            piece: target,
            debuff: id.to_owned(),
        });
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::DamageType;
    use crate::state::ItemInstance;
    use crate::testing::{Harness, PieceBuilder};

    fn hostile(id: &str, duration: i32) -> Debuff {
        Debuff::new(id, duration).cast_by(PieceId(999), Side::Red)
    }

    #[test]
    fn unique_debuff_replaced_only_by_longer() {
        let mut h = Harness::new();
        let id = h.add(PieceBuilder::new("target").side(Side::Blue));

        assert!(h.with_ctx(|ctx| apply_debuff(ctx, id, hostile("burn", 3).unique())));
        assert!(!h.with_ctx(|ctx| apply_debuff(ctx, id, hostile("burn", 3).unique())));
        assert!(!h.with_ctx(|ctx| apply_debuff(ctx, id, hostile("burn", 2).unique())));
        assert!(h.with_ctx(|ctx| apply_debuff(ctx, id, hostile("burn", 5).unique())));

        let burns: Vec<i32> = h
            .piece(id)
            .debuffs
            .iter()
            .filter(|d| d.id == "burn")
            .map(|d| d.duration)
            .collect();
        assert_eq!(burns, vec![5]);
    }

    #[test]
    fn non_unique_debuffs_stack() {
        let mut h = Harness::new();
        let id = h.add(PieceBuilder::new("target").side(Side::Blue));

        h.with_ctx(|ctx| apply_debuff(ctx, id, hostile("bleed", 2)));
        h.with_ctx(|ctx| apply_debuff(ctx, id, hostile("bleed", 2)));

        assert_eq!(h.piece(id).debuffs.len(), 2);
    }

    #[test]
    fn charm_is_consumed_instead_of_the_debuff() {
        let mut h = Harness::new();
        let id = h.add(PieceBuilder::new("target").side(Side::Blue));
        let tag = ItemTag::DebuffImmunity;
        let mut charm = ItemInstance::with_effects("quicksilver", Vec::new()).tagged(tag);
        charm.consumable = true;
        h.piece_mut(id).items.push(charm);

        assert!(h.with_ctx(|ctx| apply_debuff(ctx, id, hostile("stun", 2))));
        let piece = h.piece(id);
        assert!(piece.items.is_empty());
        assert!(!piece.has_debuff("stun"));
        assert!(piece.has_debuff(IMMUNITY_DEBUFF));

        assert!(!h.with_ctx(|ctx| apply_debuff(ctx, id, hostile("root", 2))));
    }

    #[test]
    fn friendly_buffs_bypass_immunity() {
        let mut h = Harness::new();
        let id = h.add(PieceBuilder::new("target").side(Side::Blue));
        h.piece_mut(id)
            .debuffs
            .push(Debuff::new(IMMUNITY_DEBUFF, 2).class(DebuffClass::Immunity));

        let buff = Debuff::new("haste", 2).cast_by(PieceId(5), Side::Blue);
        assert!(h.with_ctx(|ctx| apply_debuff(ctx, id, buff)));
    }

    #[test]
    fn processing_ticks_damage_and_expires() {
        let mut h = Harness::new();
        let id = h.add(PieceBuilder::new("target").side(Side::Blue));
        let burn = hostile("burn", 2).damage_over_time(10, DamageType::True);
        h.with_ctx(|ctx| apply_debuff(ctx, id, burn));

        h.with_ctx(|ctx| process_debuffs(ctx, id));
        assert_eq!(h.piece(id).hp, 90);
        assert!(h.piece(id).has_debuff("burn"));

        h.with_ctx(|ctx| process_debuffs(ctx, id));
        assert_eq!(h.piece(id).hp, 80);
        assert!(!h.piece(id).has_debuff("burn"));
    }

    #[test]
    fn aura_projections_are_not_ticked() {
        let mut h = Harness::new();
        let id = h.add(PieceBuilder::new("target").side(Side::Blue));
        h.piece_mut(id).debuffs.push(Debuff::new("aura:ward", 1));

        h.with_ctx(|ctx| process_debuffs(ctx, id));

        assert_eq!(h.piece(id).debuffs[0].duration, 1);
    }
}
