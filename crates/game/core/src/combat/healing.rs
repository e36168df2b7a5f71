//! HP restoration, HP costs and shield grants.

use super::damage::percent_of;
use crate::champions::EffectContext;
use crate::events::GameEvent;
use crate::state::{PieceId, Shield};

/// Heals a living piece, halving (by the configured percentage, floored)
/// when it is wounded, and clamping to its effective max HP.
///
/// Returns the HP actually restored.
pub fn heal(ctx: &mut EffectContext<'_>, target: PieceId, amount: i32) -> i32 {
    if amount <= 0 {
        return 0;
    }
    let reduction = ctx.config().wounded_heal_reduction.clamp(0, 100);
    let Some(piece) = ctx.state.piece_mut(target).filter(|p| p.is_alive()) else {
        return 0;
    };

    let amount = if piece.is_wounded() {
        percent_of(amount, 100 - reduction)
    } else {
        amount
    };
    let before = piece.hp;
    piece.hp = piece.hp.saturating_add(amount).min(piece.max_hp());
    let healed = (piece.hp - before).max(0);

    if healed > 0 {
        ctx.emit(GameEvent::Healed {
            piece: target,
            amount: healed,
        });
    }
    healed
}

/// Removes HP as a cost. Costs never kill: the piece is left at 1 HP at
/// worst. Returns the HP paid.
pub fn pay_hp_cost(ctx: &mut EffectContext<'_>, target: PieceId, amount: i32) -> i32 {
    let Some(piece) = ctx.state.piece_mut(target).filter(|p| p.is_alive()) else {
        return 0;
    };
    let before = piece.hp;
    piece.hp = (piece.hp - amount.max(0)).max(1).min(before);
    let paid = before - piece.hp;
    if paid > 0 {
        ctx.emit(GameEvent::HpCostPaid {
            piece: target,
            amount: paid,
        });
    }
    paid
}

/// Appends a shield to the back of the target's queue.
pub fn grant_shield(ctx: &mut EffectContext<'_>, target: PieceId, shield: Shield) {
    let Some(piece) = ctx.state.piece_mut(target).filter(|p| p.is_alive()) else {
        return;
    };
    if shield.amount <= 0 {
        return;
    }
    let (tag, amount) = (shield.tag.clone(), shield.amount);
    piece.shields.push(shield);
    ctx.emit(GameEvent::ShieldGranted {
        piece: target,
        tag,
        amount,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Debuff, DebuffClass};
    use crate::testing::{Harness, PieceBuilder};

    #[test]
    fn heal_clamps_to_max_hp() {
        let mut h = Harness::new();
        let id = h.add(PieceBuilder::new("cleric").max_hp(100).hp(90));

        let healed = h.with_ctx(|ctx| heal(ctx, id, 40));

        assert_eq!(healed, 10);
        assert_eq!(h.piece(id).hp, 100);
    }

    #[test]
    fn wounded_halves_healing_floored() {
        let mut h = Harness::new();
        let id = h.add(PieceBuilder::new("cleric").max_hp(100).hp(10));
        h.piece_mut(id)
            .debuffs
            .push(Debuff::new("wounded", 2).class(DebuffClass::Wounded));

        let healed = h.with_ctx(|ctx| heal(ctx, id, 15));

        assert_eq!(healed, 7);
    }

    #[test]
    fn hp_cost_never_kills() {
        let mut h = Harness::new();
        let id = h.add(PieceBuilder::new("hook").max_hp(100).hp(5));

        let paid = h.with_ctx(|ctx| pay_hp_cost(ctx, id, 10));

        assert_eq!(paid, 4);
        assert_eq!(h.piece(id).hp, 1);
    }
}
