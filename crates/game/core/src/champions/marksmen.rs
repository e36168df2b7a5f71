//! Auto-attack focused champions.

use super::base::{param, source, spell_power, triggered};
use super::{Champion, EffectContext, SkillTarget};
use crate::combat::{DamageType, apply_damage, auto_attack, grant_shield, percent_of};
use crate::state::{Debuff, DebuffClass, Piece, PieceId, Shield};
use crate::stats::{StatKind, StatModifier};
use crate::status::apply_debuff;

/// Every third auto-attack fires a follow-up volley.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ranger;

impl Champion for Ranger {
    fn on_attack(&self, ctx: &mut EffectContext<'_>, me: PieceId, target: PieceId) {
        auto_attack(ctx, me, target, 100);

        let every = param(ctx, me, "volley_every", 3).max(1) as u32;
        let ratio = param(ctx, me, "volley_ratio", 50);
        let Some(ranger) = ctx.piece(me) else {
            return;
        };
        if ranger.attack_count % every != 0 || !ctx.is_alive(target) {
            return;
        }
        let raw = percent_of(ranger.attack(), ratio);
        let sunder = ranger.sunder();
        let src = source(ctx, me);
        triggered(ctx, me, "volley");
        apply_damage(ctx, src, target, raw, DamageType::Physical, sunder);
    }
}

/// Auto-attacks chill the target.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrostArcher;

pub const CHILLED_DEBUFF: &str = "chilled";

impl Champion for FrostArcher {
    fn on_attack(&self, ctx: &mut EffectContext<'_>, me: PieceId, target: PieceId) {
        auto_attack(ctx, me, target, 100);
        let Some(archer) = ctx.living(me) else {
            return;
        };
        let chill = Debuff::new(CHILLED_DEBUFF, 2)
            .unique()
            .with_effects(vec![StatModifier::add(StatKind::Speed, -1)])
            .cast_by(me, archer.side);
        apply_debuff(ctx, target, chill);
    }
}

/// Every fourth auto-attack stuns; the skill shields the sentinel itself.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sentinel;

pub const STUN_DEBUFF: &str = "stun";

impl Champion for Sentinel {
    fn on_attack(&self, ctx: &mut EffectContext<'_>, me: PieceId, target: PieceId) {
        auto_attack(ctx, me, target, 100);

        let every = param(ctx, me, "stun_every", 4).max(1) as u32;
        let Some(sentinel) = ctx.living(me) else {
            return;
        };
        if sentinel.attack_count % every != 0 {
            return;
        }
        let stun = Debuff::new(STUN_DEBUFF, 2)
            .unique()
            .class(DebuffClass::Stun)
            .cast_by(me, sentinel.side);
        triggered(ctx, me, "concussive_shot");
        apply_debuff(ctx, target, stun);
    }

    fn on_skill(&self, ctx: &mut EffectContext<'_>, me: PieceId, _target: SkillTarget) {
        let amount = spell_power(ctx, me, 30, 100);
        let duration = param(ctx, me, "duration", 2);
        grant_shield(ctx, me, Shield::new("bulwark", amount, duration));
    }
}

/// Plunders extra gold on every kill.
#[derive(Clone, Copy, Debug, Default)]
pub struct Corsair;

impl Champion for Corsair {
    fn bonus_kill_gold(&self, piece: &Piece) -> u32 {
        piece
            .ability
            .as_ref()
            .map_or(3, |a| a.param_i32("plunder", 3))
            .max(0) as u32
    }
}

#[cfg(test)]
mod tests {
    use crate::champions::ChampionKind;
    use crate::events::GameEvent;
    use crate::state::{PieceId, Side};
    use crate::testing::{Harness, PieceBuilder};

    fn duel(kind: ChampionKind) -> (Harness, PieceId, PieceId) {
        let mut h = Harness::new();
        let me = h.add(
            PieceBuilder::new(kind.as_ref())
                .kind(kind)
                .side(Side::Blue)
                .attack(20)
                .at(3, 3),
        );
        let foe = h.add(
            PieceBuilder::new("dummy")
                .side(Side::Red)
                .max_hp(500)
                .at(3, 4),
        );
        (h, me, foe)
    }

    #[test]
    fn ranger_volleys_on_every_third_attack() {
        let (mut h, me, foe) = duel(ChampionKind::Ranger);
        let behavior = ChampionKind::Ranger.behavior();

        for _ in 0..3 {
            h.with_ctx(|ctx| behavior.on_attack(ctx, me, foe));
        }

        // 3 x 20 + one 10 volley
        assert_eq!(h.piece(foe).hp, 430);
        let volley = |e: &GameEvent| {
            matches!(e, GameEvent::AbilityTriggered { ability, .. } if ability == "volley")
        };
        assert!(h.events.iter().any(volley));
    }

    #[test]
    fn frost_archer_slows() {
        let (mut h, me, foe) = duel(ChampionKind::FrostArcher);
        h.piece_mut(foe).stats.speed = 2;

        let behavior = ChampionKind::FrostArcher.behavior();
        h.with_ctx(|ctx| behavior.on_attack(ctx, me, foe));

        assert_eq!(h.piece(foe).speed(), 1);
    }

    #[test]
    fn sentinel_stuns_on_fourth_attack() {
        let (mut h, me, foe) = duel(ChampionKind::Sentinel);
        let behavior = ChampionKind::Sentinel.behavior();

        for _ in 0..3 {
            h.with_ctx(|ctx| behavior.on_attack(ctx, me, foe));
        }
        assert!(!h.piece(foe).is_stunned());

        h.with_ctx(|ctx| behavior.on_attack(ctx, me, foe));
        assert!(h.piece(foe).is_stunned());
    }

    #[test]
    fn corsair_plunders_on_kill() {
        let mut h = Harness::new();
        let me = h.add(
            PieceBuilder::new("corsair")
                .kind(ChampionKind::Corsair)
                .side(Side::Blue)
                .attack(100),
        );
        let foe = h.add(
            PieceBuilder::new("dummy")
                .side(Side::Red)
                .max_hp(10)
                .gold_value(5),
        );
        let before = h.state.treasury.get(Side::Blue);

        let behavior = ChampionKind::Corsair.behavior();
        h.with_ctx(|ctx| behavior.on_attack(ctx, me, foe));

        assert_eq!(h.state.treasury.get(Side::Blue), before + 8);
    }
}
