//! Allies-first champions: recruiters, shielders, healers.

use super::base::{SOLDIER_UNIT, param, pre_enter_turn, source, spell_power};
use super::{Champion, EffectContext, SkillTarget};
use crate::combat::{DamageType, apply_damage, auto_attack, grant_shield, heal, percent_of};
use crate::config::GameConfig;
use crate::engine::ActionError;
use crate::env::GameEnv;
use crate::events::GameEvent;
use crate::state::{Ability, Debuff, GameState, Piece, PieceId, Shield};
use crate::stats::{StatKind, StatModifier};
use crate::status::apply_debuff;

use super::ChampionKind;

// ============================================================================
// Sand emperor and soldiers
// ============================================================================

/// A recruited minion. Its auto-attacks draw on its emperor's ability power.
#[derive(Clone, Copy, Debug, Default)]
pub struct Soldier;

impl Champion for Soldier {
    fn on_attack(&self, ctx: &mut EffectContext<'_>, me: PieceId, target: PieceId) {
        auto_attack(ctx, me, target, 100);

        let emperor_ap = ctx
            .living(me)
            .and_then(|p| p.linked_to)
            .and_then(|parent| ctx.living(parent))
            .map_or(0, |emperor| emperor.ability_power());
        let bonus = percent_of(emperor_ap, param(ctx, me, "emperor_ratio", 20));
        if bonus > 0 && ctx.is_alive(target) {
            let src = source(ctx, me);
            apply_damage(ctx, src, target, bonus, DamageType::Magic, 0);
        }
    }
}

/// Recruits allied minions into soldiers linked to the emperor.
#[derive(Clone, Copy, Debug, Default)]
pub struct SandEmperor;

impl Champion for SandEmperor {
    fn validate_skill(
        &self,
        state: &GameState,
        env: &GameEnv<'_>,
        piece: &Piece,
        _ability: &Ability,
        target: &SkillTarget,
    ) -> Result<(), ActionError> {
        let recruit = target
            .piece()
            .and_then(|id| state.piece(id))
            .ok_or_else(|| {
                ActionError::InvalidSkillTarget("recruit needs an allied minion".into())
            })?;
        if recruit.kind != ChampionKind::Minion {
            return Err(ActionError::InvalidSkillTarget(format!(
                "{} is not a minion",
                recruit.unit
            )));
        }
        if state.linked_to(piece.id).count() >= GameConfig::MAX_SOLDIERS {
            return Err(ActionError::InvalidSkillTarget("soldier cap reached".into()));
        }
        if env.template(SOLDIER_UNIT).is_none() {
            return Err(ActionError::InvalidSkillTarget("no soldier unit in catalog".into()));
        }
        Ok(())
    }

    fn on_skill(&self, ctx: &mut EffectContext<'_>, me: PieceId, target: SkillTarget) {
        let Some(recruit) = target.piece() else {
            return;
        };
        let Some(template) = ctx.env.template(SOLDIER_UNIT) else {
            tracing::warn!(unit = SOLDIER_UNIT, "no soldier template; recruit skipped");
            return;
        };
        let Some(piece) = ctx.piece_mut(recruit) else {
            return;
        };
        piece.transform_into(template);
        piece.linked_to = Some(me);
        tracing::debug!(soldier = %recruit, emperor = %me, "soldier recruited");
        ctx.emit(GameEvent::SoldierRecruited {
            soldier: recruit,
            emperor: me,
        });
    }
}

// ============================================================================
// Guardian
// ============================================================================

/// Its protective aura comes from the catalog; the skill shields an ally.
#[derive(Clone, Copy, Debug, Default)]
pub struct Guardian;

impl Champion for Guardian {
    fn on_skill(&self, ctx: &mut EffectContext<'_>, me: PieceId, target: SkillTarget) {
        let Some(ally) = target.piece() else {
            return;
        };
        let amount = spell_power(ctx, me, 40, 100);
        let duration = param(ctx, me, "duration", 2);
        grant_shield(ctx, ally, Shield::new("aegis", amount, duration));
    }
}

// ============================================================================
// Warden
// ============================================================================

#[derive(Clone, Copy, Debug, Default)]
pub struct Warden;

impl Champion for Warden {
    fn on_pre_enter_turn(&self, ctx: &mut EffectContext<'_>, me: PieceId) {
        pre_enter_turn(ctx, me);
        let pct = param(ctx, me, "regen_percent", 5);
        let amount = ctx.living(me).map_or(0, |p| percent_of(p.max_hp(), pct));
        heal(ctx, me, amount);
    }
}

// ============================================================================
// Timekeeper
// ============================================================================

pub const HASTE_BUFF: &str = "haste";

/// Rewinds an ally's cooldown and hastes it.
#[derive(Clone, Copy, Debug, Default)]
pub struct Timekeeper;

impl Champion for Timekeeper {
    fn on_skill(&self, ctx: &mut EffectContext<'_>, me: PieceId, target: SkillTarget) {
        let (Some(ally), Some(side)) = (target.piece(), ctx.side_of(me)) else {
            return;
        };
        if let Some(ability) = ctx.piece_mut(ally).and_then(|p| p.ability.as_mut()) {
            ability.current_cooldown = 0;
            ctx.emit(GameEvent::CooldownReset { piece: ally });
        }
        let haste = Debuff::new(HASTE_BUFF, param(ctx, me, "duration", 2))
            .unique()
            .with_effects(vec![StatModifier::add(StatKind::Speed, 1)])
            .cast_by(me, side);
        apply_debuff(ctx, ally, haste);
    }
}

// ============================================================================
// Oracle
// ============================================================================

/// Heals an ally on demand and itself every turn.
#[derive(Clone, Copy, Debug, Default)]
pub struct Oracle;

impl Champion for Oracle {
    fn on_skill(&self, ctx: &mut EffectContext<'_>, me: PieceId, target: SkillTarget) {
        let Some(ally) = target.piece() else {
            return;
        };
        let amount = spell_power(ctx, me, 40, 100);
        heal(ctx, ally, amount);
    }

    fn on_pre_enter_turn(&self, ctx: &mut EffectContext<'_>, me: PieceId) {
        pre_enter_turn(ctx, me);
        let regen = param(ctx, me, "regen", 10);
        heal(ctx, me, regen);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{AbilitySpec, StaticCatalog, UnitTemplate};
    use crate::state::{BaseStats, Position, Side, TargetType};
    use crate::testing::{Harness, PieceBuilder};

    fn soldier_catalog() -> StaticCatalog {
        let mut catalog = StaticCatalog::new();
        catalog.insert_unit(UnitTemplate::new(
            SOLDIER_UNIT,
            BaseStats {
                max_hp: 60,
                attack: 15,
                speed: 1,
                attack_range: 1,
                ..BaseStats::default()
            },
        ));
        catalog
    }

    fn emperor(h: &mut Harness) -> PieceId {
        let arise = AbilitySpec::active("arise", 2, 3, TargetType::Ally);
        h.add(
            PieceBuilder::new("sand_emperor")
                .kind(ChampionKind::SandEmperor)
                .side(Side::Blue)
                .ability_power(50)
                .ability(Ability::from_spec(&arise))
                .at(3, 0),
        )
    }

    fn minion(h: &mut Harness, x: i32) -> PieceId {
        h.add(
            PieceBuilder::new("minion")
                .kind(ChampionKind::Minion)
                .side(Side::Blue)
                .at(x, 1),
        )
    }

    fn target_of(h: &Harness, id: PieceId) -> SkillTarget {
        SkillTarget::Piece {
            id,
            position: h.piece(id).position,
        }
    }

    #[test]
    fn recruit_transforms_and_links() {
        let mut h = Harness::new();
        h.catalog = soldier_catalog();
        let me = emperor(&mut h);
        let recruit = minion(&mut h, 3);
        let target = target_of(&h, recruit);

        let behavior = ChampionKind::SandEmperor.behavior();
        h.with_ctx(|ctx| behavior.on_skill(ctx, me, target));

        let soldier = h.piece(recruit);
        assert_eq!(soldier.kind, ChampionKind::Soldier);
        assert_eq!(soldier.linked_to, Some(me));
        assert_eq!(soldier.hp, 60);
        assert_eq!(soldier.side, Side::Blue);
    }

    #[test]
    fn recruit_rejects_non_minions_and_caps_soldiers() {
        let mut h = Harness::new();
        h.catalog = soldier_catalog();
        let me = emperor(&mut h);
        let knight = h.add(PieceBuilder::new("knight").side(Side::Blue).at(4, 1));
        for x in 0..3 {
            let id = minion(&mut h, x);
            h.piece_mut(id).linked_to = Some(me);
        }
        let spare = minion(&mut h, 5);

        let env = GameEnv::with_catalog(&h.catalog, &h.config);
        let caster = h.piece(me);
        let ability = caster.ability.as_ref().expect("ability");
        let behavior = ChampionKind::SandEmperor.behavior();

        let check = |id| {
            let target = target_of(&h, id);
            behavior.validate_skill(&h.state, &env, caster, ability, &target)
        };

        let knight_err = check(knight);
        assert!(matches!(knight_err, Err(ActionError::InvalidSkillTarget(_))));

        match check(spare) {
            Err(ActionError::InvalidSkillTarget(msg)) => assert!(msg.contains("cap")),
            other => panic!("expected the soldier cap, got {other:?}"),
        }
    }

    #[test]
    fn soldier_attack_scales_with_emperor() {
        let mut h = Harness::new();
        let me = emperor(&mut h);
        let soldier = h.add(
            PieceBuilder::new("soldier")
                .kind(ChampionKind::Soldier)
                .side(Side::Blue)
                .attack(15)
                .at(4, 4),
        );
        h.piece_mut(soldier).linked_to = Some(me);
        let foe = h.add(PieceBuilder::new("dummy").side(Side::Red).at(4, 5));

        let behavior = ChampionKind::Soldier.behavior();
        h.with_ctx(|ctx| behavior.on_attack(ctx, soldier, foe));

        // 15 physical + 10 magic
        assert_eq!(h.piece(foe).hp, 75);
    }

    #[test]
    fn guardian_shields_an_ally() {
        let mut h = Harness::new();
        let me = h.add(
            PieceBuilder::new("guardian")
                .kind(ChampionKind::Guardian)
                .side(Side::Blue)
                .ability_power(20),
        );
        let ally = h.add(PieceBuilder::new("ally").side(Side::Blue).at(1, 0));
        let target = target_of(&h, ally);

        let behavior = ChampionKind::Guardian.behavior();
        h.with_ctx(|ctx| behavior.on_skill(ctx, me, target));

        assert_eq!(h.piece(ally).shields.total(), 60);
    }

    #[test]
    fn warden_regenerates_on_turn_start() {
        let mut h = Harness::new();
        let me = h.add(
            PieceBuilder::new("warden")
                .kind(ChampionKind::Warden)
                .side(Side::Blue)
                .max_hp(200)
                .hp(100),
        );

        let behavior = ChampionKind::Warden.behavior();
        h.with_ctx(|ctx| behavior.on_pre_enter_turn(ctx, me));

        assert_eq!(h.piece(me).hp, 110);
    }

    #[test]
    fn timekeeper_resets_and_hastes() {
        let mut h = Harness::new();
        let me = h.add(
            PieceBuilder::new("timekeeper")
                .kind(ChampionKind::Timekeeper)
                .side(Side::Blue),
        );
        let ally = h.add(PieceBuilder::new("ally").side(Side::Blue).speed(2).at(1, 1));
        let slam = AbilitySpec::active("slam", 4, 1, TargetType::Enemy);
        let mut ability = Ability::from_spec(&slam);
        ability.current_cooldown = 3;
        h.piece_mut(ally).ability = Some(ability);
        let target = target_of(&h, ally);

        let behavior = ChampionKind::Timekeeper.behavior();
        h.with_ctx(|ctx| behavior.on_skill(ctx, me, target));

        let ally = h.piece(ally);
        assert!(ally.ability.as_ref().is_some_and(|a| a.is_ready()));
        assert_eq!(ally.speed(), 3);
    }

    #[test]
    fn oracle_heals_ally_and_self() {
        let mut h = Harness::new();
        let me = h.add(
            PieceBuilder::new("oracle")
                .kind(ChampionKind::Oracle)
                .side(Side::Blue)
                .max_hp(100)
                .hp(50)
                .ability_power(10),
        );
        let ally = h.add(PieceBuilder::new("ally").side(Side::Blue).hp(20).at(2, 2));
        let target = target_of(&h, ally);

        h.with_ctx(|ctx| {
            let behavior = ChampionKind::Oracle.behavior();
            behavior.on_skill(ctx, me, target);
            behavior.on_pre_enter_turn(ctx, me);
        });

        assert_eq!(h.piece(ally).hp, 70);
        assert_eq!(h.piece(me).hp, 60);
        assert_eq!(h.piece(ally).position, Position::new(2, 2));
    }
}
