//! Action execution and turn scheduling.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]. Each
//! command goes through two phases:
//!
//! 1. **plan**: read-only validation of side, caster, target and the
//!    champion's own checks. Any failure returns before the board is touched.
//! 2. **resolve**: dispatch to the caster's [`Champion`](crate::Champion)
//!    hook, then post-action cleanup and round advancement.

mod errors;
pub mod shop;
mod turns;

pub use errors::{ActionError, ExecuteError};
pub use shop::Purchase;

use crate::action::{ActionCommand, ActionOutcome, EventKind, validate_skill_target};
use crate::champions::{EffectContext, SkillTarget};
use crate::env::{CombatRng, GameEnv};
use crate::events::GameEvent;
use crate::state::{AbilityKind, GameState, PieceId, Position, Side, TargetType};

/// A command that passed validation, bound to piece ids.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Plan {
    Move { caster: PieceId, dest: Position },
    Attack { caster: PieceId, target: PieceId },
    Skill {
        caster: PieceId,
        target: SkillTarget,
    },
    Buy {
        caster: PieceId,
        side: Side,
        purchase: Purchase,
    },
}

/// Drives one game. Borrows the board for the duration of a command.
pub struct GameEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    /// Readies a freshly built board: spawns monsters due at the current
    /// round and projects auras. Call once before the first command.
    pub fn open(&mut self, env: GameEnv<'_>, rng: &mut dyn CombatRng) -> Vec<GameEvent> {
        let mut ctx = EffectContext::new(self.state, env, rng);
        turns::open_board(&mut ctx);
        ctx.into_events()
    }

    /// Resolves exactly one command and advances the round.
    ///
    /// A rejected command returns [`ExecuteError::Rejected`] and leaves the
    /// board unchanged. Integrity failures (no caster on the square, a
    /// target id that does not match) are reported through the other
    /// variants, also before any mutation.
    pub fn process_action(
        &mut self,
        env: GameEnv<'_>,
        rng: &mut dyn CombatRng,
        command: &ActionCommand,
    ) -> Result<ActionOutcome, ExecuteError> {
        let plan = self.plan(&env, command)?;
        let round = self.state.round;
        tracing::debug!(
            round,
            side = %command.acting_side,
            kind = %command.kind,
            caster = %command.caster,
            target = ?command.target,
            "resolving action"
        );

        let mut ctx = EffectContext::new(self.state, env, rng);
        resolve(&mut ctx, plan);
        turns::finish_action(&mut ctx);
        let status = ctx.state.status;

        Ok(ActionOutcome {
            round,
            acting_side: command.acting_side,
            kind: command.kind,
            events: ctx.into_events(),
            status,
        })
    }

    // ========================================================================
    // Validation
    // ========================================================================

    fn plan(&self, env: &GameEnv<'_>, command: &ActionCommand) -> Result<Plan, ExecuteError> {
        let state = &*self.state;
        let config = env.config();

        if state.status.is_finished() {
            return Err(ActionError::GameFinished.into());
        }
        if command.acting_side == Side::Neutral {
            return Err(ActionError::NeutralCaster.into());
        }
        let active = state.active_side();
        if command.acting_side != active {
            return Err(ActionError::NotYourTurn(active).into());
        }

        let caster = state
            .piece_at(command.caster)
            .filter(|p| p.side == command.acting_side)
            .ok_or(ExecuteError::CasterNotFound {
                side: command.acting_side,
                position: command.caster,
            })?;

        let target_piece = command.target.and_then(|square| state.piece_at(square));
        if let Some(expected) = command.target_unit {
            let found = target_piece.map(|p| p.id);
            if found != Some(expected) {
                return Err(ExecuteError::TargetMismatch { expected, found });
            }
        }

        if caster.is_stunned() {
            return Err(ActionError::Stunned.into());
        }

        let behavior = caster.kind.behavior();
        let missing = || ActionError::MissingTarget { kind: command.kind };

        let plan = match command.kind {
            EventKind::Move => {
                if caster.is_rooted() {
                    return Err(ActionError::Rooted.into());
                }
                let dest = command.target.ok_or_else(missing)?;
                behavior
                    .can_move_to(state, config, caster, dest)
                    .map_err(ActionError::from)?;
                if state.is_occupied(dest) {
                    return Err(ActionError::Occupied(dest).into());
                }
                Plan::Move {
                    caster: caster.id,
                    dest,
                }
            }

            EventKind::Attack => {
                let dest = command.target.ok_or_else(missing)?;
                let target = target_piece.ok_or(ActionError::NoTarget(dest))?;
                if !target.side.is_hostile_to(caster.side) {
                    return Err(ActionError::NotHostile(target.id).into());
                }
                behavior
                    .can_attack(state, config, caster, dest)
                    .map_err(ActionError::from)?;
                Plan::Attack {
                    caster: caster.id,
                    target: target.id,
                }
            }

            EventKind::Skill => {
                let ability = caster.ability.as_ref().ok_or(ActionError::NoAbility)?;
                if ability.kind == AbilityKind::Passive {
                    return Err(ActionError::PassiveAbility.into());
                }
                if !ability.is_ready() {
                    return Err(ActionError::OnCooldown(ability.current_cooldown).into());
                }
                if ability.target != TargetType::None && command.target.is_none() {
                    return Err(missing().into());
                }
                validate_skill_target(state, config, caster, ability, command.target)
                    .map_err(ActionError::from)?;

                let target = match (ability.target, command.target) {
                    (TargetType::None, _) | (_, None) => SkillTarget::NoTarget,
                    (TargetType::Square, Some(square)) => SkillTarget::Square(square),
                    (relation, Some(square)) => {
                        let piece = target_piece.ok_or(ActionError::NoTarget(square))?;
                        match relation {
                            TargetType::Ally if piece.side != caster.side => {
                                return Err(ActionError::NotAlly(piece.id).into());
                            }
                            TargetType::Enemy if !piece.side.is_hostile_to(caster.side) => {
                                return Err(ActionError::NotHostile(piece.id).into());
                            }
                            _ => {}
                        }
                        SkillTarget::Piece {
                            id: piece.id,
                            position: square,
                        }
                    }
                };
                behavior.validate_skill(state, env, caster, ability, &target)?;
                Plan::Skill {
                    caster: caster.id,
                    target,
                }
            }

            EventKind::BuyItem => {
                let item = command.item.as_deref().ok_or(ActionError::MissingItem)?;
                let gold = state.treasury.get(caster.side);
                let purchase = shop::plan_purchase(gold, env, caster, item)?;
                Plan::Buy {
                    caster: caster.id,
                    side: caster.side,
                    purchase,
                }
            }
        };
        Ok(plan)
    }
}

// ============================================================================
// Resolution
// ============================================================================

fn resolve(ctx: &mut EffectContext<'_>, plan: Plan) {
    match plan {
        Plan::Move { caster, dest } => {
            if let Some(kind) = ctx.piece(caster).map(|p| p.kind) {
                kind.behavior().on_move(ctx, caster, dest);
            }
        }
        Plan::Attack { caster, target } => {
            if let Some(kind) = ctx.piece(caster).map(|p| p.kind) {
                kind.behavior().on_attack(ctx, caster, target);
            }
        }
        Plan::Skill { caster, target } => {
            let Some((kind, name)) = ctx
                .piece(caster)
                .and_then(|p| p.ability.as_ref().map(|a| (p.kind, a.name.clone())))
            else {
                return;
            };
            tracing::debug!(piece = %caster, ability = %name, ?target, "ability used");
            ctx.emit(GameEvent::AbilityUsed {
                piece: caster,
                ability: name,
            });
            kind.behavior().on_skill(ctx, caster, target);

            if let Some(piece) = ctx.piece_mut(caster) {
                let reduction = piece.cooldown_reduction();
                if let Some(ability) = piece.ability.as_mut() {
                    ability.start_cooldown(reduction);
                }
            }
        }
        Plan::Buy {
            caster,
            side,
            purchase,
        } => shop::purchase(ctx, caster, side, purchase),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::champions::ChampionKind;
    use crate::env::AbilitySpec;
    use crate::state::{Ability, Debuff, DebuffClass};
    use crate::testing::{Harness, PieceBuilder};

    fn pos(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    fn king(side: Side, y: i32) -> PieceBuilder {
        PieceBuilder::new("king")
            .kind(ChampionKind::King)
            .side(side)
            .max_hp(100)
            .at(4, y)
    }

    fn board() -> (Harness, PieceId, PieceId) {
        let mut h = Harness::new();
        h.add(king(Side::Blue, 0));
        h.add(king(Side::Red, 7));
        let knight = h.add(
            PieceBuilder::new("knight")
                .side(Side::Blue)
                .max_hp(80)
                .attack(25)
                .speed(2)
                .range(1)
                .at(2, 2),
        );
        let raider = h.add(
            PieceBuilder::new("raider")
                .side(Side::Red)
                .max_hp(60)
                .attack(10)
                .speed(2)
                .range(1)
                .at(2, 3),
        );
        (h, knight, raider)
    }

    fn run(h: &mut Harness, command: &ActionCommand) -> Result<ActionOutcome, ExecuteError> {
        let env = GameEnv::with_catalog(&h.catalog, &h.config);
        GameEngine::new(&mut h.state).process_action(env, &mut h.rng, command)
    }

    #[test]
    fn move_then_turn_passes() {
        let (mut h, knight, _) = board();
        let command = ActionCommand::move_to(Side::Blue, pos(2, 2), pos(3, 2));

        let outcome = run(&mut h, &command).expect("legal move");

        assert_eq!(h.piece(knight).position, pos(3, 2));
        assert_eq!(outcome.round, 0);
        assert_eq!(h.state.round, 1);
        let red_turn = |e: &GameEvent| {
            matches!(e, GameEvent::TurnStarted { side, .. } if *side == Side::Red)
        };
        assert!(outcome.has_event(red_turn));
    }

    #[test]
    fn rejection_leaves_board_untouched() {
        let (mut h, _, _) = board();
        let before = h.state.clone();
        let command = ActionCommand::move_to(Side::Blue, pos(2, 2), pos(2, 3));

        let err = run(&mut h, &command).unwrap_err();

        let occupied = ActionError::Occupied(pos(2, 3));
        assert_eq!(err, ExecuteError::Rejected(occupied));
        assert_eq!(h.state, before);
    }

    #[test]
    fn wrong_side_and_missing_caster() {
        let (mut h, _, _) = board();

        let red_attack = ActionCommand::attack(Side::Red, pos(2, 3), pos(2, 2));
        let wrong = run(&mut h, &red_attack);
        let expected = ExecuteError::Rejected(ActionError::NotYourTurn(Side::Blue));
        assert_eq!(wrong, Err(expected));

        let ghost_attack = ActionCommand::attack(Side::Blue, pos(6, 6), pos(2, 3));
        let nobody = run(&mut h, &ghost_attack);
        assert!(matches!(nobody, Err(ExecuteError::CasterNotFound { .. })));
    }

    #[test]
    fn target_id_mismatch_is_an_integrity_failure() {
        let (mut h, knight, _) = board();
        let command = ActionCommand::attack(Side::Blue, pos(2, 2), pos(2, 3)).expecting(knight);

        let err = run(&mut h, &command).unwrap_err();

        assert!(!err.is_rejection());
    }

    #[test]
    fn attack_resolves_damage() {
        let (mut h, _, raider) = board();
        let command = ActionCommand::attack(Side::Blue, pos(2, 2), pos(2, 3));

        let outcome = run(&mut h, &command).expect("legal attack");

        assert_eq!(h.piece(raider).hp, 35);
        assert_eq!(outcome.total_hp_lost(), 25);
    }

    #[test]
    fn skill_checks_readiness_and_starts_cooldown() {
        let (mut h, knight, _) = board();
        let harden = AbilitySpec::active("harden", 3, 0, TargetType::None);
        h.piece_mut(knight).kind = ChampionKind::Thornback;
        h.piece_mut(knight).ability = Some(Ability::from_spec(&harden));
        let skill = ActionCommand::skill(Side::Blue, pos(2, 2), None);

        run(&mut h, &skill).expect("ready");
        let cooldown = h.piece(knight).ability.as_ref().map(|a| a.current_cooldown);
        assert_eq!(cooldown, Some(3));
        assert!(h.piece(knight).has_debuff("hardened"));

        // red passes with a move, blue tries again while cooling down
        let red_move = ActionCommand::move_to(Side::Red, pos(2, 3), pos(1, 3));
        run(&mut h, &red_move).expect("red moves");
        let err = run(&mut h, &skill).unwrap_err();
        assert_eq!(err, ExecuteError::Rejected(ActionError::OnCooldown(2)));
    }

    #[test]
    fn stunned_pieces_cannot_act() {
        let (mut h, knight, _) = board();
        let stun = Debuff::new("stun", 2).class(DebuffClass::Stun);
        h.piece_mut(knight).debuffs.push(stun);
        let command = ActionCommand::move_to(Side::Blue, pos(2, 2), pos(3, 2));

        let err = run(&mut h, &command).unwrap_err();

        assert_eq!(err, ExecuteError::Rejected(ActionError::Stunned));
    }
}
