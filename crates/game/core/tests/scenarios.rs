//! Whole-game scenarios driven through the public engine API.

use battler_core::combat::apply_damage;
use battler_core::state::INFINITE;
use battler_core::testing::{Harness, PieceBuilder, board};
use battler_core::{
    ActionCommand, ActionError, ActionOutcome, ChampionKind, DamageType, Debuff, ExecuteError,
    GameConfig, GameEngine, GameEnv, GameEvent, GameResult, GameState, GameStatus, GoldReason,
    ItemInstance, ItemOracle, PcgRng, PieceId, Position, Shield, Side, StatKind, StatModifier,
    StaticCatalog, UnitOracle, effective_stat,
};

struct Game {
    state: GameState,
    catalog: StaticCatalog,
    config: GameConfig,
    rng: PcgRng,
}

impl Game {
    fn new() -> Self {
        let config = GameConfig::without_monsters();
        let catalog = board::catalog();
        let mut state = GameState::new(&config);
        board::kings(&mut state, &catalog);
        Self {
            state,
            catalog,
            config,
            rng: PcgRng::seed_from_u64(7),
        }
    }

    fn spawn(&mut self, unit: &str, side: Side, x: i32, y: i32) -> PieceId {
        let template = self
            .catalog
            .template(unit)
            .unwrap_or_else(|| panic!("fixture catalog has no {unit}"));
        self.state.spawn(template, side, Position::new(x, y))
    }

    fn act(&mut self, command: ActionCommand) -> Result<ActionOutcome, ExecuteError> {
        let env = GameEnv::with_catalog(&self.catalog, &self.config);
        GameEngine::new(&mut self.state).process_action(env, &mut self.rng, &command)
    }

    fn pass_red(&mut self) {
        let king = self
            .state
            .living()
            .find(|piece| piece.side == Side::Red && piece.unit == "king")
            .map(|piece| piece.position)
            .expect("red king alive");
        let dest = Position::new(king.x, if king.y == 7 { 6 } else { 7 });
        self.act(ActionCommand::move_to(Side::Red, king, dest))
            .expect("red king shuffles");
    }
}

fn at((x, y): (i32, i32)) -> Position {
    Position::new(x, y)
}

fn step(side: Side, from: (i32, i32), to: (i32, i32)) -> ActionCommand {
    ActionCommand::move_to(side, at(from), at(to))
}

fn strike(side: Side, from: (i32, i32), to: (i32, i32)) -> ActionCommand {
    ActionCommand::attack(side, at(from), at(to))
}

#[test]
fn stat_pipeline_folds_items_then_debuffs() {
    let mut piece = PieceBuilder::new("duelist").attack(50).build();
    let catalog = board::catalog();
    let sword = catalog.definition("long_sword").expect("sword");
    piece.items.push(ItemInstance::from_definition(sword));
    let double = StatModifier::multiply(StatKind::Attack, 200);
    let rage = Debuff::new("rage", 2).with_effects(vec![double]);
    piece.debuffs.push(rage);

    assert_eq!(effective_stat(&piece, StatKind::Attack), 120);
}

#[test]
fn rounds_alternate_sides_and_pay_income() {
    let mut game = Game::new();
    let knight = game.spawn("knight", Side::Blue, 1, 1);
    let gold = game.state.treasury.get(Side::Red);

    let first = game
        .act(step(Side::Blue, (1, 1), (1, 3)))
        .expect("knight moves");
    assert_eq!(first.round, 0);
    assert_eq!(first.acting_side, Side::Blue);
    assert_eq!(game.state.round, 1);
    assert_eq!(game.state.active_side(), Side::Red);
    assert_eq!(first.gold_awarded(Side::Red, GoldReason::Income), 2);
    assert_eq!(game.state.treasury.get(Side::Red), gold + 2);

    game.pass_red();
    assert_eq!(game.state.round, 2);
    assert_eq!(game.state.active_side(), Side::Blue);
    assert!(!game.state.piece(knight).expect("knight").has_moved);
}

#[test]
fn rejected_command_leaves_board_untouched() {
    let mut game = Game::new();
    game.spawn("knight", Side::Blue, 1, 1);
    let snapshot = game.state.clone();

    let err = game
        .act(step(Side::Blue, (1, 1), (1, 6)))
        .expect_err("too far");
    assert!(err.is_rejection());
    assert_eq!(game.state, snapshot);

    let err = game
        .act(step(Side::Red, (4, 7), (4, 6)))
        .expect_err("blue to move");
    let expected = ActionError::NotYourTurn(Side::Blue);
    assert_eq!(err.as_rejection(), Some(&expected));
    assert_eq!(game.state, snapshot);
}

#[test]
fn kill_gold_is_paid_once_and_the_body_is_removed() {
    let mut game = Game::new();
    game.spawn("knight", Side::Blue, 2, 2);
    let minion = game.spawn("minion", Side::Red, 2, 3);

    let first = game
        .act(strike(Side::Blue, (2, 2), (2, 3)))
        .expect("first hit");
    assert_eq!(first.total_hp_lost(), 25);
    assert!(first.kills().is_empty());

    game.pass_red();
    let second = game
        .act(strike(Side::Blue, (2, 2), (2, 3)))
        .expect("second hit");

    assert_eq!(second.kills(), vec![minion]);
    assert_eq!(second.gold_awarded(Side::Blue, GoldReason::Kill), 3);
    assert!(game.state.piece(minion).is_none());
    assert!(!game.state.is_occupied(Position::new(2, 3)));
}

#[test]
fn minion_promotes_once_on_the_far_rank() {
    let mut game = Game::new();
    let minion = game.spawn("minion", Side::Blue, 0, 6);
    let promoted_event = |e: &GameEvent| matches!(e, GameEvent::Promoted { .. });

    let outcome = game
        .act(step(Side::Blue, (0, 6), (0, 7)))
        .expect("minion advances");
    let promoted_here = |e: &GameEvent| {
        matches!(e, GameEvent::Promoted { piece, .. } if *piece == minion)
    };
    assert!(outcome.has_event(promoted_here));

    let promoted = game.state.piece(minion).expect("still on board");
    assert_eq!(promoted.unit, "super_minion");
    assert_eq!(promoted.kind, ChampionKind::SuperMinion);
    assert_eq!(promoted.hp, 90);
    assert_eq!(promoted.promotes_to, None);

    game.pass_red();
    game.act(step(Side::Blue, (0, 7), (0, 6)))
        .expect("steps back");
    game.pass_red();
    let again = game
        .act(step(Side::Blue, (0, 6), (0, 7)))
        .expect("minion returns to the far rank");
    assert!(!again.has_event(promoted_event));
}

#[test]
fn emperor_death_takes_its_soldiers() {
    let mut game = Game::new();
    let emperor = game.spawn("sand_emperor", Side::Blue, 3, 1);
    let recruit = game.spawn("minion", Side::Blue, 3, 2);
    game.spawn("knight", Side::Red, 2, 2);

    let arise = ActionCommand::skill(Side::Blue, Position::new(3, 1), Some(Position::new(3, 2)));
    let outcome = game.act(arise).expect("recruits");
    assert!(outcome.has_event(|e| matches!(e, GameEvent::SoldierRecruited { .. })));
    let soldier = game.state.piece(recruit).expect("soldier");
    assert_eq!(soldier.kind, ChampionKind::Soldier);
    assert_eq!(soldier.linked_to, Some(emperor));

    game.state.piece_mut(emperor).expect("emperor").hp = 1;
    let outcome = game
        .act(strike(Side::Red, (2, 2), (3, 1)))
        .expect("knight strikes");

    let kills = outcome.kills();
    assert!(kills.contains(&emperor));
    assert!(kills.contains(&recruit));
    assert!(game.state.piece(recruit).is_none());
}

#[test]
fn shields_drain_oldest_first_and_break_exactly() {
    let mut h = Harness::new();
    let target = h.add(PieceBuilder::new("dummy").side(Side::Red).max_hp(100));
    for amount in [10, 20, 30] {
        let shield = Shield::new(format!("s{amount}"), amount, INFINITE);
        h.piece_mut(target).shields.push(shield);
    }

    h.with_ctx(|ctx| apply_damage(ctx, None, target, 15, DamageType::True, 0));
    let left: Vec<i32> = h.piece(target).shields.iter().map(|s| s.amount).collect();
    assert_eq!(left, vec![15, 30]);

    let report = h.with_ctx(|ctx| apply_damage(ctx, None, target, 45, DamageType::True, 0));
    assert!(h.piece(target).shields.is_empty());
    assert_eq!(report.hp_lost, 0);
    assert_eq!(h.piece(target).hp, 100);
}

#[test]
fn last_king_standing_wins_and_the_game_locks() {
    let mut game = Game::new();
    game.spawn("knight", Side::Blue, 4, 5);
    let red_king = game
        .state
        .living()
        .find(|p| p.side == Side::Red)
        .map(|p| p.id)
        .expect("red king");
    game.state.piece_mut(red_king).expect("king").hp = 10;

    let outcome = game
        .act(step(Side::Blue, (4, 5), (4, 6)))
        .expect("knight approaches");
    assert_eq!(outcome.status, GameStatus::InProgress);
    game.act(step(Side::Red, (4, 7), (3, 7)))
        .expect("king steps aside");
    let outcome = game
        .act(strike(Side::Blue, (4, 6), (3, 7)))
        .expect("finishing blow");

    let blue_wins = GameStatus::Finished(GameResult::Winner(Side::Blue));
    assert_eq!(outcome.status, blue_wins);
    let err = game
        .act(step(Side::Red, (3, 7), (3, 6)))
        .expect_err("game over");
    assert_eq!(err.as_rejection(), Some(&ActionError::GameFinished));
}

#[test]
fn same_seed_replays_identically() {
    fn play(seed: u64) -> (GameState, Vec<ActionOutcome>) {
        let mut game = Game::new();
        game.rng = PcgRng::seed_from_u64(seed);
        let duelist = PieceBuilder::new("duelist")
            .at(2, 2)
            .attack(20)
            .critical_chance(50)
            .critical_damage(200)
            .build();
        game.state.insert(duelist);
        game.spawn("super_minion", Side::Red, 2, 3);

        let mut outcomes = Vec::new();
        for _ in 0..3 {
            let outcome = game
                .act(strike(Side::Blue, (2, 2), (2, 3)))
                .expect("duelist attacks");
            outcomes.push(outcome);
            game.pass_red();
        }
        (game.state, outcomes)
    }

    assert_eq!(play(11), play(11));
}
