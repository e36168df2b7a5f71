//! Replays the bundled scenario end to end.

use std::path::Path;

use battler_content::ContentFactory;
use battler_core::{GameEnv, PcgRng, Side};
use battler_sim::{Replay, Scenario, Step};

fn skirmish() -> Scenario {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios/skirmish.ron");
    Scenario::load(&path).expect("bundled scenario")
}

fn run(scenario: &Scenario, seed: u64, strict: bool) -> Replay {
    let factory = ContentFactory::bundled();
    let config = scenario.configure(factory.load_config().expect("config"));
    let catalog = factory.load_catalog(&config).expect("catalog");
    let mut state = scenario.build_board(&config, &catalog).expect("board");
    let mut rng = PcgRng::seed_from_u64(seed);
    battler_sim::replay(
        &mut state,
        GameEnv::with_catalog(&catalog, &config),
        &mut rng,
        seed,
        &scenario.actions,
        strict,
    )
}

#[test]
fn same_seed_same_root() {
    let scenario = skirmish();

    let first = run(&scenario, scenario.seed, false);
    let second = run(&scenario, scenario.seed, false);

    assert_eq!(first.state_root, second.state_root);
    assert_eq!(first.state_root.len(), 64);
    assert_eq!(first.steps.len(), scenario.actions.len());
}

#[test]
fn scripted_rejection_is_recorded_and_skipped() {
    let scenario = skirmish();
    let replay = run(&scenario, scenario.seed, false);

    let accepted = replay.steps.iter().filter(|s| s.is_accepted()).count();
    assert_eq!(accepted, scenario.actions.len() - 1);
    let Some(Step::Rejected { index, command, .. }) = replay.steps.last() else {
        panic!("last command should be rejected");
    };
    assert_eq!(*index, scenario.actions.len() - 1);
    assert_eq!(command.acting_side, Side::Red);
    assert_eq!(replay.final_round, accepted as u32);
}

#[test]
fn strict_mode_stops_at_first_rejection() {
    let mut scenario = skirmish();
    let last = scenario.actions.pop().expect("non-empty");
    scenario.actions.insert(0, last);

    let replay = run(&scenario, scenario.seed, true);

    assert_eq!(replay.steps.len(), 1);
    assert!(!replay.steps[0].is_accepted());
    assert_eq!(replay.final_round, 0);
}

#[test]
fn replay_serializes_to_json() {
    let scenario = skirmish();
    let replay = run(&scenario, 1, false);

    let json = serde_json::to_value(&replay).expect("json");
    assert_eq!(json["seed"], 1);
    assert_eq!(json["steps"][0]["result"], "accepted");
}
