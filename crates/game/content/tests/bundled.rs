//! Loads the shipped data and exercises it through the engine.

use std::io::Write;

use battler_content::{ContentFactory, ItemLoader, UnitLoader};
use battler_core::{
    ActionCommand, ChampionKind, GameEngine, GameEnv, GameState, ItemOracle, PcgRng, Position, Side,
    UnitOracle,
};
use strum::IntoEnumIterator;

#[test]
fn bundled_content_loads() {
    let (config, catalog) = ContentFactory::bundled().load_all().expect("bundled data");

    assert!(catalog.unit_count() >= 25);
    assert!(catalog.item_count() >= 12);
    assert_eq!(config.board_width, 8);
    for spawn in &config.monster_spawns {
        let monster = catalog.template(&spawn.unit).expect("monster template");
        assert!(monster.bounty.is_some(), "{} has no bounty", spawn.unit);
    }
}

#[test]
fn every_champion_has_a_template() {
    let catalog = ContentFactory::bundled()
        .load_catalog(&battler_core::GameConfig::without_monsters())
        .expect("catalog");

    for kind in ChampionKind::iter().filter(|kind| *kind != ChampionKind::Base) {
        assert!(
            catalog.template(kind.as_ref()).is_some(),
            "no unit for {kind}"
        );
    }
    for name in catalog.unit_names() {
        let known = name.parse::<ChampionKind>().is_ok();
        assert!(known, "{name} has no behavior");
    }
}

#[test]
fn recipes_resolve_against_the_catalog() {
    let catalog = ContentFactory::bundled()
        .load_catalog(&battler_core::GameConfig::without_monsters())
        .expect("catalog");

    for name in catalog.item_names() {
        let item = catalog.definition(name).expect("listed item");
        for component in &item.recipe {
            let found = catalog.definition(component).is_some();
            assert!(found, "{name} needs {component}");
        }
    }
}

#[test]
fn bundled_units_play_a_turn() {
    let factory = ContentFactory::bundled();
    let config = battler_core::GameConfig::without_monsters();
    let catalog = factory.load_catalog(&config).expect("catalog");
    let mut state = GameState::new(&config);
    for (unit, side, x, y) in [
        ("king", Side::Blue, 4, 0),
        ("king", Side::Red, 4, 7),
        ("pyromancer", Side::Blue, 3, 2),
        ("thornback", Side::Red, 3, 4),
    ] {
        let template = catalog.template(unit).expect("template");
        state.spawn(template, side, Position::new(x, y));
    }

    let mut rng = PcgRng::seed_from_u64(3);
    let env = GameEnv::with_catalog(&catalog, &config);
    let (caster, target) = (Position::new(3, 2), Position::new(3, 4));
    let fireball = ActionCommand::skill(Side::Blue, caster, Some(target));
    let outcome = GameEngine::new(&mut state)
        .process_action(env, &mut rng, &fireball)
        .expect("fireball");

    assert!(outcome.total_hp_lost() > 0);
    let thornback = state.piece_at(target).expect("thornback survives");
    assert!(thornback.debuffs.iter().any(|d| d.id == "burn"));
}

fn temp_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(content.as_bytes()).expect("write");
    file
}

#[test]
fn malformed_files_name_the_path() {
    let broken = temp_file("(units: [ (name: \"king\" ");

    let err = UnitLoader::load(broken.path()).expect_err("truncated");
    let message = format!("{err:#}");
    assert!(message.contains(&broken.path().display().to_string()));
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");

    assert!(ItemLoader::load(&dir.path().join("items.ron")).is_err());
    assert!(ContentFactory::new(dir.path()).load_all().is_err());
}

#[test]
fn unknown_monster_unit_fails_the_catalog() {
    let dir = tempfile::tempdir().expect("temp dir");
    let bundled = ContentFactory::bundled();
    for file in ["units.ron", "items.ron"] {
        std::fs::copy(bundled.data_dir().join(file), dir.path().join(file)).expect("copy");
    }
    let config = r#"
[[monster_spawns]]
unit = "kraken"
position = { x = 1, y = 1 }
first_round = 1
respawn_interval = 0
"#;
    std::fs::write(dir.path().join("config.toml"), config).expect("write config");

    let err = ContentFactory::new(dir.path())
        .load_all()
        .expect_err("kraken");
    assert!(format!("{err:#}").contains("kraken"));
}
