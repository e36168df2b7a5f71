//! Fixture API for tests of this crate and its downstream users.
//!
//! [`PieceBuilder`] produces pieces without a catalog, [`Harness`] owns a
//! board plus everything an [`EffectContext`] needs, and [`board`] holds a
//! small catalog for whole-game tests.

use arrayvec::ArrayVec;

use crate::champions::{ChampionKind, EffectContext};
use crate::config::GameConfig;
use crate::env::{GameEnv, ScriptedRng, StaticCatalog};
use crate::events::GameEvent;
use crate::state::{
    Ability, Aura, BaseStats, Directions, GameState, MovementFlags, Piece, PieceId, Position,
    ShieldQueue, Side,
};

/// Builds a [`Piece`] field by field. Defaults: blue, at the origin,
/// 100 HP, speed 1, attack range 1, base behavior.
#[derive(Clone, Debug)]
pub struct PieceBuilder {
    name: String,
    kind: ChampionKind,
    side: Side,
    position: Position,
    hp: Option<i32>,
    stats: BaseStats,
    move_directions: Directions,
    attack_directions: Directions,
    movement: MovementFlags,
    auras: Vec<Aura>,
    ability: Option<Ability>,
}

impl PieceBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ChampionKind::Base,
            side: Side::Blue,
            position: Position::ORIGIN,
            hp: None,
            stats: BaseStats {
                max_hp: 100,
                speed: 1,
                attack_range: 1,
                ..BaseStats::default()
            },
            move_directions: Directions::ALL,
            attack_directions: Directions::ALL,
            movement: MovementFlags::empty(),
            auras: Vec::new(),
            ability: None,
        }
    }

    pub fn kind(mut self, kind: ChampionKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.position = Position::new(x, y);
        self
    }

    /// Sets max HP; current HP follows unless [`hp`](Self::hp) is set.
    pub fn max_hp(mut self, value: i32) -> Self {
        self.stats.max_hp = value;
        self
    }

    pub fn hp(mut self, value: i32) -> Self {
        self.hp = Some(value);
        self
    }

    pub fn attack(mut self, value: i32) -> Self {
        self.stats.attack = value;
        self
    }

    pub fn ability_power(mut self, value: i32) -> Self {
        self.stats.ability_power = value;
        self
    }

    pub fn physical_resistance(mut self, value: i32) -> Self {
        self.stats.physical_resistance = value;
        self
    }

    pub fn magic_resistance(mut self, value: i32) -> Self {
        self.stats.magic_resistance = value;
        self
    }

    pub fn speed(mut self, value: i32) -> Self {
        self.stats.speed = value;
        self
    }

    pub fn range(mut self, value: i32) -> Self {
        self.stats.attack_range = value;
        self
    }

    pub fn gold_value(mut self, value: i32) -> Self {
        self.stats.gold_value = value;
        self
    }

    pub fn sunder(mut self, value: i32) -> Self {
        self.stats.sunder = value;
        self
    }

    pub fn critical_chance(mut self, value: i32) -> Self {
        self.stats.critical_chance = value;
        self
    }

    pub fn critical_damage(mut self, value: i32) -> Self {
        self.stats.critical_damage = value;
        self
    }

    pub fn cooldown_reduction(mut self, value: i32) -> Self {
        self.stats.cooldown_reduction = value;
        self
    }

    pub fn lifesteal(mut self, value: i32) -> Self {
        self.stats.lifesteal = value;
        self
    }

    pub fn damage_amplification(mut self, value: i32) -> Self {
        self.stats.damage_amplification = value;
        self
    }

    pub fn movement(mut self, flags: MovementFlags) -> Self {
        self.movement = flags;
        self
    }

    pub fn move_directions(mut self, directions: Directions) -> Self {
        self.move_directions = directions;
        self
    }

    pub fn attack_directions(mut self, directions: Directions) -> Self {
        self.attack_directions = directions;
        self
    }

    pub fn aura(mut self, aura: Aura) -> Self {
        self.auras.push(aura);
        self
    }

    pub fn ability(mut self, ability: Ability) -> Self {
        self.ability = Some(ability);
        self
    }

    /// The piece id is a placeholder; [`GameState::insert`] assigns the real one.
    pub fn build(self) -> Piece {
        let mut piece = Piece {
            id: PieceId(0),
            unit: self.name.clone(),
            name: self.name,
            kind: self.kind,
            side: self.side,
            position: self.position,
            hp: 0,
            stats: self.stats,
            move_directions: self.move_directions,
            attack_directions: self.attack_directions,
            movement: self.movement,
            items: ArrayVec::new(),
            debuffs: self.kind.behavior().innate_effects(),
            auras: self.auras,
            shields: ShieldQueue::new(),
            ability: self.ability,
            has_moved: false,
            attack_count: 0,
            death_round: None,
            linked_to: None,
            promotes_to: None,
        };
        piece.hp = self.hp.unwrap_or_else(|| piece.max_hp());
        piece
    }
}

/// A board with an empty catalog, a scripted RNG and an event sink.
pub struct Harness {
    pub state: GameState,
    pub catalog: StaticCatalog,
    pub config: GameConfig,
    pub rng: ScriptedRng,
    /// Every event emitted through [`with_ctx`](Self::with_ctx), in order.
    pub events: Vec<GameEvent>,
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

impl Harness {
    /// No monsters, an always-failing RNG.
    pub fn new() -> Self {
        Self::with_config(GameConfig::without_monsters())
    }

    pub fn with_config(config: GameConfig) -> Self {
        Self {
            state: GameState::new(&config),
            catalog: StaticCatalog::new(),
            config,
            rng: ScriptedRng::always_fail(),
            events: Vec::new(),
        }
    }

    pub fn with_rng(mut self, rng: ScriptedRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn add(&mut self, builder: PieceBuilder) -> PieceId {
        self.state.insert(builder.build())
    }

    /// # Panics
    /// If no piece has this id.
    pub fn piece(&self, id: PieceId) -> &Piece {
        self.state
            .piece(id)
            .unwrap_or_else(|| panic!("no piece {id} on the board"))
    }

    /// # Panics
    /// If no piece has this id.
    pub fn piece_mut(&mut self, id: PieceId) -> &mut Piece {
        self.state
            .piece_mut(id)
            .unwrap_or_else(|| panic!("no piece {id} on the board"))
    }

    pub fn env(&self) -> GameEnv<'_> {
        GameEnv::with_catalog(&self.catalog, &self.config)
    }

    /// Runs `f` against the board and records what it emitted.
    pub fn with_ctx<R>(&mut self, f: impl FnOnce(&mut EffectContext<'_>) -> R) -> R {
        let env = GameEnv::with_catalog(&self.catalog, &self.config);
        let mut ctx = EffectContext::new(&mut self.state, env, &mut self.rng);
        let result = f(&mut ctx);
        self.events.extend(ctx.into_events());
        result
    }
}

/// A compact catalog and opening layout for whole-game tests.
pub mod board {
    use crate::champions::SOLDIER_UNIT;
    use crate::env::{AbilitySpec, ItemDefinition, ItemTag, StaticCatalog, UnitTemplate};
    use crate::state::{
        BaseStats, Directions, GameState, MovementFlags, PieceId, Position, Side, TargetType,
    };
    use crate::stats::{StatKind, StatModifier};

    fn stats(max_hp: i32, attack: i32, speed: i32, attack_range: i32) -> BaseStats {
        BaseStats {
            max_hp,
            attack,
            speed,
            attack_range,
            gold_value: 3,
            ..BaseStats::default()
        }
    }

    /// Kings, minions, a knight, an archer, a sand emperor and its
    /// soldier, plus three items.
    pub fn catalog() -> StaticCatalog {
        let mut catalog = StaticCatalog::new();

        catalog.insert_unit(UnitTemplate::new("king", stats(120, 15, 1, 1)));
        let mut minion = UnitTemplate::new("minion", stats(40, 10, 1, 1))
            .with_movement(MovementFlags::CANNOT_MOVE_BACKWARD)
            .promoting_to("super_minion");
        minion.move_directions = Directions::VERTICAL;
        catalog.insert_unit(minion);
        catalog.insert_unit(UnitTemplate::new("super_minion", stats(90, 25, 1, 1)));
        catalog.insert_unit(UnitTemplate::new("knight", stats(80, 25, 2, 1)));
        catalog.insert_unit(UnitTemplate::new("ranger", stats(60, 18, 1, 3)));
        catalog.insert_unit(
            UnitTemplate::new(
                "sand_emperor",
                BaseStats {
                    ability_power: 40,
                    ..stats(70, 10, 1, 2)
                },
            )
            .with_ability(AbilitySpec::active("arise", 2, 2, TargetType::Ally)),
        );
        catalog.insert_unit(UnitTemplate::new(SOLDIER_UNIT, stats(50, 15, 1, 1)));

        let sharp = StatModifier::add(StatKind::Attack, 10);
        catalog.insert_item(ItemDefinition::new("long_sword", 4, vec![sharp]));
        let bane = StatModifier::add(StatKind::Attack, 5);
        catalog.insert_item(
            ItemDefinition::new("giants_bane", 8, vec![bane])
                .tagged(ItemTag::GiantSlayer)
                .unique(),
        );
        catalog.insert_item(
            ItemDefinition::new("quicksilver_charm", 3, Vec::new())
                .tagged(ItemTag::DebuffImmunity)
                .consumable(),
        );
        catalog
    }

    /// Places both kings on their back ranks, blue first.
    pub fn kings(state: &mut GameState, catalog: &StaticCatalog) -> (PieceId, PieceId) {
        let Some(king) = crate::env::UnitOracle::template(catalog, "king") else {
            panic!("fixture catalog has no king");
        };
        let blue = state.spawn(king, Side::Blue, Position::new(4, 0));
        let red = state.spawn(king, Side::Red, Position::new(4, 7));
        (blue, red)
    }
}
