use crate::state::Position;

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Number of columns on the board.
    pub board_width: i32,
    /// Number of rows on the board. Blue's home rank is row 0, Red's is the last row.
    pub board_height: i32,
    /// Gold each player starts the game with.
    pub starting_gold: u32,
    /// Gold granted to a player whenever one of their turns begins.
    pub passive_income: u32,
    /// Percentage by which healing is reduced on a wounded piece.
    pub wounded_heal_reduction: i32,
    /// Target HP above which a giant-slayer item amplifies damage.
    pub giant_slayer_threshold: i32,
    /// Extra damage amplification granted by a giant-slayer item.
    pub giant_slayer_bonus: i32,
    /// Turns of debuff immunity granted when an immunity charm is consumed.
    pub immunity_duration: i32,
    /// Critical damage percentage used when a piece has no critical damage stat.
    pub default_critical_damage: i32,
    /// How shield-breaker items interact with the target's shield queue.
    pub shield_breaker: ShieldBreakerPolicy,
    /// Neutral monsters placed on the board on a fixed schedule.
    pub monster_spawns: Vec<MonsterSpawn>,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum items a single piece may hold.
    pub const MAX_ITEMS: usize = 3;
    /// Maximum live soldiers linked to one sand emperor.
    pub const MAX_SOLDIERS: usize = 3;
    /// Maximum nesting of damage hooks within one resolution (reflections etc.).
    pub const MAX_HOOK_DEPTH: u8 = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_BOARD_SIZE: i32 = 8;
    pub const DEFAULT_STARTING_GOLD: u32 = 10;
    pub const DEFAULT_PASSIVE_INCOME: u32 = 2;
    pub const DEFAULT_WOUNDED_REDUCTION: i32 = 50;
    pub const DEFAULT_GIANT_SLAYER_THRESHOLD: i32 = 200;
    pub const DEFAULT_GIANT_SLAYER_BONUS: i32 = 15;
    pub const DEFAULT_IMMUNITY_DURATION: i32 = 2;
    pub const DEFAULT_CRITICAL_DAMAGE: i32 = 150;

    pub fn new() -> Self {
        Self {
            board_width: Self::DEFAULT_BOARD_SIZE,
            board_height: Self::DEFAULT_BOARD_SIZE,
            starting_gold: Self::DEFAULT_STARTING_GOLD,
            passive_income: Self::DEFAULT_PASSIVE_INCOME,
            wounded_heal_reduction: Self::DEFAULT_WOUNDED_REDUCTION,
            giant_slayer_threshold: Self::DEFAULT_GIANT_SLAYER_THRESHOLD,
            giant_slayer_bonus: Self::DEFAULT_GIANT_SLAYER_BONUS,
            immunity_duration: Self::DEFAULT_IMMUNITY_DURATION,
            default_critical_damage: Self::DEFAULT_CRITICAL_DAMAGE,
            shield_breaker: ShieldBreakerPolicy::default(),
            monster_spawns: Self::default_monster_spawns(),
        }
    }

    /// The standard neutral monster schedule: a drake on the left flank and
    /// a titan on the right, both respawning ten rounds after being slain.
    pub fn default_monster_spawns() -> Vec<MonsterSpawn> {
        vec![
            MonsterSpawn::new("drake", Position::new(0, 3), 8, 10),
            MonsterSpawn::new("titan", Position::new(7, 4), 20, 10),
        ]
    }

    /// Configuration without any neutral monsters.
    pub fn without_monsters() -> Self {
        Self {
            monster_spawns: Vec::new(),
            ..Self::new()
        }
    }

    /// Returns true if the position lies on the board.
    pub fn contains(&self, position: Position) -> bool {
        (0..self.board_width).contains(&position.x) && (0..self.board_height).contains(&position.y)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A neutral monster placement on the spawn schedule.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterSpawn {
    /// Unit catalog key of the monster.
    pub unit: String,
    pub position: Position,
    /// Round at which the monster first appears.
    pub first_round: u32,
    /// Rounds between the monster's death and its respawn. Zero disables respawning.
    pub respawn_interval: u32,
}

impl MonsterSpawn {
    pub fn new(
        unit: impl Into<String>,
        position: Position,
        first_round: u32,
        respawn_interval: u32,
    ) -> Self {
        Self {
            unit: unit.into(),
            position,
            first_round,
            respawn_interval,
        }
    }
}

/// Behavior of items tagged as shield breakers.
///
/// The precise permanence of the shield reduction is not settled, so the
/// interaction is isolated behind this policy and disabled by default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ShieldBreakerPolicy {
    /// Shield breakers have no effect on absorption.
    #[default]
    Disabled,
    /// Every shield on the target is halved (floored) before absorption and
    /// the reduced amount is persisted.
    HalveStoredAmount,
}
