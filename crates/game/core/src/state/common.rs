use std::fmt;

/// Stable identifier for a piece on the board.
///
/// Ids are allocated monotonically by [`GameState`](super::GameState) and never reused,
/// so an id held across actions either resolves to the same piece or to nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PieceId(pub u32);

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discrete board square expressed as (column, row).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev (king-move) distance between two squares.
    pub fn chebyshev(self, other: Position) -> u32 {
        let dx = (self.x - other.x).unsigned_abs();
        let dy = (self.y - other.y).unsigned_abs();
        dx.max(dy)
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Unit step from `self` towards `other` along each axis.
    pub fn step_towards(self, other: Position) -> (i32, i32) {
        ((other.x - self.x).signum(), (other.y - self.y).signum())
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Team allegiance of a piece.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Side {
    /// Starts on row 0 and advances towards higher rows.
    Blue,
    /// Starts on the last row and advances towards row 0.
    Red,
    /// Neutral monsters; hostile to both players and never take turns.
    Neutral,
}

impl Side {
    /// The side whose turn it is in the given round. Even rounds belong to Blue.
    pub const fn for_round(round: u32) -> Side {
        if round % 2 == 0 { Side::Blue } else { Side::Red }
    }

    /// The opposing player, if this side is a player.
    pub const fn opponent(self) -> Option<Side> {
        match self {
            Side::Blue => Some(Side::Red),
            Side::Red => Some(Side::Blue),
            Side::Neutral => None,
        }
    }

    /// Row delta that moves a piece of this side towards the enemy.
    pub const fn forward(self) -> i32 {
        match self {
            Side::Blue => 1,
            Side::Red => -1,
            Side::Neutral => 0,
        }
    }

    pub const fn is_player(self) -> bool {
        !matches!(self, Side::Neutral)
    }

    /// Returns true if pieces of the two sides fight each other.
    pub fn is_hostile_to(self, other: Side) -> bool {
        self != other
    }
}
