//! Movement and targeting geometry.
//!
//! Rules are checked in a fixed order and the first failure is reported:
//!
//! 1. destination differs from the current square
//! 2. destination lies on the board
//! 3. moves only: `CANNOT_MOVE_BACKWARD` rejects steps away from the enemy
//! 4. moves only: `VERTICAL_ONLY` rejects any horizontal component
//! 5. Chebyshev distance within the allowed speed or range
//! 6. displacement is exactly horizontal, vertical or diagonal
//! 7. the piece's direction flags allow that line
//! 8. for distances above 1, every intermediate square is free of living pieces

use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{Ability, Directions, GameState, MovementFlags, Piece, Position, TargetType};

/// Geometry violations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetingError {
    #[error("destination is the current square")]
    SameSquare,

    #[error("destination {0} is off the board")]
    OutOfBounds(Position),

    #[error("piece cannot move backward")]
    Backward,

    #[error("piece may only move vertically")]
    NotVertical,

    #[error("distance {distance} exceeds limit {limit}")]
    OutOfRange { distance: u32, limit: i32 },

    #[error("displacement is not a straight or diagonal line")]
    NotALine,

    #[error("piece cannot act along this direction")]
    DirectionNotAllowed,

    #[error("path blocked at {0}")]
    PathBlocked(Position),
}

impl GameError for TargetingError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::PathBlocked(_) | Self::OutOfRange { .. } => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::SameSquare => "TARGETING_SAME_SQUARE",
            Self::OutOfBounds(_) => "TARGETING_OUT_OF_BOUNDS",
            Self::Backward => "TARGETING_BACKWARD",
            Self::NotVertical => "TARGETING_NOT_VERTICAL",
            Self::OutOfRange { .. } => "TARGETING_OUT_OF_RANGE",
            Self::NotALine => "TARGETING_NOT_A_LINE",
            Self::DirectionNotAllowed => "TARGETING_DIRECTION_NOT_ALLOWED",
            Self::PathBlocked(_) => "TARGETING_PATH_BLOCKED",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Purpose {
    Move,
    Attack,
}

/// Checks that `piece` may move to `dest` with the given speed.
///
/// Occupancy of `dest` itself is not checked here.
pub fn validate_move(
    state: &GameState,
    config: &GameConfig,
    piece: &Piece,
    dest: Position,
    speed: i32,
) -> Result<(), TargetingError> {
    validate_line(state, config, piece, dest, speed, Purpose::Move)
}

/// Checks that `piece` may attack `dest` with the given range.
pub fn validate_attack(
    state: &GameState,
    config: &GameConfig,
    piece: &Piece,
    dest: Position,
    range: i32,
) -> Result<(), TargetingError> {
    validate_line(state, config, piece, dest, range, Purpose::Attack)
}

/// Geometry check for an ability target, branching on its target type.
pub fn validate_skill_target(
    state: &GameState,
    config: &GameConfig,
    piece: &Piece,
    ability: &Ability,
    dest: Option<Position>,
) -> Result<(), TargetingError> {
    match (ability.target, dest) {
        (TargetType::None, _) => Ok(()),
        (TargetType::Square, Some(dest)) => {
            validate_move(state, config, piece, dest, ability.range)
        }
        (_, Some(dest)) => validate_attack(state, config, piece, dest, ability.range),
        (_, None) => Err(TargetingError::SameSquare),
    }
}

fn validate_line(
    state: &GameState,
    config: &GameConfig,
    piece: &Piece,
    dest: Position,
    limit: i32,
    purpose: Purpose,
) -> Result<(), TargetingError> {
    let from = piece.position;
    if dest == from {
        return Err(TargetingError::SameSquare);
    }
    if !config.contains(dest) {
        return Err(TargetingError::OutOfBounds(dest));
    }

    let dx = dest.x - from.x;
    let dy = dest.y - from.y;

    if purpose == Purpose::Move {
        if piece.movement.contains(MovementFlags::CANNOT_MOVE_BACKWARD)
            && dy * piece.side.forward() < 0
        {
            return Err(TargetingError::Backward);
        }
        if piece.movement.contains(MovementFlags::VERTICAL_ONLY) && dx != 0 {
            return Err(TargetingError::NotVertical);
        }
    }

    let distance = from.chebyshev(dest);
    if i64::from(distance) > i64::from(limit) {
        return Err(TargetingError::OutOfRange { distance, limit });
    }

    let direction = if dy == 0 {
        Directions::HORIZONTAL
    } else if dx == 0 {
        Directions::VERTICAL
    } else if dx.abs() == dy.abs() {
        Directions::DIAGONAL
    } else {
        return Err(TargetingError::NotALine);
    };

    let allowed = match purpose {
        Purpose::Move => piece.move_directions,
        Purpose::Attack => piece.attack_directions,
    };
    if !allowed.contains(direction) {
        return Err(TargetingError::DirectionNotAllowed);
    }

    if distance > 1 {
        let (sx, sy) = from.step_towards(dest);
        let mut square = from.offset(sx, sy);
        while square != dest {
            if state.is_occupied(square) {
                return Err(TargetingError::PathBlocked(square));
            }
            square = square.offset(sx, sy);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Side;
    use crate::testing::PieceBuilder;

    fn board() -> (GameState, GameConfig) {
        let config = GameConfig::without_monsters();
        (GameState::new(&config), config)
    }

    fn pawn(side: Side, flags: MovementFlags) -> Piece {
        PieceBuilder::new("pawn")
            .side(side)
            .at(3, 3)
            .movement(flags)
            .build()
    }

    #[test]
    fn straight_and_diagonal_moves_within_speed() {
        let (state, config) = board();
        let piece = PieceBuilder::new("rook").at(3, 3).speed(3).build();
        let go = |x, y| validate_move(&state, &config, &piece, Position::new(x, y), 3);

        assert_eq!(go(3, 6), Ok(()));
        assert_eq!(go(5, 5), Ok(()));
        let too_far = TargetingError::OutOfRange {
            distance: 4,
            limit: 3,
        };
        assert_eq!(go(3, 7), Err(too_far));
        assert_eq!(go(4, 5), Err(TargetingError::NotALine));
        assert_eq!(go(3, 3), Err(TargetingError::SameSquare));
    }

    #[test]
    fn backward_is_relative_to_side() {
        let (state, config) = board();
        let blue = pawn(Side::Blue, MovementFlags::CANNOT_MOVE_BACKWARD);
        let red = pawn(Side::Red, MovementFlags::CANNOT_MOVE_BACKWARD);
        let go = |piece: &Piece, x, y| {
            validate_move(&state, &config, piece, Position::new(x, y), 1)
        };

        assert_eq!(go(&blue, 3, 2), Err(TargetingError::Backward));
        assert_eq!(go(&red, 3, 2), Ok(()));
        assert_eq!(go(&blue, 2, 3), Ok(()));
    }

    #[test]
    fn vertical_only_rejects_horizontal_component() {
        let (state, config) = board();
        let piece = pawn(Side::Blue, MovementFlags::VERTICAL_ONLY);

        assert_eq!(
            validate_move(&state, &config, &piece, Position::new(4, 4), 1),
            Err(TargetingError::NotVertical)
        );
    }

    #[test]
    fn direction_flags_are_enforced_separately_for_attacks() {
        let (state, config) = board();
        let piece = PieceBuilder::new("lancer")
            .at(3, 3)
            .attack_directions(Directions::ORTHOGONAL)
            .build();
        let diagonal = Position::new(4, 4);

        assert_eq!(
            validate_attack(&state, &config, &piece, diagonal, 1),
            Err(TargetingError::DirectionNotAllowed)
        );
        assert_eq!(validate_move(&state, &config, &piece, diagonal, 1), Ok(()));
    }

    #[test]
    fn ranged_attacks_need_a_clear_path() {
        let (mut state, config) = board();
        let archer = PieceBuilder::new("archer").at(0, 0).build();
        state.insert(PieceBuilder::new("wall").at(0, 2).build());
        let shoot = |y| validate_attack(&state, &config, &archer, Position::new(0, y), 3);

        let blocked = TargetingError::PathBlocked(Position::new(0, 2));
        assert_eq!(shoot(3), Err(blocked));
        assert_eq!(shoot(2), Ok(()));
    }

    #[test]
    fn off_board_is_rejected() {
        let (state, config) = board();
        let piece = PieceBuilder::new("rook").at(0, 0).build();
        let outside = Position::new(-1, 0);

        assert_eq!(
            validate_move(&state, &config, &piece, outside, 2),
            Err(TargetingError::OutOfBounds(outside))
        );
    }
}
