//! First-class action types for FlipTac.
//!
//! A move is a domain event: a mark claiming a cell. It can be validated
//! against a game before it is applied and replayed afterwards.

use super::{Coord, Mark};
use serde::{Deserialize, Serialize};

/// A placement: `mark` claims the cell at `coord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Move {
    /// The mark being placed.
    pub mark: Mark,
    /// Where it is placed.
    pub coord: Coord,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.mark, self.coord)
    }
}

/// Error that can occur when validating or applying a move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The coordinate is outside the board.
    #[display("{} is outside the board", _0)]
    OutOfBounds(Coord),

    /// The target cell is already claimed.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(Coord),

    /// The target cell is empty but not reachable under the movement rules.
    #[display("{} cannot reach {}", _0, _1)]
    Unreachable(Mark, Coord),

    /// It's not this mark's turn.
    #[display("It's not {}'s turn", _0)]
    WrongPlayer(Mark),

    /// The game already has a winner.
    #[display("The game is over")]
    GameOver,

    /// A postcondition failed after the move was applied.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for MoveError {}
