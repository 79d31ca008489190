//! Contract-based validation for FlipTac placements.
//!
//! Contracts pair a precondition on (state, action) with a postcondition on
//! (before, after): {P} action {Q}.

use super::action::{Move, MoveError};
use super::invariants::{FlipTacInvariants, InvariantSet};
use super::typestate::GameInProgress;
use tracing::instrument;

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: it must be the mark's turn.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Checks the mark against the cursor.
    #[instrument(skip(game))]
    pub fn check(mov: &Move, game: &GameInProgress) -> Result<(), MoveError> {
        if mov.mark != game.to_move() {
            Err(MoveError::WrongPlayer(mov.mark))
        } else {
            Ok(())
        }
    }
}

/// Precondition: the target must be on the board.
pub struct InBounds;

impl InBounds {
    /// Checks the coordinate against the board size.
    #[instrument(skip(game))]
    pub fn check(mov: &Move, game: &GameInProgress) -> Result<(), MoveError> {
        if mov.coord.in_bounds(game.board().size()) {
            Ok(())
        } else {
            Err(MoveError::OutOfBounds(mov.coord))
        }
    }
}

/// Precondition: the target must be empty.
pub struct SquareIsEmpty;

impl SquareIsEmpty {
    /// Checks the target square.
    #[instrument(skip(game))]
    pub fn check(mov: &Move, game: &GameInProgress) -> Result<(), MoveError> {
        if game.board().is_empty(mov.coord) {
            Ok(())
        } else {
            Err(MoveError::SquareOccupied(mov.coord))
        }
    }
}

/// Precondition: the target must be reachable from the mark's last move.
pub struct Reachable;

impl Reachable {
    /// Applies the movement rules.
    #[instrument(skip(game))]
    pub fn check(mov: &Move, game: &GameInProgress) -> Result<(), MoveError> {
        if game.is_valid_move(mov.mark, mov.coord) {
            Ok(())
        } else {
            Err(MoveError::Unreachable(mov.mark, mov.coord))
        }
    }
}

/// Composite precondition, checked in order so the error names the first
/// failing rule.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(skip(game))]
    pub fn check(mov: &Move, game: &GameInProgress) -> Result<(), MoveError> {
        PlayersTurn::check(mov, game)?;
        InBounds::check(mov, game)?;
        SquareIsEmpty::check(mov, game)?;
        Reachable::check(mov, game)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for placements.
///
/// Preconditions: mark's turn, in bounds, empty, reachable.
///
/// Postconditions: one more occupied cell than before, plus every
/// [`FlipTacInvariants`] member.
pub struct MoveContract;

impl Contract<GameInProgress, Move> for MoveContract {
    fn pre(game: &GameInProgress, action: &Move) -> Result<(), MoveError> {
        LegalMove::check(action, game)
    }

    fn post(before: &GameInProgress, after: &GameInProgress) -> Result<(), MoveError> {
        let grew = after.board().occupied_count() == before.board().occupied_count() + 1;
        if !grew {
            return Err(MoveError::InvariantViolation(
                "Placement must claim exactly one cell".to_string(),
            ));
        }

        FlipTacInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Coord, GameResult, GameSetup, Mark, Square};

    fn fresh() -> GameInProgress {
        GameSetup::new(5, 2).unwrap().start()
    }

    #[test]
    fn test_precondition_border_first_move() {
        let game = fresh();
        assert!(MoveContract::pre(&game, &Move::new(Mark::X, Coord::new(0, 2))).is_ok());
    }

    #[test]
    fn test_precondition_out_of_bounds() {
        let game = fresh();
        assert_eq!(
            MoveContract::pre(&game, &Move::new(Mark::X, Coord::new(5, 0))),
            Err(MoveError::OutOfBounds(Coord::new(5, 0)))
        );
    }

    #[test]
    fn test_precondition_occupied_square() {
        let game = fresh();
        if let Ok(GameResult::InProgress(game)) = game.place(Move::new(Mark::X, Coord::new(0, 0))) {
            assert_eq!(
                MoveContract::pre(&game, &Move::new(Mark::O, Coord::new(0, 0))),
                Err(MoveError::SquareOccupied(Coord::new(0, 0)))
            );
        } else {
            panic!("Expected in-progress game");
        }
    }

    #[test]
    fn test_precondition_wrong_turn() {
        let game = fresh();
        assert!(matches!(
            MoveContract::pre(&game, &Move::new(Mark::O, Coord::new(0, 0))),
            Err(MoveError::WrongPlayer(Mark::O))
        ));
    }

    #[test]
    fn test_postcondition_holds_after_move() {
        let game = fresh();
        if let Ok(GameResult::InProgress(after)) =
            game.clone().place(Move::new(Mark::X, Coord::new(0, 0)))
        {
            assert!(MoveContract::post(&game, &after).is_ok());
        } else {
            panic!("Expected in-progress game");
        }
    }

    #[test]
    fn test_postcondition_detects_corruption() {
        let game = fresh();
        if let Ok(GameResult::InProgress(mut after)) =
            game.clone().place(Move::new(Mark::X, Coord::new(0, 0)))
        {
            after.board.set(Coord::new(0, 0), Square::Occupied(Mark::O));
            assert!(MoveContract::post(&game, &after).is_err());
        } else {
            panic!("Expected in-progress game");
        }
    }
}
