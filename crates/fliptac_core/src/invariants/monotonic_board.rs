//! Monotonic board invariant: squares are only ever claimed, never changed.

use super::super::{Board, GameInProgress};
use super::Invariant;

/// Invariant: the board equals a replay of the move history onto an empty
/// board.
///
/// Since every placement targets an empty cell, a cell that changed owner or
/// reverted to empty shows up as a mismatch.
pub struct MonotonicBoardInvariant;

impl Invariant<GameInProgress> for MonotonicBoardInvariant {
    fn holds(game: &GameInProgress) -> bool {
        let mut expected = Board::new(game.board().size());
        for action in game.history() {
            if !expected.is_empty(action.coord) {
                return false;
            }
            expected.occupy(action.mark, action.coord);
        }
        expected.squares() == game.board().squares()
    }

    fn description() -> &'static str {
        "Board matches the move history and no square is claimed twice"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Coord, GameResult, GameSetup, Mark, Move, Square};

    #[test]
    fn test_empty_game_holds() {
        let game = GameSetup::new(5, 2).unwrap().start();
        assert!(MonotonicBoardInvariant::holds(&game));
    }

    #[test]
    fn test_overwritten_square_violates() {
        let game = GameSetup::new(5, 2).unwrap().start();
        if let Ok(GameResult::InProgress(mut game)) = game.place(Move::new(Mark::X, Coord::new(0, 0))) {
            assert!(MonotonicBoardInvariant::holds(&game));
            game.board.set(Coord::new(0, 0), Square::Empty);
            assert!(!MonotonicBoardInvariant::holds(&game));
        } else {
            panic!("Expected in-progress game");
        }
    }
}
