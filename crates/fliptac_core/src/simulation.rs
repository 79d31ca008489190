//! Scoped what-if placements for move evaluation.
//!
//! Selectors score a candidate by placing it, measuring the resulting
//! position and taking it back. [`Simulation`] does the placing on creation
//! and the taking back on drop, so the board is restored on every exit path,
//! including early returns and unwinding.

use super::{Board, Coord, Mark, Square};
use std::ops::Deref;

/// A temporary placement that is undone when the guard drops.
///
/// Derefs to the board in its simulated state.
#[derive(Debug)]
pub struct Simulation<'a> {
    board: &'a mut Board,
    mark: Mark,
    coord: Coord,
    previous_square: Square,
    previous_last_move: Option<Coord>,
}

impl<'a> Simulation<'a> {
    /// Places `mark` at `coord` until the returned guard drops.
    pub fn new(board: &'a mut Board, mark: Mark, coord: Coord) -> Self {
        let previous_square = board.get(coord).unwrap_or_default();
        let previous_last_move = board.last_move(mark);
        board.occupy(mark, coord);
        Self {
            board,
            mark,
            coord,
            previous_square,
            previous_last_move,
        }
    }
}

impl Deref for Simulation<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        &*self.board
    }
}

impl Drop for Simulation<'_> {
    fn drop(&mut self) {
        self.board.set(self.coord, self.previous_square);
        self.board.set_last_move(self.mark, self.previous_last_move);
    }
}

impl Board {
    /// Starts a scoped what-if placement. See [`Simulation`].
    pub fn simulate(&mut self, mark: Mark, coord: Coord) -> Simulation<'_> {
        Simulation::new(self, mark, coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulation_restores_on_drop() {
        let mut board = Board::new(5);
        board.occupy(Mark::X, Coord::new(0, 0));
        board.occupy(Mark::O, Coord::new(4, 4));
        let before = board.clone();

        {
            let sim = board.simulate(Mark::X, Coord::new(1, 1));
            assert_eq!(sim.last_move(Mark::X), Some(Coord::new(1, 1)));
            assert_eq!(sim.get(Coord::new(1, 1)), Some(Square::Occupied(Mark::X)));
        }

        assert_eq!(board, before);
    }

    #[test]
    fn test_simulation_restores_after_early_return() {
        fn occupied_if_stuck(board: &mut Board) -> Option<usize> {
            let sim = board.simulate(Mark::O, Coord::new(0, 1));
            if sim.count_valid_moves(Mark::O) > 0 {
                return None;
            }
            Some(sim.occupied_count())
        }

        let mut board = Board::new(3);
        let before = board.clone();
        assert_eq!(occupied_if_stuck(&mut board), None);
        assert_eq!(board, before);
    }

    #[test]
    fn test_simulation_for_first_move_clears_last_move() {
        let mut board = Board::new(3);
        {
            let _sim = board.simulate(Mark::Delta, Coord::new(0, 2));
        }
        assert_eq!(board.last_move(Mark::Delta), None);
        assert!(board.is_empty(Coord::new(0, 2)));
    }
}
