//! Movement rules: where a mark may be placed next.

use super::super::{Board, Coord, Mark, Square};
use tracing::instrument;

/// Returns true if `mark` may claim `coord` on this board.
///
/// - A mark that has not moved yet may claim any empty border cell.
/// - Otherwise it may claim any empty cell within one king step of its
///   last placement.
/// - It may also jump two cells straight along a row or column onto an
///   empty cell, provided the cell jumped over holds some other mark.
///
/// Out-of-bounds coordinates are never valid.
pub fn is_valid_move(board: &Board, mark: Mark, coord: Coord) -> bool {
    if !board.is_empty(coord) {
        return false;
    }

    let Some(last) = board.last_move(mark) else {
        return board.is_border(coord);
    };

    if last.chebyshev(coord) <= 1 {
        return true;
    }

    match last.jump_midpoint(coord).and_then(|mid| board.get(mid)) {
        Some(Square::Occupied(jumped)) => jumped != mark,
        _ => false,
    }
}

/// All cells `mark` may claim, in row-major order.
#[instrument(skip(board), fields(size = board.size()))]
pub fn valid_moves(board: &Board, mark: Mark) -> Vec<Coord> {
    board
        .coords()
        .filter(|&coord| is_valid_move(board, mark, coord))
        .collect()
}

/// Number of cells `mark` may claim.
pub fn count_valid_moves(board: &Board, mark: Mark) -> usize {
    board
        .coords()
        .filter(|&coord| is_valid_move(board, mark, coord))
        .count()
}

/// Returns true if `mark` has at least one legal destination.
pub fn has_valid_move(board: &Board, mark: Mark) -> bool {
    board.coords().any(|coord| is_valid_move(board, mark, coord))
}

impl Board {
    /// See [`is_valid_move`].
    pub fn is_valid_move(&self, mark: Mark, coord: Coord) -> bool {
        is_valid_move(self, mark, coord)
    }

    /// See [`valid_moves`].
    pub fn valid_moves(&self, mark: Mark) -> Vec<Coord> {
        valid_moves(self, mark)
    }

    /// See [`count_valid_moves`].
    pub fn count_valid_moves(&self, mark: Mark) -> usize {
        count_valid_moves(self, mark)
    }

    /// See [`has_valid_move`].
    pub fn has_valid_move(&self, mark: Mark) -> bool {
        has_valid_move(self, mark)
    }
}
