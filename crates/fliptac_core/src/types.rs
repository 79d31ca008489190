//! Core domain types for FlipTac.

use super::position::Coord;
use serde::{Deserialize, Serialize};

/// Maximum number of seats at one board.
pub const MAX_PLAYERS: usize = 5;

/// Smallest playable board edge.
pub const MIN_BOARD_SIZE: usize = 3;

/// A player's symbol. Roster order follows declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Mark {
    /// First seat.
    X,
    /// Second seat.
    O,
    /// Third seat.
    Delta,
    /// Fourth seat.
    Hash,
    /// Fifth seat.
    Star,
}

impl Mark {
    /// All marks in roster order.
    pub const ALL: [Mark; MAX_PLAYERS] = [Mark::X, Mark::O, Mark::Delta, Mark::Hash, Mark::Star];

    /// Position of this mark in roster order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The character drawn on the board.
    pub fn symbol(self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
            Mark::Delta => 'Δ',
            Mark::Hash => '#',
            Mark::Star => '*',
        }
    }
}

impl std::fmt::Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Nobody has placed here.
    #[default]
    Empty,
    /// Claimed by a mark.
    Occupied(Mark),
}

impl Square {
    /// Returns the occupant, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Square::Empty => None,
            Square::Occupied(mark) => Some(mark),
        }
    }
}

/// The grid plus every mark's last placement.
///
/// These two pieces are exactly what the movement rules read, so selectors
/// receive a `Board` as their snapshot of the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    /// Squares in row-major order.
    squares: Vec<Square>,
    last_moves: [Option<Coord>; MAX_PLAYERS],
}

impl Board {
    /// Creates an empty `size`×`size` board.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            squares: vec![Square::Empty; size * size],
            last_moves: [None; MAX_PLAYERS],
        }
    }

    /// Edge length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Gets the square at a coordinate, or `None` when out of bounds.
    pub fn get(&self, coord: Coord) -> Option<Square> {
        coord
            .in_bounds(self.size)
            .then(|| self.squares[coord.to_index(self.size)])
    }

    /// Sets a square directly, bypassing the movement rules.
    ///
    /// Used by replay and test fixtures. Out-of-bounds writes are ignored.
    pub fn set(&mut self, coord: Coord, square: Square) {
        if coord.in_bounds(self.size) {
            let index = coord.to_index(self.size);
            self.squares[index] = square;
        }
    }

    /// Occupies `coord` with `mark` and records it as that mark's last move.
    pub fn occupy(&mut self, mark: Mark, coord: Coord) {
        self.set(coord, Square::Occupied(mark));
        self.last_moves[mark.index()] = Some(coord);
    }

    /// Returns true if the coordinate is inside the board and unclaimed.
    pub fn is_empty(&self, coord: Coord) -> bool {
        matches!(self.get(coord), Some(Square::Empty))
    }

    /// Returns true if the coordinate is on the outer ring.
    pub fn is_border(&self, coord: Coord) -> bool {
        coord.is_border(self.size)
    }

    /// The last cell `mark` placed on, if it has moved.
    pub fn last_move(&self, mark: Mark) -> Option<Coord> {
        self.last_moves[mark.index()]
    }

    /// Overwrites a mark's last move.
    pub fn set_last_move(&mut self, mark: Mark, coord: Option<Coord>) {
        self.last_moves[mark.index()] = coord;
    }

    /// All squares in row-major order.
    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    /// Every coordinate in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + use<> {
        Coord::all(self.size)
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.squares.iter().filter(|s| **s != Square::Empty).count()
    }

    /// Returns true if no empty cell remains.
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|s| *s != Square::Empty)
    }

    /// Formats the board as text, one row per line, `.` for empty cells.
    ///
    /// The header row and left column carry indices so a reader can name
    /// cells as `row col`.
    pub fn display(&self) -> String {
        let mut result = String::from("   ");
        for col in 0..self.size {
            result.push_str(&format!("{:>2}", col));
        }
        for row in 0..self.size {
            result.push('\n');
            result.push_str(&format!("{:>2} ", row));
            for col in 0..self.size {
                let symbol = match self.squares[Coord::new(row, col).to_index(self.size)] {
                    Square::Empty => '.',
                    Square::Occupied(mark) => mark.symbol(),
                };
                result.push(' ');
                result.push(symbol);
            }
        }
        result
    }
}
