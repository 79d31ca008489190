//! Grid coordinates and the geometry the movement rules are built on.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A cell on the board, addressed by row and column (both zero-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    /// Row index, top to bottom.
    pub row: usize,
    /// Column index, left to right.
    pub col: usize,
}

impl Coord {
    /// Creates a coordinate.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns true if the coordinate lies inside a `size`×`size` grid.
    pub fn in_bounds(self, size: usize) -> bool {
        self.row < size && self.col < size
    }

    /// Returns true if the coordinate is on the outer ring of a `size`×`size` grid.
    pub fn is_border(self, size: usize) -> bool {
        self.in_bounds(size)
            && (self.row == 0 || self.col == 0 || self.row == size - 1 || self.col == size - 1)
    }

    /// Chebyshev (king-move) distance.
    pub fn chebyshev(self, other: Coord) -> usize {
        self.row.abs_diff(other.row).max(self.col.abs_diff(other.col))
    }

    /// Squared Euclidean distance.
    pub fn distance_squared(self, other: Coord) -> usize {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        dr * dr + dc * dc
    }

    /// If `target` is a straight two-cell jump away (same row or same column),
    /// returns the cell jumped over.
    pub fn jump_midpoint(self, target: Coord) -> Option<Coord> {
        if self.row == target.row && self.col.abs_diff(target.col) == 2 {
            Some(Coord::new(self.row, (self.col + target.col) / 2))
        } else if self.col == target.col && self.row.abs_diff(target.row) == 2 {
            Some(Coord::new((self.row + target.row) / 2, self.col))
        } else {
            None
        }
    }

    /// Index into a row-major square buffer.
    pub fn to_index(self, size: usize) -> usize {
        self.row * size + self.col
    }

    /// All cells of a `size`×`size` grid in row-major order.
    pub fn all(size: usize) -> impl Iterator<Item = Coord> {
        (0..size).flat_map(move |row| (0..size).map(move |col| Coord::new(row, col)))
    }

    /// The border cells walked clockwise from the top-left corner.
    ///
    /// Top row left to right, right column downwards, bottom row right to
    /// left, left column upwards. Each of the `4 * (size - 1)` border cells
    /// appears exactly once.
    #[instrument]
    pub fn perimeter(size: usize) -> Vec<Coord> {
        if size == 0 {
            return Vec::new();
        }
        if size == 1 {
            return vec![Coord::new(0, 0)];
        }
        let last = size - 1;
        let mut ring = Vec::with_capacity(4 * last);
        ring.extend((0..size).map(|col| Coord::new(0, col)));
        ring.extend((1..size).map(|row| Coord::new(row, last)));
        ring.extend((0..last).rev().map(|col| Coord::new(last, col)));
        ring.extend((1..last).rev().map(|row| Coord::new(row, 0)));
        ring
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perimeter_covers_border_once() {
        for size in 3..=9 {
            let ring = Coord::perimeter(size);
            assert_eq!(ring.len(), 4 * (size - 1));
            assert!(ring.iter().all(|c| c.is_border(size)));
            let mut sorted = ring.clone();
            sorted.sort();
            sorted.dedup();
            assert_eq!(sorted.len(), ring.len());
        }
    }

    #[test]
    fn test_perimeter_is_clockwise() {
        let ring = Coord::perimeter(3);
        let expected: Vec<Coord> = [(0, 0), (0, 1), (0, 2), (1, 2), (2, 2), (2, 1), (2, 0), (1, 0)]
            .into_iter()
            .map(Coord::from)
            .collect();
        assert_eq!(ring, expected);
    }

    #[test]
    fn test_jump_midpoint_straight_only() {
        let origin = Coord::new(2, 2);
        assert_eq!(origin.jump_midpoint(Coord::new(2, 4)), Some(Coord::new(2, 3)));
        assert_eq!(origin.jump_midpoint(Coord::new(0, 2)), Some(Coord::new(1, 2)));
        assert_eq!(origin.jump_midpoint(Coord::new(0, 0)), None);
        assert_eq!(origin.jump_midpoint(Coord::new(2, 3)), None);
    }

    #[test]
    fn test_distances() {
        let a = Coord::new(0, 0);
        let b = Coord::new(3, 4);
        assert_eq!(a.chebyshev(b), 4);
        assert_eq!(a.distance_squared(b), 25);
    }
}
