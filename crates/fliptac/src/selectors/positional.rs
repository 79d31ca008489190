//! Level 2: positional value blended with both sides' mobility.

use super::{MoveSelector, Selection, random_legal};
use crate::config::WeightProfile;
use fliptac_core::{Board, Coord, Mark};
use rand::rngs::StdRng;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Weight of the positional value in a candidate's score.
const POSITION_WEIGHT: i64 = 3;

/// Per-cell positional values for one board size.
///
/// Cells score by closeness to the centre: `round(10 × (c − d))` where `c`
/// is `(size − 1) / 2` and `d` the Euclidean distance to the centre point,
/// rounded half up. The table is then shifted by `|max − 20|` and clamped at
/// zero, so the centre of a 5×5 board scores 20 and its border 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionalTable {
    size: usize,
    values: Vec<i64>,
}

impl PositionalTable {
    /// Computes the table for a `size`×`size` board.
    #[instrument]
    pub fn new(size: usize) -> Self {
        let center = (size as f64 - 1.0) / 2.0;
        let raw: Vec<i64> = Coord::all(size)
            .map(|coord| {
                let dr = coord.row as f64 - center;
                let dc = coord.col as f64 - center;
                let distance = (dr * dr + dc * dc).sqrt();
                (10.0 * (center - distance) + 0.5).floor() as i64
            })
            .collect();

        let max = raw.iter().copied().fold(0, i64::max);
        let shift = (max - 20).abs();
        let values = raw.into_iter().map(|v| (v + shift).max(0)).collect();
        Self { size, values }
    }

    /// Edge length this table was built for.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Value of one cell. Out-of-range cells are worth nothing.
    pub fn value(&self, coord: Coord) -> i64 {
        if coord.in_bounds(self.size) {
            self.values[coord.to_index(self.size)]
        } else {
            0
        }
    }
}

/// Scores every legal move for `mover`, in row-major order.
///
/// `score = value × 3 − opponent_moves × w_opp + own_moves × w_self`, where
/// both move counts are taken after the candidate is placed. `board` is
/// unchanged on return.
#[instrument(skip(board, table), fields(size = board.size()))]
pub fn score_candidates(
    board: &mut Board,
    table: &PositionalTable,
    mover: Mark,
    opponent: Mark,
    weights: (i64, i64),
) -> Vec<(Coord, i64)> {
    let (w_opp, w_self) = weights;
    board
        .valid_moves(mover)
        .into_iter()
        .map(|candidate| {
            let sim = board.simulate(mover, candidate);
            let theirs = sim.count_valid_moves(opponent) as i64;
            let ours = sim.count_valid_moves(mover) as i64;
            let score = table.value(candidate) * POSITION_WEIGHT - theirs * w_opp + ours * w_self;
            debug!(%candidate, theirs, ours, score, "Scored candidate");
            (candidate, score)
        })
        .collect()
}

/// Difficulty 2 selector.
///
/// Takes the strict maximum score, first found on ties. Tables are cached
/// per board size.
#[derive(Debug)]
pub struct WeightedPositional {
    weights: WeightProfile,
    tables: HashMap<usize, PositionalTable>,
    rng: StdRng,
}

impl WeightedPositional {
    /// Creates the selector with the given weight profile.
    pub fn new(weights: WeightProfile, rng: StdRng) -> Self {
        Self {
            weights,
            tables: HashMap::new(),
            rng,
        }
    }

    /// The positional table for `size`, computed on first use.
    pub fn table(&mut self, size: usize) -> &PositionalTable {
        self.tables
            .entry(size)
            .or_insert_with(|| PositionalTable::new(size))
    }
}

#[async_trait::async_trait]
impl MoveSelector for WeightedPositional {
    async fn select_move(&mut self, board: &Board, mover: Mark, opponent: Mark) -> Selection {
        let weights = self.weights.weights();
        let table = self.table(board.size()).clone();
        let mut scratch = board.clone();

        let mut best: Option<(Coord, i64)> = None;
        for (candidate, score) in score_candidates(&mut scratch, &table, mover, opponent, weights) {
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((candidate, score));
            }
        }

        let coord = best
            .map(|(coord, _)| coord)
            .or_else(|| random_legal(board, mover, &mut self.rng));
        Selection::chosen(coord)
    }

    fn name(&self) -> &str {
        "positional"
    }
}
