//! Level 1: leave the opponent as few moves as possible.

use super::{MoveSelector, Selection};
use fliptac_core::{Board, Coord, Mark};
use tracing::{debug, instrument};

/// Picks the legal cell that minimizes the opponent's legal-move count.
///
/// Candidates are tried in row-major order. Ties go to the cell closest
/// (squared Euclidean distance) to the opponent's last placement, first
/// found on equal distance, or to the first tied candidate when the
/// opponent hasn't moved yet.
///
/// Every candidate is placed and taken back through a
/// [`Simulation`](fliptac_core::Simulation), so `board` is unchanged on
/// return.
#[instrument(skip(board), fields(size = board.size()))]
pub fn minimize_mobility(board: &mut Board, mover: Mark, opponent: Mark) -> Option<Coord> {
    let mut fewest = usize::MAX;
    let mut tied = Vec::new();

    for candidate in board.valid_moves(mover) {
        let replies = board.simulate(mover, candidate).count_valid_moves(opponent);
        debug!(%candidate, replies, "Scored candidate");
        if replies < fewest {
            fewest = replies;
            tied.clear();
        }
        if replies == fewest {
            tied.push(candidate);
        }
    }

    match board.last_move(opponent) {
        Some(anchor) => tied.into_iter().min_by_key(|c| c.distance_squared(anchor)),
        None => tied.first().copied(),
    }
}

/// Difficulty 1 selector.
#[derive(Debug, Default)]
pub struct MobilityMinimizer;

impl MobilityMinimizer {
    /// Creates the selector.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl MoveSelector for MobilityMinimizer {
    async fn select_move(&mut self, board: &Board, mover: Mark, opponent: Mark) -> Selection {
        let mut scratch = board.clone();
        Selection::chosen(minimize_mobility(&mut scratch, mover, opponent))
    }

    fn name(&self) -> &str {
        "mobility"
    }
}
