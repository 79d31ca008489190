//! Tensor oracle: a Q-value network scores every cell.

use super::{OracleError, within};
use crate::selectors::{MoveSelector, Selection, random_legal};
use fliptac_core::{Board, Coord, Mark, Square};
use rand::rngs::StdRng;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Number of input planes the network expects.
pub const CHANNELS: usize = 3;

/// Something that turns encoded planes into one score per cell.
#[async_trait::async_trait]
pub trait TensorInference: Send + Sync {
    /// Runs inference on `[CHANNELS][size][size]` planes.
    ///
    /// Returns `size * size` scores in row-major order.
    async fn infer(&self, channels: &[Vec<Vec<f32>>]) -> anyhow::Result<Vec<f32>>;
}

/// Encodes the board from `mover`'s point of view.
///
/// Plane 0 marks `mover`'s stones, plane 1 marks `opponent`'s stones and
/// plane 2 is all ones (the side to move).
pub fn encode_board(board: &Board, mover: Mark, opponent: Mark) -> Vec<Vec<Vec<f32>>> {
    let size = board.size();
    let mut planes = vec![vec![vec![0.0_f32; size]; size]; CHANNELS];
    for coord in board.coords() {
        let (row, col) = (coord.row, coord.col);
        match board.get(coord) {
            Some(Square::Occupied(mark)) if mark == mover => planes[0][row][col] = 1.0,
            Some(Square::Occupied(mark)) if mark == opponent => planes[1][row][col] = 1.0,
            _ => {}
        }
        planes[2][row][col] = 1.0;
    }
    planes
}

/// Difficulty 3 selector.
///
/// Picks the legal cell with the highest finite score, earliest in
/// row-major order on ties. NaN and infinite scores are ignored. The
/// first failure of any kind disables the oracle, and every later turn
/// plays a random legal move without calling the backend.
pub struct TensorOracle<C> {
    client: C,
    timeout: Duration,
    rng: StdRng,
    available: bool,
}

impl<C: TensorInference> TensorOracle<C> {
    /// Creates an oracle over `client`.
    pub fn new(client: C, timeout: Duration, rng: StdRng) -> Self {
        info!(timeout = ?timeout, "Creating tensor oracle");
        Self {
            client,
            timeout,
            rng,
            available: true,
        }
    }

    /// Returns false once a failure has disabled the oracle.
    pub fn is_available(&self) -> bool {
        self.available
    }

    #[instrument(skip(self, board), fields(size = board.size()))]
    async fn query(
        &self,
        board: &Board,
        mover: Mark,
        opponent: Mark,
        legal: &[Coord],
    ) -> Result<Coord, OracleError> {
        let channels = encode_board(board, mover, opponent);
        let scores = within(self.timeout, self.client.infer(&channels)).await?;

        let cells = board.size() * board.size();
        if scores.len() != cells {
            return Err(OracleError::ScoreCount {
                expected: cells,
                got: scores.len(),
            });
        }

        let mut best: Option<(Coord, f32)> = None;
        for &coord in legal {
            let score = scores[coord.to_index(board.size())];
            if !score.is_finite() {
                debug!(%coord, score, "Skipping non-finite score");
                continue;
            }
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((coord, score));
            }
        }
        let (coord, score) = best
            .ok_or_else(|| OracleError::Malformed("no legal cell has a finite score".to_string()))?;
        debug!(%coord, score, "Best scored cell");
        Ok(coord)
    }
}

#[async_trait::async_trait]
impl<C: TensorInference> MoveSelector for TensorOracle<C> {
    async fn select_move(&mut self, board: &Board, mover: Mark, opponent: Mark) -> Selection {
        let legal = board.valid_moves(mover);
        if legal.is_empty() {
            return Selection::chosen(None);
        }

        if !self.available {
            return Selection::with_fallback(random_legal(board, mover, &mut self.rng), OracleError::Unavailable);
        }

        match self.query(board, mover, opponent, &legal).await {
            Ok(coord) => Selection::chosen(Some(coord)),
            Err(reason) => {
                warn!(error = %reason, "Tensor oracle failed, disabling for this session");
                self.available = false;
                Selection::with_fallback(random_legal(board, mover, &mut self.rng), reason)
            }
        }
    }

    fn name(&self) -> &str {
        "tensor"
    }
}
