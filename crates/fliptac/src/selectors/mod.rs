//! Computer move selection.
//!
//! Every difficulty level sits behind [`MoveSelector`]. Heuristic levels
//! score candidates on a scratch copy of the board; oracle levels ask an
//! external backend and degrade to a random legal move on failure.

mod mobility;
mod opening;
mod positional;

pub use mobility::{MobilityMinimizer, minimize_mobility};
pub use opening::opening_move;
pub use positional::{PositionalTable, WeightedPositional, score_candidates};

use crate::config::{ConfigError, Difficulty, SessionConfig};
use crate::llm_client::LlmClient;
use crate::oracle::{HttpTensorClient, OracleError, TensorOracle, TextOracle};
use derive_getters::Getters;
use fliptac_core::{Board, Coord, Mark};
use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{info, instrument};

/// A selector's answer for one turn.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Selection {
    /// The chosen cell, or `None` when the mover has no legal move.
    coord: Option<Coord>,
    /// Set when an oracle could not answer and a random move was used.
    fallback: Option<OracleError>,
}

impl Selection {
    /// A regular choice.
    pub fn chosen(coord: Option<Coord>) -> Self {
        Self {
            coord,
            fallback: None,
        }
    }

    /// A random choice made because the oracle failed.
    pub fn with_fallback(coord: Option<Coord>, reason: OracleError) -> Self {
        Self {
            coord,
            fallback: Some(reason),
        }
    }
}

/// Picks a move for a computer seat.
///
/// `opponent` is the seat whose mobility the heuristics try to squeeze:
/// the next active seat after `mover`.
#[async_trait::async_trait]
pub trait MoveSelector: Send {
    /// Chooses a cell for `mover`. Never mutates `board`.
    async fn select_move(&mut self, board: &Board, mover: Mark, opponent: Mark) -> Selection;

    /// Short name for logs.
    fn name(&self) -> &str;
}

/// A uniformly random legal move for `mover`.
pub fn random_legal<R: Rng + ?Sized>(board: &Board, mover: Mark, rng: &mut R) -> Option<Coord> {
    board.valid_moves(mover).choose(rng).copied()
}

/// Builds the selector for the configured difficulty.
///
/// # Errors
///
/// Returns [`ConfigError`] if an oracle level is missing its endpoint or
/// API key.
#[instrument(skip(config, rng), fields(difficulty = %config.cpu_difficulty()))]
pub fn build_selector(config: &SessionConfig, rng: StdRng) -> Result<Box<dyn MoveSelector>, ConfigError> {
    let oracle = config.oracle();
    let selector: Box<dyn MoveSelector> = match config.cpu_difficulty() {
        Difficulty::Mobility => Box::new(MobilityMinimizer::new()),
        Difficulty::Positional => Box::new(WeightedPositional::new(*config.weights(), rng)),
        Difficulty::Tensor => {
            let endpoint = oracle
                .tensor_endpoint()
                .clone()
                .ok_or_else(|| ConfigError::new("Tensor oracle needs an endpoint".to_string()))?;
            let client = HttpTensorClient::new(endpoint);
            Box::new(TensorOracle::new(client, oracle.timeout(), rng))
        }
        Difficulty::Text => {
            let client = LlmClient::new(oracle.create_llm_config()?);
            Box::new(TextOracle::new(client, oracle.timeout(), rng))
        }
    };
    info!(selector = selector.name(), "Selector ready");
    Ok(selector)
}
