//! Text oracle: a language model names the move.

use super::{OracleError, within};
use crate::llm_client::LlmClient;
use crate::selectors::{MoveSelector, Selection, random_legal};
use fliptac_core::{Board, Coord, Mark};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

const SYSTEM_PROMPT: &str = "You are playing FlipTac, a placement game on a square grid. \
Reply with a single JSON object of the form {\"move\":[row,col]} and nothing else.";

/// Something that completes a prompt.
#[async_trait::async_trait]
pub trait TextInference: Send + Sync {
    /// Returns the raw completion for `prompt`.
    async fn complete(&self, system: &str, prompt: &str) -> anyhow::Result<String>;
}

#[async_trait::async_trait]
impl TextInference for LlmClient {
    async fn complete(&self, system: &str, prompt: &str) -> anyhow::Result<String> {
        Ok(self.generate(system, prompt).await?)
    }
}

/// The only reply shape accepted from the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MoveReply {
    /// `[row, col]`.
    #[serde(rename = "move")]
    pub cell: [usize; 2],
}

impl From<MoveReply> for Coord {
    fn from(reply: MoveReply) -> Self {
        Coord::new(reply.cell[0], reply.cell[1])
    }
}

/// Describes the position for `mover`: the grid, whose turn it is, and every
/// legal cell.
pub fn build_prompt(board: &Board, mover: Mark, legal: &[Coord]) -> String {
    let mut prompt = String::new();
    let _ = writeln!(prompt, "Board ({0}x{0}, '.' is empty):", board.size());
    let _ = writeln!(prompt, "{}", board.display());
    let _ = writeln!(prompt, "You play {}.", mover);
    match board.last_move(mover) {
        Some(last) => {
            let _ = writeln!(prompt, "Your last stone is at [{},{}].", last.row, last.col);
        }
        None => {
            let _ = writeln!(prompt, "This is your first stone.");
        }
    }
    let cells = legal
        .iter()
        .map(|c| format!("[{},{}]", c.row, c.col))
        .collect::<Vec<_>>()
        .join(", ");
    let _ = writeln!(prompt, "Legal moves: {}", cells);
    let _ = write!(prompt, "Answer with {{\"move\":[row,col]}} using one of the legal moves.");
    prompt
}

/// Parses a reply that must be exactly `{"move":[row,col]}`.
///
/// Surrounding whitespace is allowed; anything else (prose, extra keys,
/// code fences, a wrong arity) is rejected.
pub fn parse_reply(reply: &str) -> Result<Coord, OracleError> {
    serde_json::from_str::<MoveReply>(reply.trim())
        .map(Coord::from)
        .map_err(|e| OracleError::Malformed(e.to_string()))
}

/// Difficulty 4 selector.
///
/// Every failure (backend error, timeout, malformed reply, illegal cell)
/// falls back to a uniformly random legal move for that turn only.
pub struct TextOracle<C> {
    client: C,
    timeout: Duration,
    rng: StdRng,
}

impl<C: TextInference> TextOracle<C> {
    /// Creates an oracle over `client`.
    pub fn new(client: C, timeout: Duration, rng: StdRng) -> Self {
        info!(timeout = ?timeout, "Creating text oracle");
        Self {
            client,
            timeout,
            rng,
        }
    }

    #[instrument(skip(self, board, legal), fields(size = board.size(), candidates = legal.len()))]
    async fn query(&self, board: &Board, mover: Mark, legal: &[Coord]) -> Result<Coord, OracleError> {
        let prompt = build_prompt(board, mover, legal);
        let reply = within(self.timeout, self.client.complete(SYSTEM_PROMPT, &prompt)).await?;
        debug!(reply = %reply, "Oracle replied");

        let coord = parse_reply(&reply)?;
        if legal.contains(&coord) {
            Ok(coord)
        } else {
            Err(OracleError::IllegalMove(coord))
        }
    }
}

#[async_trait::async_trait]
impl<C: TextInference> MoveSelector for TextOracle<C> {
    async fn select_move(&mut self, board: &Board, mover: Mark, _opponent: Mark) -> Selection {
        let legal = board.valid_moves(mover);
        if legal.is_empty() {
            return Selection::chosen(None);
        }

        match self.query(board, mover, &legal).await {
            Ok(coord) => Selection::chosen(Some(coord)),
            Err(reason) => {
                warn!(error = %reason, "Text oracle failed, playing a random move");
                Selection::with_fallback(random_legal(board, mover, &mut self.rng), reason)
            }
        }
    }

    fn name(&self) -> &str {
        "text"
    }
}
