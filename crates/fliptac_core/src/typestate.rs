//! Phase-specific typestate structs for FlipTac.
//!
//! Each phase is its own type. Only [`GameInProgress`] can accept moves, and
//! a [`GameFinished`] always has a winner rather than an `Option`.

use super::action::{Move, MoveError};
use super::contracts::{Contract, MoveContract};
use super::roster::Roster;
use super::types::{MAX_PLAYERS, MIN_BOARD_SIZE};
use super::{Board, Coord, Mark};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Error building a game setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum SetupError {
    /// Board edge below the minimum.
    #[display("Board size {} is below the minimum of {}", _0, MIN_BOARD_SIZE)]
    BoardTooSmall(usize),

    /// Seat count outside 2..=5.
    #[display("A game needs 2 to {} seats, got {}", MAX_PLAYERS, _0)]
    SeatCount(usize),
}

impl std::error::Error for SetupError {}

// ─────────────────────────────────────────────────────────────
//  Setup Phase
// ─────────────────────────────────────────────────────────────

/// Game in setup phase: board size and seat count fixed, nothing placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSetup {
    size: usize,
    seats: usize,
}

impl GameSetup {
    /// Creates a setup for a `size`×`size` board with `seats` players.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError`] if the board is smaller than 3×3 or the seat
    /// count is outside 2..=5.
    #[instrument]
    pub fn new(size: usize, seats: usize) -> Result<Self, SetupError> {
        if size < MIN_BOARD_SIZE {
            return Err(SetupError::BoardTooSmall(size));
        }
        if !(2..=MAX_PLAYERS).contains(&seats) {
            return Err(SetupError::SeatCount(seats));
        }
        Ok(Self { size, seats })
    }

    /// Board edge length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of seats.
    pub fn seats(&self) -> usize {
        self.seats
    }

    /// Starts the game with `X` to move.
    #[instrument(skip(self), fields(size = self.size, seats = self.seats))]
    pub fn start(self) -> GameInProgress {
        info!("Starting game");
        GameInProgress {
            setup: self,
            board: Board::new(self.size),
            roster: Roster::new(self.seats),
            history: Vec::new(),
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  InProgress Phase
// ─────────────────────────────────────────────────────────────

/// Game in progress: at least two seats active, cursor on an active seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameInProgress {
    pub(crate) setup: GameSetup,
    pub(crate) board: Board,
    pub(crate) roster: Roster,
    pub(crate) history: Vec<Move>,
}

impl GameInProgress {
    /// Applies a placement, consuming the game and returning the next phase.
    ///
    /// After the mark is placed the cursor advances and the game settles:
    /// the seat now to move is eliminated if it has nowhere to go, cascading
    /// until someone can move or one seat remains.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError`] if it isn't `action.mark`'s turn or the cell is
    /// not reachable. Callers that need to keep the game on a rejected move
    /// check [`GameInProgress::is_valid_move`] first.
    #[instrument(skip(self), fields(mark = %action.mark, coord = %action.coord))]
    pub fn place(self, action: Move) -> Result<GameResult, MoveError> {
        #[cfg(debug_assertions)]
        let before = self.clone();

        MoveContract::pre(&self, &action)?;

        let mut game = self;
        game.board.occupy(action.mark, action.coord);
        game.history.push(action);
        game.roster.switch_player();

        #[cfg(debug_assertions)]
        MoveContract::post(&before, &game)?;

        info!(next = %game.roster.current(), "Placed");
        Ok(game.settle())
    }

    /// Runs the elimination pass for the seat under the cursor.
    ///
    /// Runs automatically after every placement. The loop is bounded by the
    /// active count: each pass either returns or removes one active seat,
    /// and it never removes the last one.
    #[instrument(skip(self), fields(current = %self.roster.current()))]
    pub fn settle(self) -> GameResult {
        let mut game = self;
        while game.roster.active_count() > 1 {
            let current = game.roster.current();
            if game.board.has_valid_move(current) {
                debug!(mark = %current, "Seat can move");
                return GameResult::InProgress(game);
            }
            warn!(mark = %current, "No legal moves, eliminating");
            game.roster.eliminate(current);
            game.roster.switch_player();
        }
        game.finish()
    }

    fn finish(self) -> GameResult {
        let winner = self
            .roster
            .sole_survivor()
            .unwrap_or_else(|| self.roster.current());
        info!(winner = %winner, moves = self.history.len(), "Game finished");
        GameResult::Finished(GameFinished {
            setup: self.setup,
            board: self.board,
            roster: self.roster,
            history: self.history,
            winner,
        })
    }

    /// The mark to move.
    pub fn to_move(&self) -> Mark {
        self.roster.current()
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The seats.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Placements so far.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// The setup this game started from.
    pub fn setup(&self) -> GameSetup {
        self.setup
    }

    /// Returns true if `mark` may claim `coord` right now.
    pub fn is_valid_move(&self, mark: Mark, coord: Coord) -> bool {
        self.board.is_valid_move(mark, coord)
    }

    /// Legal destinations for the mark to move.
    #[instrument(skip(self))]
    pub fn valid_moves(&self) -> Vec<Coord> {
        self.board.valid_moves(self.to_move())
    }

    /// Rebuilds a game by applying `moves` in order.
    ///
    /// Stops at the first move that finishes the game.
    #[instrument(skip(moves), fields(count = moves.len()))]
    pub fn replay(setup: GameSetup, moves: &[Move]) -> Result<GameResult, MoveError> {
        let mut game = setup.start();

        for action in moves {
            match game.place(*action)? {
                GameResult::InProgress(g) => game = g,
                GameResult::Finished(g) => return Ok(GameResult::Finished(g)),
            }
        }

        Ok(GameResult::InProgress(game))
    }
}

// ─────────────────────────────────────────────────────────────
//  Finished Phase
// ─────────────────────────────────────────────────────────────

/// Game finished: exactly one seat still active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameFinished {
    setup: GameSetup,
    board: Board,
    roster: Roster,
    history: Vec<Move>,
    winner: Mark,
}

impl GameFinished {
    /// The last active seat.
    pub fn winner(&self) -> Mark {
        self.winner
    }

    /// The final board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The seats, with elimination order.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// All placements.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// The setup this game started from.
    pub fn setup(&self) -> GameSetup {
        self.setup
    }

    /// Restarts with the same size and seat count.
    #[instrument(skip(self))]
    pub fn restart(self) -> GameSetup {
        self.setup
    }
}

// ─────────────────────────────────────────────────────────────
//  Result Type
// ─────────────────────────────────────────────────────────────

/// Result of a placement or settle pass.
#[derive(Debug, Clone)]
pub enum GameResult {
    /// Game continues.
    InProgress(GameInProgress),
    /// Game finished.
    Finished(GameFinished),
}
