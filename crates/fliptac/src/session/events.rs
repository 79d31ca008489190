//! What the session tells the outside world.

use crate::oracle::OracleError;
use derive_getters::Getters;
use fliptac_core::{AnyGame, Board, Coord, Mark, Move, MoveError, Roster};
use tokio::sync::mpsc;
use tracing::debug;

/// Snapshot sent after every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct StateView {
    /// The grid, including every mark's last placement.
    board: Board,
    /// Seats, active flags and elimination order.
    roster: Roster,
    /// The mark to move, `None` once the game is over.
    cursor: Option<Mark>,
    /// Legal cells for the mark to move, for highlighting.
    valid_moves: Vec<Coord>,
    /// The winner, once there is one.
    winner: Option<Mark>,
    /// One-line status.
    status: String,
}

impl From<&AnyGame> for StateView {
    fn from(game: &AnyGame) -> Self {
        Self {
            board: game.board().clone(),
            roster: game.roster().clone(),
            cursor: game.to_move(),
            valid_moves: game.valid_moves(),
            winner: game.winner(),
            status: game.status_string(),
        }
    }
}

/// Fire-and-forget notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    /// A stone was placed.
    MovePlaced {
        /// Who placed it.
        seat: String,
        /// The placement.
        action: Move,
    },
    /// A human picked a cell they cannot claim. Nothing changed.
    InvalidAttempt {
        /// Who tried.
        seat: String,
        /// The rejected placement.
        action: Move,
        /// The first rule it broke.
        reason: MoveError,
    },
    /// A seat had no legal move on its turn and is out.
    Eliminated(Mark),
    /// An oracle could not answer and a random move was played.
    OracleFallback {
        /// The computer seat.
        seat: String,
        /// What went wrong.
        reason: OracleError,
    },
    /// One seat is left.
    GameWon {
        /// The winning mark.
        winner: Mark,
        /// Its seat name.
        seat: String,
    },
}

/// Messages sent from the session to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Board, roster or cursor changed.
    StateChanged(StateView),
    /// Something worth a sound or a toast.
    Feedback(Feedback),
}

/// Receives session events. Must not fail.
pub trait GameObserver: Send {
    /// Handles one event.
    fn notify(&mut self, event: GameEvent);
}

impl GameObserver for mpsc::UnboundedSender<GameEvent> {
    fn notify(&mut self, event: GameEvent) {
        if self.send(event).is_err() {
            debug!("Event receiver dropped");
        }
    }
}
