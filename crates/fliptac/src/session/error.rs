//! Session errors.

use derive_more::{Display, Error};
use fliptac_core::{Mark, Move, MoveError};

/// What went wrong in a session.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum SessionErrorKind {
    /// A selector returned no move although the mover could still move.
    #[display("{} has legal moves but its selector returned none", _0)]
    SelectorGaveUp(Mark),

    /// A computer seat picked a cell it cannot claim.
    #[display("Computer chose {}: {}", _0, _1)]
    IllegalComputerMove(Move, MoveError),

    /// A seat could not produce a move at all.
    #[display("Seat {} failed: {}", _0, _1)]
    Seat(Mark, String),

    /// The seat list does not match the setup.
    #[display("Setup needs {} seats, got {}", expected, got)]
    SeatCount {
        /// Seats the setup declares.
        expected: usize,
        /// Seats provided.
        got: usize,
    },
}

/// Fatal session error.
#[derive(Debug, Clone, Display, Error)]
#[display("Session error: {} at {}:{}", kind, file, line)]
pub struct SessionError {
    /// What went wrong.
    pub kind: SessionErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SessionError {
    /// Creates a new session error.
    #[track_caller]
    pub fn new(kind: SessionErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        tracing::error!(error = %kind, "Session error created");
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<SessionErrorKind> for SessionError {
    #[track_caller]
    fn from(kind: SessionErrorKind) -> Self {
        Self::new(kind)
    }
}
