//! Serializable game wrapper for typestate phases.

use super::action::{Move, MoveError};
use super::roster::Roster;
use super::typestate::{GameFinished, GameInProgress, GameResult, GameSetup};
use super::{Board, Coord, Mark};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// A game in any phase after setup.
///
/// Typestate phases are separate types, so anything that has to hold "the
/// current game" across turns (a session, a save file) holds this instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnyGame {
    /// Game in progress.
    InProgress(GameInProgress),
    /// Game over with a winner.
    Finished(GameFinished),
}

impl From<GameSetup> for AnyGame {
    fn from(setup: GameSetup) -> Self {
        AnyGame::InProgress(setup.start())
    }
}

impl From<GameInProgress> for AnyGame {
    fn from(game: GameInProgress) -> Self {
        AnyGame::InProgress(game)
    }
}

impl From<GameFinished> for AnyGame {
    fn from(game: GameFinished) -> Self {
        AnyGame::Finished(game)
    }
}

impl From<GameResult> for AnyGame {
    fn from(result: GameResult) -> Self {
        match result {
            GameResult::InProgress(g) => g.into(),
            GameResult::Finished(g) => g.into(),
        }
    }
}

impl AnyGame {
    /// The board.
    pub fn board(&self) -> &Board {
        match self {
            AnyGame::InProgress(g) => g.board(),
            AnyGame::Finished(g) => g.board(),
        }
    }

    /// The seats.
    pub fn roster(&self) -> &Roster {
        match self {
            AnyGame::InProgress(g) => g.roster(),
            AnyGame::Finished(g) => g.roster(),
        }
    }

    /// Placements so far.
    pub fn history(&self) -> &[Move] {
        match self {
            AnyGame::InProgress(g) => g.history(),
            AnyGame::Finished(g) => g.history(),
        }
    }

    /// The setup the game started from.
    pub fn setup(&self) -> GameSetup {
        match self {
            AnyGame::InProgress(g) => g.setup(),
            AnyGame::Finished(g) => g.setup(),
        }
    }

    /// The mark to move, if the game is in progress.
    pub fn to_move(&self) -> Option<Mark> {
        match self {
            AnyGame::InProgress(g) => Some(g.to_move()),
            AnyGame::Finished(_) => None,
        }
    }

    /// The winner, if the game is over.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            AnyGame::InProgress(_) => None,
            AnyGame::Finished(g) => Some(g.winner()),
        }
    }

    /// Returns true if the game is over.
    pub fn is_over(&self) -> bool {
        matches!(self, AnyGame::Finished(_))
    }

    /// Legal destinations for the mark to move. Empty once the game is over.
    pub fn valid_moves(&self) -> Vec<Coord> {
        match self {
            AnyGame::InProgress(g) => g.valid_moves(),
            AnyGame::Finished(_) => Vec::new(),
        }
    }

    /// Returns a status string for display.
    pub fn status_string(&self) -> String {
        match self {
            AnyGame::InProgress(g) => format!("In progress. Player {} to move.", g.to_move()),
            AnyGame::Finished(g) => format!("Game over. Player {} wins!", g.winner()),
        }
    }

    /// Applies a placement in place.
    ///
    /// On error the game is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError`] if the game is over or the move is illegal.
    #[instrument(skip(self), fields(mark = %action.mark, coord = %action.coord))]
    pub fn place(&mut self, action: Move) -> Result<(), MoveError> {
        match self {
            AnyGame::InProgress(g) => {
                let next = g.clone().place(action).inspect_err(|e| {
                    warn!(error = %e, "Placement rejected");
                })?;
                *self = next.into();
                debug!(status = %self.status_string(), "Placement applied");
                Ok(())
            }
            AnyGame::Finished(g) => Err(MoveError::GameOver).inspect_err(|_| {
                warn!(winner = %g.winner(), "Game is already over");
            }),
        }
    }

    /// Re-runs the elimination pass for the seat to move.
    ///
    /// A no-op once the game is over.
    #[instrument(skip(self))]
    pub fn settle(&mut self) {
        if let AnyGame::InProgress(g) = self {
            *self = g.clone().settle().into();
        }
    }

    /// Starts a fresh game with the same board size and seat count.
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        *self = self.setup().into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_move_keeps_game() {
        let mut game: AnyGame = GameSetup::new(5, 2).unwrap().into();
        let before = game.clone();
        assert!(game.place(Move::new(Mark::X, Coord::new(2, 2))).is_err());
        assert_eq!(game, before);
    }

    #[test]
    fn test_place_and_restart() {
        let mut game: AnyGame = GameSetup::new(5, 3).unwrap().into();
        game.place(Move::new(Mark::X, Coord::new(0, 0))).unwrap();
        assert_eq!(game.to_move(), Some(Mark::O));
        assert_eq!(game.history().len(), 1);

        game.restart();
        assert_eq!(game.history().len(), 0);
        assert_eq!(game.to_move(), Some(Mark::X));
        assert_eq!(game.setup(), GameSetup::new(5, 3).unwrap());
    }

    #[test]
    fn test_serde_round_trip_mid_game() {
        let mut game: AnyGame = GameSetup::new(4, 2).unwrap().into();
        game.place(Move::new(Mark::X, Coord::new(0, 0))).unwrap();
        let json = serde_json::to_string(&game).unwrap();
        let back: AnyGame = serde_json::from_str(&json).unwrap();
        assert_eq!(back, game);
    }

    #[test]
    fn test_status_string() {
        let game: AnyGame = GameSetup::new(4, 2).unwrap().into();
        assert_eq!(game.status_string(), "In progress. Player X to move.");
    }
}
