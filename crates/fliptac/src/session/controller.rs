//! The turn loop.

use super::error::{SessionError, SessionErrorKind};
use super::events::{Feedback, GameEvent, GameObserver, StateView};
use crate::players::Seat;
use fliptac_core::contracts::LegalMove;
use fliptac_core::{AnyGame, GameSetup, Mark, Move};
use tracing::{debug, info, instrument, warn};

/// Result of one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// A stone was placed.
    Placed(Move),
    /// A human's pick was rejected; the same seat goes again.
    Rejected,
    /// The mover had no move and was settled out.
    Settled,
    /// The game is over.
    Finished(Mark),
}

/// Owns one game and its seats and drives turns until someone wins.
///
/// Seats are indexed by roster order: `seats[0]` plays `X`, `seats[1]`
/// plays `O` and so on.
pub struct GameSession<O> {
    game: AnyGame,
    seats: Vec<Box<dyn Seat>>,
    observer: O,
}

impl<O: GameObserver> GameSession<O> {
    /// Creates a session. The game starts immediately with `X` to move.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the seat count differs from the setup's.
    #[instrument(skip(seats, observer), fields(seats = seats.len()))]
    pub fn new(setup: GameSetup, seats: Vec<Box<dyn Seat>>, observer: O) -> Result<Self, SessionError> {
        if seats.len() != setup.seats() {
            return Err(SessionErrorKind::SeatCount {
                expected: setup.seats(),
                got: seats.len(),
            }
            .into());
        }
        info!(size = setup.size(), "Creating session");
        Ok(Self {
            game: setup.into(),
            seats,
            observer,
        })
    }

    /// The current game.
    pub fn game(&self) -> &AnyGame {
        &self.game
    }

    /// The observer.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Plays turns until one seat remains and returns its mark.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] on a seat failure or an internal
    /// inconsistency such as a computer picking an illegal cell.
    #[instrument(skip(self))]
    pub async fn run(&mut self) -> Result<Mark, SessionError> {
        self.publish_state();
        loop {
            if let TurnOutcome::Finished(winner) = self.step().await? {
                return Ok(winner);
            }
        }
    }

    /// Plays one turn.
    ///
    /// # Errors
    ///
    /// See [`GameSession::run`].
    #[instrument(skip(self))]
    pub async fn step(&mut self) -> Result<TurnOutcome, SessionError> {
        let game = match &self.game {
            AnyGame::InProgress(game) => game,
            AnyGame::Finished(done) => return Ok(TurnOutcome::Finished(done.winner())),
        };

        let mover = game.to_move();
        let seat = self
            .seats
            .get_mut(mover.index())
            .ok_or_else(|| SessionError::new(SessionErrorKind::Seat(mover, "no seat".to_string())))?;
        debug!(seat = seat.name(), %mover, "Waiting for move");

        let selection = seat
            .get_move(game)
            .await
            .map_err(|e| SessionError::new(SessionErrorKind::Seat(mover, e.to_string())))?;
        let seat_name = seat.name().to_string();
        let is_computer = seat.is_computer();

        if let Some(reason) = selection.fallback().clone() {
            warn!(seat = %seat_name, %reason, "Oracle fell back to a random move");
            self.observer.notify(GameEvent::Feedback(Feedback::OracleFallback {
                seat: seat_name.clone(),
                reason,
            }));
        }

        let Some(coord) = *selection.coord() else {
            if game.board().has_valid_move(mover) {
                return Err(SessionErrorKind::SelectorGaveUp(mover).into());
            }
            info!(%mover, "No move available, settling");
            let eliminated_before = self.game.roster().eliminated().len();
            self.game.settle();
            self.after_mutation(eliminated_before);
            return Ok(match self.game.winner() {
                Some(winner) => TurnOutcome::Finished(winner),
                None => TurnOutcome::Settled,
            });
        };

        let action = Move::new(mover, coord);
        if let Err(reason) = LegalMove::check(&action, game) {
            if is_computer {
                return Err(SessionErrorKind::IllegalComputerMove(action, reason).into());
            }
            warn!(seat = %seat_name, %action, %reason, "Invalid attempt");
            self.observer.notify(GameEvent::Feedback(Feedback::InvalidAttempt {
                seat: seat_name,
                action,
                reason,
            }));
            return Ok(TurnOutcome::Rejected);
        }

        let eliminated_before = game.roster().eliminated().len();
        self.game
            .place(action)
            .map_err(|reason| SessionError::new(SessionErrorKind::IllegalComputerMove(action, reason)))?;
        info!(seat = %seat_name, %action, "Move placed");
        self.observer.notify(GameEvent::Feedback(Feedback::MovePlaced {
            seat: seat_name,
            action,
        }));
        self.after_mutation(eliminated_before);

        Ok(match self.game.winner() {
            Some(winner) => TurnOutcome::Finished(winner),
            None => TurnOutcome::Placed(action),
        })
    }

    /// Starts over with the same board size and seats.
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        info!("Restarting session");
        self.game.restart();
        self.publish_state();
    }

    fn after_mutation(&mut self, eliminated_before: usize) {
        let newly_out = self.game.roster().eliminated()[eliminated_before..].to_vec();
        for mark in newly_out {
            info!(%mark, "Eliminated");
            self.observer
                .notify(GameEvent::Feedback(Feedback::Eliminated(mark)));
        }

        self.publish_state();

        if let Some(winner) = self.game.winner() {
            let seat = self
                .seats
                .get(winner.index())
                .map(|s| s.name().to_string())
                .unwrap_or_else(|| winner.to_string());
            info!(%winner, %seat, "Game won");
            self.observer
                .notify(GameEvent::Feedback(Feedback::GameWon { winner, seat }));
        }
    }

    fn publish_state(&mut self) {
        self.observer
            .notify(GameEvent::StateChanged(StateView::from(&self.game)));
    }
}
