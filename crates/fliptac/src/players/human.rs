//! Human seat fed from an input channel.

use super::Seat;
use crate::selectors::Selection;
use fliptac_core::{Coord, GameInProgress, Mark};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, instrument};

/// Cell picks from the terminal, shared by every human seat at one table.
pub type InputQueue = Arc<Mutex<mpsc::UnboundedReceiver<Coord>>>;

/// Creates an input queue and the sender that feeds it.
pub fn input_queue() -> (mpsc::UnboundedSender<Coord>, InputQueue) {
    let (tx, rx) = mpsc::unbounded_channel();
    (tx, Arc::new(Mutex::new(rx)))
}

/// A human player. Moves arrive on the input queue.
pub struct HumanSeat {
    name: String,
    input: InputQueue,
}

impl HumanSeat {
    /// Creates a human seat for `mark`.
    pub fn new(mark: Mark, input: InputQueue) -> Self {
        Self {
            name: format!("Player {}", mark),
            input,
        }
    }
}

#[async_trait::async_trait]
impl Seat for HumanSeat {
    #[instrument(skip(self, _game), fields(seat = %self.name))]
    async fn get_move(&mut self, _game: &GameInProgress) -> anyhow::Result<Selection> {
        debug!("Waiting for input");
        match self.input.lock().await.recv().await {
            Some(coord) => Ok(Selection::chosen(Some(coord))),
            None => anyhow::bail!("Input closed while waiting for {}", self.name),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_computer(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fliptac_core::GameSetup;

    #[tokio::test]
    async fn test_reads_queued_move() {
        let (tx, queue) = input_queue();
        let mut seat = HumanSeat::new(Mark::X, queue);
        let game = GameSetup::new(5, 2).unwrap().start();

        tx.send(Coord::new(0, 3)).unwrap();
        let selection = seat.get_move(&game).await.unwrap();
        assert_eq!(selection.coord(), &Some(Coord::new(0, 3)));
        assert_eq!(seat.name(), "Player X");
    }

    #[tokio::test]
    async fn test_closed_input_is_an_error() {
        let (tx, queue) = input_queue();
        drop(tx);
        let mut seat = HumanSeat::new(Mark::O, queue);
        let game = GameSetup::new(5, 2).unwrap().start();
        assert!(seat.get_move(&game).await.is_err());
    }
}
