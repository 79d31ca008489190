//! Computer seat: opening policy, then the configured selector.

use super::Seat;
use crate::config::{ConfigError, OpeningPolicy, SessionConfig};
use crate::selectors::{MoveSelector, Selection, build_selector, opening_move};
use fliptac_core::GameInProgress;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tracing::{debug, instrument};

/// A computer player.
///
/// Waits `delay` before every move so a human can follow along. A mark that
/// hasn't moved yet plays its opening policy; after that the selector
/// decides, squeezing the next active seat.
pub struct ComputerSeat {
    name: String,
    selector: Box<dyn MoveSelector>,
    opening: OpeningPolicy,
    delay: Duration,
    rng: StdRng,
}

impl ComputerSeat {
    /// Creates a computer seat around `selector`.
    pub fn new(
        name: impl Into<String>,
        selector: Box<dyn MoveSelector>,
        opening: OpeningPolicy,
        delay: Duration,
        rng: StdRng,
    ) -> Self {
        Self {
            name: name.into(),
            selector,
            opening,
            delay,
            rng,
        }
    }

    /// Builds the seat the config describes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the selector cannot be built.
    pub fn from_config(config: &SessionConfig, mut rng: StdRng) -> Result<Self, ConfigError> {
        let selector = build_selector(config, StdRng::seed_from_u64(rng.r#gen()))?;
        Ok(Self::new(
            format!("CPU (level {})", config.cpu_difficulty()),
            selector,
            *config.opening(),
            config.cpu_delay(),
            rng,
        ))
    }
}

#[async_trait::async_trait]
impl Seat for ComputerSeat {
    #[instrument(skip(self, game), fields(seat = %self.name, mark = %game.to_move()))]
    async fn get_move(&mut self, game: &GameInProgress) -> anyhow::Result<Selection> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let mover = game.to_move();
        let board = game.board();

        if board.last_move(mover).is_none() {
            let coord = opening_move(self.opening, board, mover, &mut self.rng);
            debug!(?coord, policy = %self.opening, "Opening move");
            return Ok(Selection::chosen(coord));
        }

        let opponent = game.roster().next_active_after(mover).unwrap_or(mover);
        let selection = self.selector.select_move(board, mover, opponent).await;
        debug!(coord = ?selection.coord(), selector = self.selector.name(), "Selector chose");
        Ok(selection)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_computer(&self) -> bool {
        true
    }
}
