//! Seats: who decides the move for each mark.

mod computer;
mod human;

pub use computer::ComputerSeat;
pub use human::{HumanSeat, InputQueue, input_queue};

use crate::config::{ConfigError, SessionConfig};
use crate::selectors::Selection;
use fliptac_core::{GameInProgress, Mark};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, instrument};

/// Something that can decide a move for one mark.
#[async_trait::async_trait]
pub trait Seat: Send {
    /// Decides a move for the mark to move in `game`.
    async fn get_move(&mut self, game: &GameInProgress) -> anyhow::Result<Selection>;

    /// Display name.
    fn name(&self) -> &str;

    /// Computer seats are held to their choices: an illegal pick from one
    /// is an internal error rather than a retry.
    fn is_computer(&self) -> bool;
}

/// The session RNG: seeded when the config names a seed.
pub fn session_rng(config: &SessionConfig) -> StdRng {
    match config.seed() {
        Some(seed) => StdRng::seed_from_u64(*seed),
        None => StdRng::from_entropy(),
    }
}

/// Seats for the configured player count, in roster order.
///
/// One player means the computer plays `X` (and so moves first) against a
/// human `O`. Two to five players are all human and share `input`.
///
/// # Errors
///
/// Returns [`ConfigError`] if the config is invalid or the computer's
/// selector cannot be built.
#[instrument(skip_all, fields(players = config.player_count()))]
pub fn seats_from_config(config: &SessionConfig, input: InputQueue) -> Result<Vec<Box<dyn Seat>>, ConfigError> {
    config.validate()?;
    let mut rng = session_rng(config);

    let seats: Vec<Box<dyn Seat>> = if config.has_computer() {
        let cpu = ComputerSeat::from_config(config, StdRng::seed_from_u64(rng.r#gen()))?;
        vec![Box::new(cpu), Box::new(HumanSeat::new(Mark::O, input))]
    } else {
        Mark::ALL
            .iter()
            .take(*config.player_count())
            .map(|&mark| Box::new(HumanSeat::new(mark, input.clone())) as Box<dyn Seat>)
            .collect()
    };

    info!(seats = seats.len(), "Seats ready");
    Ok(seats)
}
