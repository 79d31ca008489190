//! Last-move invariant: each mark's anchor is its most recent placement.

use super::super::{GameInProgress, Mark};
use super::Invariant;

/// Invariant: for every mark, the board's recorded last move equals the
/// coordinate of that mark's latest entry in the history, or `None` if the
/// mark has not moved.
pub struct LastMoveConsistentInvariant;

impl Invariant<GameInProgress> for LastMoveConsistentInvariant {
    fn holds(game: &GameInProgress) -> bool {
        Mark::ALL.iter().all(|&mark| {
            let latest = game
                .history()
                .iter()
                .rev()
                .find(|action| action.mark == mark)
                .map(|action| action.coord);
            game.board().last_move(mark) == latest
        })
    }

    fn description() -> &'static str {
        "Each mark's last move is its latest placement"
    }
}
