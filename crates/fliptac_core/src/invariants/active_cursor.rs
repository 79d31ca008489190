//! Active cursor invariant: the seat to move is still in the game.

use super::super::GameInProgress;
use super::Invariant;

/// Invariant: while the game is in progress, at least two seats are active
/// and the cursor rests on one of them.
pub struct ActiveCursorInvariant;

impl Invariant<GameInProgress> for ActiveCursorInvariant {
    fn holds(game: &GameInProgress) -> bool {
        let roster = game.roster();
        roster.active_count() >= 2 && roster.is_active(roster.current())
    }

    fn description() -> &'static str {
        "Cursor rests on an active seat while two or more remain"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameSetup, Mark};

    #[test]
    fn test_fresh_game_holds() {
        let game = GameSetup::new(4, 5).unwrap().start();
        assert!(ActiveCursorInvariant::holds(&game));
    }

    #[test]
    fn test_eliminated_cursor_violates() {
        let mut game = GameSetup::new(4, 3).unwrap().start();
        game.roster.eliminate(Mark::X);
        assert!(!ActiveCursorInvariant::holds(&game));
    }
}
