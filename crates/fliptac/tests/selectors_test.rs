//! Heuristic selector behaviour.

use fliptac::{
    MobilityMinimizer, MoveSelector, PositionalTable, WeightProfile, WeightedPositional,
    minimize_mobility, score_candidates,
};
use fliptac_core::{AnyGame, Board, Coord, GameSetup, Mark, Move};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// 5×5: X last at the centre, O on the top edge, a Δ stone at (3, 0).
fn contested_board() -> Board {
    let mut board = Board::new(5);
    board.occupy(Mark::X, Coord::new(2, 2));
    board.occupy(Mark::O, Coord::new(0, 3));
    board.occupy(Mark::Delta, Coord::new(3, 0));
    board
}

/// Boards reached by random play, with the mark to move and its opponent.
fn sampled_positions() -> Vec<(Board, Mark, Mark)> {
    let mut rng = StdRng::seed_from_u64(99);
    let mut positions = Vec::new();
    for size in [4, 5, 7] {
        for seats in [2, 3] {
            let mut game: AnyGame = GameSetup::new(size, seats).unwrap().into();
            while let Some(mover) = game.to_move() {
                let opponent = game.roster().next_active_after(mover).unwrap();
                positions.push((game.board().clone(), mover, opponent));
                let coord = *game.valid_moves().choose(&mut rng).unwrap();
                game.place(Move::new(mover, coord)).unwrap();
            }
        }
    }
    positions
}

#[test]
fn test_positional_prefers_lower_opponent_mobility_at_equal_value() {
    let mut board = contested_board();
    let table = PositionalTable::new(5);
    let scores = score_candidates(&mut board, &table, Mark::X, Mark::O, (5, 4));

    // (1, 2) and (2, 1) share positional value 10 and own mobility 6;
    // (1, 2) leaves O four replies instead of five.
    assert_eq!(table.value(Coord::new(1, 2)), table.value(Coord::new(2, 1)));
    let score_of = |c: Coord| scores.iter().find(|(x, _)| *x == c).unwrap().1;
    assert!(score_of(Coord::new(1, 2)) > score_of(Coord::new(2, 1)));
}

#[tokio::test]
async fn test_positional_selector_picks_best_score() {
    let board = contested_board();
    for profile in [WeightProfile::Basic, WeightProfile::Tuned] {
        let mut selector = WeightedPositional::new(profile, StdRng::seed_from_u64(1));
        let selection = selector.select_move(&board, Mark::X, Mark::O).await;
        assert_eq!(selection.coord(), &Some(Coord::new(1, 2)), "{profile}");
        assert!(selection.fallback().is_none());
    }
}

#[tokio::test]
async fn test_mobility_selector_on_contested_board() {
    let board = contested_board();
    let mut selector = MobilityMinimizer::new();
    let selection = selector.select_move(&board, Mark::X, Mark::O).await;
    assert_eq!(selection.coord(), &Some(Coord::new(1, 2)));
}

#[tokio::test]
async fn test_selectors_return_none_when_stuck() {
    let mut board = Board::new(3);
    for coord in Coord::all(3) {
        board.occupy(Mark::O, coord);
    }
    let mut mobility = MobilityMinimizer::new();
    let mut positional = WeightedPositional::new(WeightProfile::Basic, StdRng::seed_from_u64(1));
    assert_eq!(mobility.select_move(&board, Mark::X, Mark::O).await.coord(), &None);
    assert_eq!(positional.select_move(&board, Mark::X, Mark::O).await.coord(), &None);
}

#[test]
fn test_simulation_is_reversible() {
    for (board, mover, opponent) in sampled_positions() {
        let table = PositionalTable::new(board.size());

        let mut scratch = board.clone();
        let choice = minimize_mobility(&mut scratch, mover, opponent);
        assert_eq!(scratch, board);
        if let Some(coord) = choice {
            assert!(board.is_valid_move(mover, coord));
        }

        let scores = score_candidates(&mut scratch, &table, mover, opponent, (7, 5));
        assert_eq!(scratch, board);
        assert_eq!(scores.len(), board.count_valid_moves(mover));
    }
}

#[tokio::test]
async fn test_positional_choice_is_first_maximum() {
    for (board, mover, opponent) in sampled_positions() {
        let table = PositionalTable::new(board.size());
        let scores = score_candidates(&mut board.clone(), &table, mover, opponent, (5, 4));
        let Some(top) = scores.iter().map(|(_, s)| *s).max() else {
            continue;
        };
        let expected = scores.iter().find(|(_, s)| *s == top).map(|(c, _)| *c);

        let mut selector = WeightedPositional::new(WeightProfile::Basic, StdRng::seed_from_u64(5));
        let selection = selector.select_move(&board, mover, opponent).await;
        assert_eq!(*selection.coord(), expected);
    }
}
