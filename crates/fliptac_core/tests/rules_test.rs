//! Movement-rule properties, checked on fixed positions and random playouts.

use fliptac_core::{AnyGame, Board, Coord, GameSetup, Mark, Move, Square};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Plays random legal moves, calling `check` on every position reached.
fn random_playouts(mut check: impl FnMut(&AnyGame)) {
    let mut rng = StdRng::seed_from_u64(2024);
    for size in 3..=7 {
        for seats in 2..=5 {
            for _ in 0..4 {
                let mut game: AnyGame = GameSetup::new(size, seats).unwrap().into();
                check(&game);
                while let Some(mover) = game.to_move() {
                    let coord = *game.valid_moves().choose(&mut rng).unwrap();
                    game.place(Move::new(mover, coord)).unwrap();
                    check(&game);
                }
            }
        }
    }
}

#[test]
fn test_fresh_three_by_three_center_illegal_corner_legal() {
    let board = Board::new(3);
    assert!(!board.is_valid_move(Mark::X, Coord::new(1, 1)));
    assert!(board.is_valid_move(Mark::X, Coord::new(0, 0)));
    assert_eq!(board.count_valid_moves(Mark::X), 8);
}

#[test]
fn test_jump_needs_occupied_midpoint() {
    let mut board = Board::new(5);
    board.occupy(Mark::X, Coord::new(0, 0));
    assert!(!board.is_valid_move(Mark::X, Coord::new(0, 2)));

    board.occupy(Mark::O, Coord::new(0, 1));
    assert!(board.is_valid_move(Mark::X, Coord::new(0, 2)));
}

#[test]
fn test_occupied_targets_never_legal() {
    random_playouts(|game| {
        let board = game.board();
        for coord in board.coords().filter(|c| !board.is_empty(*c)) {
            for mark in Mark::ALL {
                assert!(!board.is_valid_move(mark, coord), "{mark} may claim occupied {coord}");
            }
        }
    });
}

#[test]
fn test_first_moves_only_on_border() {
    random_playouts(|game| {
        let board = game.board();
        for mark in Mark::ALL.into_iter().filter(|m| board.last_move(*m).is_none()) {
            for coord in board.valid_moves(mark) {
                assert!(coord.is_border(board.size()), "{mark} opens at {coord}");
            }
        }
    });
}

#[test]
fn test_long_moves_are_jumps_over_foreign_stones() {
    random_playouts(|game| {
        let board = game.board();
        for mark in Mark::ALL {
            let Some(last) = board.last_move(mark) else {
                continue;
            };
            for coord in board.valid_moves(mark) {
                if last.chebyshev(coord) <= 1 {
                    continue;
                }
                let middle = last
                    .jump_midpoint(coord)
                    .unwrap_or_else(|| panic!("{mark} reaches {coord} from {last} without a jump"));
                match board.get(middle) {
                    Some(Square::Occupied(owner)) => assert_ne!(owner, mark),
                    other => panic!("{mark} jumps over {other:?} at {middle}"),
                }
            }
        }
    });
}

#[test]
fn test_count_matches_predicate() {
    random_playouts(|game| {
        let board = game.board();
        for mark in Mark::ALL {
            let hits = board
                .coords()
                .filter(|c| board.is_valid_move(mark, *c))
                .count();
            assert_eq!(board.count_valid_moves(mark), hits);
            assert_eq!(board.valid_moves(mark).len(), hits);
            assert_eq!(board.has_valid_move(mark), hits > 0);
        }
    });
}

#[test]
fn test_out_of_bounds_never_legal() {
    let board = Board::new(4);
    for coord in [Coord::new(4, 0), Coord::new(0, 4), Coord::new(9, 9)] {
        assert!(!board.is_valid_move(Mark::X, coord));
    }
}
