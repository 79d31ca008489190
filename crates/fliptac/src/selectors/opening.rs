//! First placement for a computer seat.

use crate::config::OpeningPolicy;
use fliptac_core::{Board, Coord, Mark};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

/// Picks a border cell for a mark that hasn't moved yet.
///
/// Only cells the mark may legally claim are considered, so occupied
/// border cells are skipped. Returns `None` when the whole border is taken.
#[instrument(skip(board, rng), fields(size = board.size()))]
pub fn opening_move<R: Rng + ?Sized>(
    policy: OpeningPolicy,
    board: &Board,
    mover: Mark,
    rng: &mut R,
) -> Option<Coord> {
    let ring = Coord::perimeter(board.size());
    let choice = match policy {
        OpeningPolicy::RandomBorder => ring
            .iter()
            .copied()
            .filter(|c| board.is_valid_move(mover, *c))
            .collect::<Vec<_>>()
            .choose(rng)
            .copied(),
        OpeningPolicy::PerimeterWalk => {
            if ring.is_empty() {
                return None;
            }
            let start = rng.gen_range(0..ring.len());
            ring.iter()
                .cycle()
                .skip(start)
                .take(ring.len())
                .copied()
                .find(|c| board.is_valid_move(mover, *c))
        }
    };
    debug!(?choice, "Opening chosen");
    choice
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_openings_land_on_border() {
        let board = Board::new(5);
        let mut rng = StdRng::seed_from_u64(11);
        for policy in [OpeningPolicy::RandomBorder, OpeningPolicy::PerimeterWalk] {
            for _ in 0..30 {
                let coord = opening_move(policy, &board, Mark::X, &mut rng).unwrap();
                assert!(coord.is_border(5), "{policy} chose {coord}");
            }
        }
    }

    #[test]
    fn test_openings_skip_taken_cells() {
        let mut board = Board::new(3);
        let ring = Coord::perimeter(3);
        for coord in &ring[..ring.len() - 1] {
            board.occupy(Mark::X, *coord);
        }
        let free = ring[ring.len() - 1];
        let mut rng = StdRng::seed_from_u64(5);
        for policy in [OpeningPolicy::RandomBorder, OpeningPolicy::PerimeterWalk] {
            assert_eq!(opening_move(policy, &board, Mark::O, &mut rng), Some(free));
        }
    }

    #[test]
    fn test_full_border_yields_none() {
        let mut board = Board::new(3);
        for coord in Coord::perimeter(3) {
            board.occupy(Mark::X, coord);
        }
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(
            opening_move(OpeningPolicy::PerimeterWalk, &board, Mark::O, &mut rng),
            None
        );
    }
}
