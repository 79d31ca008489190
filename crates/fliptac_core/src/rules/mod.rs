//! Game rules module.
//!
//! Pure functions over a [`Board`](super::Board); nothing here mutates state.

pub mod legality;

pub use legality::{count_valid_moves, has_valid_move, is_valid_move, valid_moves};
