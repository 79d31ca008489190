//! FlipTac core - pure game logic for the FlipTac board game.
//!
//! FlipTac is played on an N×N grid by two to five marks. A mark's first
//! placement goes on the border; after that each placement must be adjacent
//! to the mark's previous one, or a straight two-cell jump over another
//! mark's stone. A seat that cannot move on its turn is eliminated, and the
//! last seat standing wins.
//!
//! # Architecture
//!
//! - **Types**: [`Board`], [`Mark`], [`Square`], [`Coord`]
//! - **Rules**: movement legality as free functions and `Board` methods
//! - **Typestate**: [`GameSetup`] → [`GameInProgress`] → [`GameFinished`]
//! - **Contracts**: preconditions and invariants checked on every placement
//! - **Simulation**: scoped what-if placements for move evaluation
//!
//! # Example
//!
//! ```
//! use fliptac_core::{Coord, GameResult, GameSetup, Mark, Move};
//!
//! let game = GameSetup::new(5, 2)?.start();
//! assert_eq!(game.to_move(), Mark::X);
//!
//! match game.place(Move::new(Mark::X, Coord::new(0, 0)))? {
//!     GameResult::InProgress(game) => assert_eq!(game.to_move(), Mark::O),
//!     GameResult::Finished(_) => unreachable!(),
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
pub mod contracts;
pub mod invariants;
mod position;
mod roster;
pub mod rules;
mod simulation;
mod types;
mod typestate;
mod wrapper;

pub use action::{Move, MoveError};
pub use position::Coord;
pub use roster::{PlayerSlot, Roster};
pub use simulation::Simulation;
pub use types::{Board, MAX_PLAYERS, MIN_BOARD_SIZE, Mark, Square};
pub use typestate::{GameFinished, GameInProgress, GameResult, GameSetup, SetupError};
pub use wrapper::AnyGame;
