//! Game sessions: seats, the turn loop and UI events.

mod controller;
mod error;
mod events;

pub use controller::{GameSession, TurnOutcome};
pub use error::{SessionError, SessionErrorKind};
pub use events::{Feedback, GameEvent, GameObserver, StateView};
