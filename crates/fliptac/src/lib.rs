//! FlipTac - sessions, computer opponents and move oracles.
//!
//! The rules live in [`fliptac_core`]. This crate adds everything needed to
//! actually play:
//!
//! - **Selectors**: level 1 (mobility) and level 2 (positional) heuristics
//! - **Oracles**: level 3 (tensor inference) and level 4 (language model),
//!   both degrading to a random legal move on failure
//! - **Seats**: human and computer players behind one [`Seat`] trait
//! - **Session**: [`GameSession`] drives turns and publishes [`GameEvent`]s
//! - **Config**: [`SessionConfig`] from TOML
//!
//! # Example
//!
//! ```no_run
//! use fliptac::{GameSession, SessionConfig, input_queue, seats_from_config};
//! use fliptac_core::GameSetup;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = SessionConfig::default();
//! let (_tx, input) = input_queue();
//! let seats = seats_from_config(&config, input)?;
//! let setup = GameSetup::new(*config.board_size(), seats.len())?;
//! let (events, _rx) = tokio::sync::mpsc::unbounded_channel();
//! let mut session = GameSession::new(setup, seats, events)?;
//! let winner = session.run().await?;
//! println!("{} wins", winner);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod llm_client;
mod oracle;
mod players;
mod selectors;
mod session;

pub use config::{
    ConfigError, Difficulty, ORACLE_BOARD_SIZES, OpeningPolicy, OracleConfig, SessionConfig,
    WeightProfile,
};
pub use llm_client::{LlmClient, LlmConfig, LlmError, LlmProvider};
pub use oracle::{
    HttpTensorClient, MoveReply, OracleError, TensorInference, TensorOracle, TextInference,
    TextOracle, build_prompt, encode_board, parse_reply, within,
};
pub use players::{
    ComputerSeat, HumanSeat, InputQueue, Seat, input_queue, seats_from_config, session_rng,
};
pub use selectors::{
    MobilityMinimizer, MoveSelector, PositionalTable, Selection, WeightedPositional,
    build_selector, minimize_mobility, opening_move, random_legal, score_candidates,
};
pub use session::{
    Feedback, GameEvent, GameObserver, GameSession, SessionError, SessionErrorKind, StateView,
    TurnOutcome,
};
