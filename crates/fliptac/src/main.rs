//! FlipTac - terminal front end.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use fliptac::{
    ComputerSeat, Difficulty, Feedback, GameEvent, GameObserver, GameSession, Seat, SessionConfig,
    input_queue, seats_from_config, session_rng,
};
use fliptac_core::{Coord, GameSetup, Mark};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,fliptac=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Play {
            players,
            size,
            level,
        } => {
            let mut config = config;
            if let Some(players) = players {
                config = config.with_player_count(players);
            }
            if let Some(size) = size {
                config = config.with_board_size(size);
            }
            if let Some(level) = level {
                config = config.with_cpu_difficulty(difficulty(level)?);
            }
            run_play(config).await
        }
        Command::Simulate {
            levels,
            games,
            size,
        } => {
            let config = match size {
                Some(size) => config.with_board_size(size),
                None => config,
            };
            run_simulation(config, levels, games).await
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<SessionConfig> {
    match path {
        Some(path) => Ok(SessionConfig::from_file(path)?),
        None => Ok(SessionConfig::default()),
    }
}

fn difficulty(level: u8) -> Result<Difficulty> {
    Difficulty::try_from(level).map_err(anyhow::Error::msg)
}

/// Parses "row col" or "row,col".
fn parse_cell(line: &str) -> Option<Coord> {
    let mut parts = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .map(str::parse::<usize>);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(Ok(row)), Some(Ok(col)), None) => Some(Coord::new(row, col)),
        _ => None,
    }
}

/// Terminal commands between games.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    Restart,
    Quit,
}

/// Run an interactive game on stdin/stdout
#[instrument(skip(config))]
async fn run_play(config: SessionConfig) -> Result<()> {
    config.validate()?;
    info!(players = config.player_count(), size = config.board_size(), "Starting terminal game");

    let (cell_tx, input) = input_queue();
    let (control_tx, mut control_rx) = mpsc::unbounded_channel();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let line = line.trim();
            match line {
                "r" | "restart" => {
                    let _ = control_tx.send(Control::Restart);
                }
                "q" | "quit" => {
                    let _ = control_tx.send(Control::Quit);
                    break;
                }
                _ => match parse_cell(line) {
                    Some(coord) => {
                        let _ = cell_tx.send(coord);
                    }
                    None => println!("Enter a move as: row col"),
                },
            }
        }
        debug!("Stdin closed");
    });

    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            print_event(&event);
        }
    });

    let seats = seats_from_config(&config, input)?;
    let setup = GameSetup::new(*config.board_size(), seats.len())?;
    let mut session = GameSession::new(setup, seats, event_tx)?;

    play_loop(&mut session, &mut control_rx).await
}

/// Runs games until the player quits. `r` starts over at any time.
async fn play_loop<O: GameObserver>(
    session: &mut GameSession<O>,
    control_rx: &mut mpsc::UnboundedReceiver<Control>,
) -> Result<()> {
    loop {
        let finished = tokio::select! {
            result = session.run() => {
                let winner = result?;
                info!(%winner, "Game over");
                println!("Type r to play again or q to quit.");
                true
            }
            control = control_rx.recv() => match control {
                Some(Control::Restart) => {
                    info!("Restart requested mid-game");
                    false
                }
                Some(Control::Quit) | None => return Ok(()),
            },
        };

        if finished {
            match control_rx.recv().await {
                Some(Control::Restart) => {}
                Some(Control::Quit) | None => return Ok(()),
            }
        }
        session.restart();
    }
}

fn print_event(event: &GameEvent) {
    match event {
        GameEvent::StateChanged(view) => {
            println!();
            println!("{}", view.board().display());
            println!("{}", view.status());
            if view.cursor().is_some() {
                let cells = view
                    .valid_moves()
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" ");
                println!("Legal: {}", cells);
            }
        }
        GameEvent::Feedback(Feedback::MovePlaced { seat, action }) => {
            println!("{}: {}", seat, action);
        }
        GameEvent::Feedback(Feedback::InvalidAttempt { seat, action, reason }) => {
            println!("{} cannot play {}: {}", seat, action.coord, reason);
        }
        GameEvent::Feedback(Feedback::Eliminated(mark)) => {
            println!("{} has no moves left and is out.", mark);
        }
        GameEvent::Feedback(Feedback::OracleFallback { seat, reason }) => {
            println!("{} guessed ({})", seat, reason);
        }
        GameEvent::Feedback(Feedback::GameWon { winner, seat }) => {
            println!("{} ({}) wins!", seat, winner);
        }
    }
}

/// Counts placements and fallbacks for one simulated game.
#[derive(Debug, Default)]
struct Tally {
    moves: usize,
    fallbacks: usize,
}

impl GameObserver for Tally {
    fn notify(&mut self, event: GameEvent) {
        match event {
            GameEvent::Feedback(Feedback::MovePlaced { .. }) => self.moves += 1,
            GameEvent::Feedback(Feedback::OracleFallback { .. }) => self.fallbacks += 1,
            _ => {}
        }
    }
}

/// Run computer-only games and report wins per seat
#[instrument(skip(config))]
async fn run_simulation(config: SessionConfig, levels: Vec<u8>, games: usize) -> Result<()> {
    let base = config.with_cpu_delay_ms(0);
    let mut rng = session_rng(&base);
    let setup = GameSetup::new(*base.board_size(), levels.len())
        .context("simulate needs 2 to 5 levels")?;

    let mut wins: BTreeMap<Mark, usize> = BTreeMap::new();
    let mut total_moves = 0;
    let mut total_fallbacks = 0;

    for game in 0..games {
        let mut seats: Vec<Box<dyn Seat>> = Vec::with_capacity(levels.len());
        for &level in &levels {
            let seat_config = base.clone().with_cpu_difficulty(difficulty(level)?);
            seat_config.validate()?;
            let seat = ComputerSeat::from_config(&seat_config, StdRng::seed_from_u64(rng.r#gen()))?;
            seats.push(Box::new(seat));
        }

        let mut session = GameSession::new(setup, seats, Tally::default())?;
        let winner = session.run().await?;
        let tally = session.observer();
        debug!(game, %winner, moves = tally.moves, "Simulated game");

        *wins.entry(winner).or_default() += 1;
        total_moves += tally.moves;
        total_fallbacks += tally.fallbacks;
    }

    println!("{} games on {}x{}", games, base.board_size(), base.board_size());
    for (index, level) in levels.iter().enumerate() {
        let mark = Mark::ALL[index];
        let won = wins.get(&mark).copied().unwrap_or(0);
        println!("  {} (level {}): {} wins", mark, level, won);
    }
    if games > 0 {
        println!("  average length: {:.1} moves", total_moves as f64 / games as f64);
    }
    if total_fallbacks > 0 {
        println!("  oracle fallbacks: {}", total_fallbacks);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_restart_mid_game() {
        let (cells, input) = input_queue();
        let (events, _rx) = mpsc::unbounded_channel::<GameEvent>();
        let config = SessionConfig::default().with_player_count(2);
        let seats = seats_from_config(&config, input).unwrap();
        let mut session = GameSession::new(GameSetup::new(5, 2).unwrap(), seats, events).unwrap();

        cells.send(Coord::new(0, 0)).unwrap();
        session.step().await.unwrap();
        assert_eq!(session.game().history().len(), 1);

        let (control_tx, mut control_rx) = mpsc::unbounded_channel();
        control_tx.send(Control::Restart).unwrap();
        control_tx.send(Control::Quit).unwrap();
        play_loop(&mut session, &mut control_rx).await.unwrap();

        assert!(session.game().history().is_empty());
        assert_eq!(session.game().to_move(), Some(Mark::X));
    }

    #[test]
    fn test_parse_cell() {
        assert_eq!(parse_cell("1 2"), Some(Coord::new(1, 2)));
        assert_eq!(parse_cell("3,0"), Some(Coord::new(3, 0)));
        assert_eq!(parse_cell(" 4 ,  4 "), Some(Coord::new(4, 4)));
        assert_eq!(parse_cell("1"), None);
        assert_eq!(parse_cell("1 2 3"), None);
        assert_eq!(parse_cell("a b"), None);
    }
}
