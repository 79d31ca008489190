//! Command-line interface for fliptac.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// FlipTac - claim cells, jump stones, be the last one standing
#[derive(Parser, Debug)]
#[command(name = "fliptac")]
#[command(about = "Play FlipTac in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Session config file (TOML). Defaults apply when absent.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal: one player against the computer, or hot-seat
    Play {
        /// Number of players (1 plays the computer)
        #[arg(short, long)]
        players: Option<usize>,

        /// Board edge length
        #[arg(short, long)]
        size: Option<usize>,

        /// Computer difficulty, 1 to 4
        #[arg(short, long)]
        level: Option<u8>,
    },

    /// Pit computer levels against each other
    Simulate {
        /// Difficulty per seat in roster order, e.g. `1,2`
        #[arg(long, value_delimiter = ',', default_value = "1,2")]
        levels: Vec<u8>,

        /// Number of games
        #[arg(short, long, default_value = "20")]
        games: usize,

        /// Board edge length
        #[arg(short, long)]
        size: Option<usize>,
    },
}
