//! Command-line interface for the arena.

use crate::game::Difficulty;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tic-tac-toe arcade - play the computer, run tournaments, track progress
#[derive(Parser, Debug)]
#[command(name = "tictac_arena")]
#[command(about = "Tic-tac-toe against a difficulty-tiered computer opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file (defaults apply if absent)
    #[arg(long, default_value = "tictac_arena.toml")]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactive games against the computer
    Play {
        /// Opponent difficulty (overrides config)
        #[arg(long, value_enum)]
        difficulty: Option<Difficulty>,

        /// Progress store file (overrides config)
        #[arg(long)]
        data_path: Option<String>,
    },

    /// Run a best-of-N tournament
    Tournament {
        /// Number of rounds (overrides config)
        #[arg(long)]
        rounds: Option<u32>,

        /// Opponent difficulty (overrides config)
        #[arg(long, value_enum)]
        difficulty: Option<Difficulty>,

        /// Progress store file (overrides config)
        #[arg(long)]
        data_path: Option<String>,
    },

    /// Show the player profile and aggregate stats
    Stats {
        /// Progress store file (overrides config)
        #[arg(long)]
        data_path: Option<String>,
    },

    /// List recorded games, optionally replaying one
    History {
        /// How many recent games to list
        #[arg(long, default_value = "10")]
        limit: usize,

        /// Replay the given game (1 = most recent)
        #[arg(long)]
        replay: Option<usize>,

        /// Progress store file (overrides config)
        #[arg(long)]
        data_path: Option<String>,
    },
}
