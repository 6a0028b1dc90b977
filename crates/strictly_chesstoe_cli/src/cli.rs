//! Command-line interface for chesstoe.

use crate::config::Overrides;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use strictly_chesstoe::Difficulty;

/// Chesstoe - chess tic-tac-toe arena
#[derive(Parser, Debug)]
#[command(name = "chesstoe")]
#[command(about = "Run and replay chess tic-tac-toe matches", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a match between two computer opponents
    Play {
        /// Path to arena configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Player 1 difficulty (easy, medium, hard)
        #[arg(long)]
        player1: Option<Difficulty>,

        /// Player 2 difficulty (easy, medium, hard)
        #[arg(long)]
        player2: Option<Difficulty>,

        /// Abandon the match after this many actions
        #[arg(long)]
        max_turns: Option<usize>,

        /// Random seed for reproducible play
        #[arg(long)]
        seed: Option<u64>,

        /// Hard-tier search depth
        #[arg(long)]
        depth: Option<u32>,

        /// Hard-tier time budget per decision, in milliseconds
        #[arg(long)]
        time_budget_ms: Option<u64>,

        /// Write the action log (JSON) to this file
        #[arg(short, long)]
        log: Option<PathBuf>,
    },

    /// Replay a JSON action log through the engine
    Replay {
        /// Path to the action log
        log: PathBuf,

        /// Player 1 display name
        #[arg(long, default_value = "Player 1")]
        player1: String,

        /// Player 2 display name
        #[arg(long, default_value = "Player 2")]
        player2: String,
    },
}

impl Command {
    /// Command-line values that override the arena file.
    pub fn overrides(&self) -> Overrides {
        match self {
            Command::Play {
                player1,
                player2,
                max_turns,
                seed,
                depth,
                time_budget_ms,
                ..
            } => Overrides {
                player1: *player1,
                player2: *player2,
                max_turns: *max_turns,
                seed: *seed,
                depth: *depth,
                time_budget_ms: *time_budget_ms,
            },
            Command::Replay { .. } => Overrides::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_play_flags() {
        let cli = Cli::try_parse_from([
            "chesstoe", "play", "--player1", "hard", "--seed", "4", "--depth", "3",
        ])
        .expect("valid args");
        let overrides = cli.command.overrides();
        assert_eq!(overrides.player1, Some(Difficulty::Hard));
        assert_eq!(overrides.player2, None);
        assert_eq!(overrides.seed, Some(4));
        assert_eq!(overrides.depth, Some(3));
    }

    #[test]
    fn test_unknown_difficulty_rejected() {
        let result = Cli::try_parse_from(["chesstoe", "play", "--player2", "grandmaster"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_replay() {
        let cli = Cli::try_parse_from(["chesstoe", "replay", "game.json", "--player1", "Ann"])
            .expect("valid args");
        match cli.command {
            Command::Replay { log, player1, player2 } => {
                assert_eq!(log, PathBuf::from("game.json"));
                assert_eq!(player1, "Ann");
                assert_eq!(player2, "Player 2");
            }
            Command::Play { .. } => panic!("expected replay"),
        }
    }
}
