//! Chesstoe - chess tic-tac-toe arena
//!
//! Runs computer-versus-computer matches and replays recorded action logs
//! through the rules engine.

#![warn(missing_docs)]

mod arena;
mod cli;
mod config;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use config::ArenaConfig;
use strictly_chesstoe::{MatchState, summarize};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let overrides = cli.command.overrides();

    match cli.command {
        Command::Play { config, log, .. } => {
            let arena = match config {
                Some(path) => ArenaConfig::from_file(path)?,
                None => ArenaConfig::default(),
            }
            .with_overrides(&overrides);
            run_play(&arena, log)
        }
        Command::Replay {
            log,
            player1,
            player2,
        } => run_replay(log, &player1, &player2),
    }
}

/// Plays one match and prints the result.
#[instrument(skip(arena))]
fn run_play(arena: &ArenaConfig, log: Option<std::path::PathBuf>) -> Result<()> {
    info!("Starting match");
    let state = arena::play_match(arena)?;
    if let Some(path) = log {
        arena::write_log(&state, path)?;
    }
    report(&state)
}

/// Replays a log and prints the resulting position.
#[instrument]
fn run_replay(log: std::path::PathBuf, player1: &str, player2: &str) -> Result<()> {
    let actions = arena::read_log(&log)?;
    let state = arena::replay(actions, player1, player2)?;
    report(&state)
}

fn report(state: &MatchState) -> Result<()> {
    println!("{}", state.board().display());
    println!("{}", serde_json::to_string_pretty(&summarize(state))?);
    Ok(())
}
