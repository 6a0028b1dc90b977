//! Drives matches through the engine: AI self-play and log replay.

use crate::config::ArenaConfig;
use anyhow::{Context, Result, bail};
use std::path::Path;
use strictly_chesstoe::{
    AiEngine, MatchState, Player, RawAction, create_match, execute_action, execute_raw,
};
use tracing::{debug, info, instrument, warn};

/// Plays a full match between the two configured seats.
///
/// Stops at a terminal status, when the side to move has no action, or
/// after `max_turns` actions.
#[instrument(skip(config), fields(
    player1 = %config.player1().difficulty(),
    player2 = %config.player2().difficulty()
))]
pub fn play_match(config: &ArenaConfig) -> Result<MatchState> {
    let mut engine = match config.seed() {
        Some(seed) => AiEngine::seeded(*seed, config.search().clone()),
        None => AiEngine::new(config.search().clone()),
    };
    let mut state = create_match(config.player1().name(), config.player2().name());

    for turn in 0..*config.max_turns() {
        let player = state.current_player();
        let seat = match player {
            Player::Player1 => config.player1(),
            Player::Player2 => config.player2(),
        };

        let Some(action) = engine.choose(&state, player, *seat.difficulty()) else {
            warn!(player = %player, "No legal action available");
            break;
        };

        let outcome = execute_action(state, action);
        if let Some(error) = outcome.error {
            bail!("{} chose a rejected action {}: {}", seat.name(), action, error);
        }
        state = outcome.state;
        debug!(turn, player = %player, %action, "\n{}", state.board().display());

        if let Some(result) = outcome.result {
            info!(%result, turns = turn + 1, "Match over");
            return Ok(state);
        }
    }

    if !state.status().is_terminal() {
        info!(rounds = state.round(), "Match abandoned without a result");
    }
    Ok(state)
}

/// Reads a JSON array of wire actions.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn read_log(path: impl AsRef<Path>) -> Result<Vec<RawAction>> {
    let content = std::fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read action log {}", path.as_ref().display()))?;
    let actions: Vec<RawAction> =
        serde_json::from_str(&content).context("Action log is not a JSON array of actions")?;
    debug!(count = actions.len(), "Action log loaded");
    Ok(actions)
}

/// Writes the accepted actions of `state` as a JSON array of wire actions.
#[instrument(skip(state, path), fields(path = %path.as_ref().display()))]
pub fn write_log(state: &MatchState, path: impl AsRef<Path>) -> Result<()> {
    let actions: Vec<RawAction> = state
        .history()
        .iter()
        .map(|entry| RawAction::from(entry.action))
        .collect();
    let json = serde_json::to_string_pretty(&actions)?;
    std::fs::write(path.as_ref(), json)
        .with_context(|| format!("Failed to write action log {}", path.as_ref().display()))?;
    info!(count = actions.len(), "Action log written");
    Ok(())
}

/// Replays `actions` from a fresh match, failing on the first rejection.
#[instrument(skip(actions, player1, player2), fields(count = actions.len()))]
pub fn replay(actions: Vec<RawAction>, player1: &str, player2: &str) -> Result<MatchState> {
    let mut state = create_match(player1, player2);
    for (index, raw) in actions.into_iter().enumerate() {
        let outcome = execute_raw(state, raw);
        if let Some(error) = outcome.error {
            bail!("Action {} rejected: {}", index + 1, error);
        }
        state = outcome.state;
    }
    Ok(state)
}
