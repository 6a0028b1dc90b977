//! Match orchestration: validate, mutate, record, judge, hand over the turn.

use crate::action::{Action, RawAction};
use crate::error::RuleError;
use crate::position::{BOARD_SIZE, Position};
use crate::rules::{check_winner, is_draw, validate_move, validate_placement};
use crate::state::MatchState;
use crate::types::{GameStatus, Phase, PieceKind, Player};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Result of submitting an action.
///
/// On rejection `state` is the submitted state, unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    /// Whether the action was accepted.
    pub ok: bool,
    /// The match after the action (or untouched, on rejection).
    pub state: MatchState,
    /// Why the action was rejected.
    pub error: Option<RuleError>,
    /// Terminal status, when this action ended the match.
    pub result: Option<GameStatus>,
}

impl ActionOutcome {
    /// Human-readable rejection reason.
    pub fn error_reason(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }
}

/// Creates a fresh match between two named players.
#[instrument(skip(player1_name, player2_name))]
pub fn create_match(player1_name: impl Into<String>, player2_name: impl Into<String>) -> MatchState {
    MatchState::new(player1_name, player2_name)
}

/// Starts a brand-new match keeping only the two display names.
#[instrument(skip(state))]
pub fn restart_match(state: &MatchState) -> MatchState {
    MatchState::new(state.name(Player::Player1), state.name(Player::Player2))
}

/// Applies `action` for the current player in place.
///
/// Validation runs before any mutation, so on `Err` the state is
/// untouched. On success returns the terminal status if the match ended.
#[instrument(level = "debug", skip(state), fields(player = %state.current_player(), round = state.round()))]
pub fn apply_action(state: &mut MatchState, action: Action) -> Result<Option<GameStatus>, RuleError> {
    if state.status().is_terminal() {
        return Err(RuleError::GameAlreadyOver);
    }

    let player = state.current_player();
    match action {
        Action::Place { kind, at } => {
            validate_placement(state, player, kind, at)?;
            state.place_piece(player, kind, at);
        }
        Action::Move { from, to } => {
            validate_move(state, player, from, to)?;
            state.move_piece(from, to);
        }
    }

    state.record_action(action);
    update_status(state);

    if state.status().is_terminal() {
        info!(status = %state.status(), rounds = state.round(), "Match finished");
    } else {
        state.advance_turn();
    }

    #[cfg(debug_assertions)]
    check_invariants(state);

    Ok(state.status().is_terminal().then_some(state.status()))
}

/// Recomputes terminal status: win first, then draw for the side about to move.
fn update_status(state: &mut MatchState) {
    if let Some((winner, line)) = check_winner(state.board()) {
        state.finish(GameStatus::won_by(winner), Some(line));
    } else if is_draw(state, state.current_player().opponent()) {
        state.finish(GameStatus::Draw, None);
    }
}

#[cfg(debug_assertions)]
fn check_invariants(state: &MatchState) {
    use crate::invariants::{ChessToeInvariants, InvariantSet};

    if let Err(violations) = ChessToeInvariants::check_all(state) {
        let descriptions = violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        tracing::error!(violations = %descriptions, "Postcondition failed");
    }
}

/// Executes `action` for the current player.
///
/// Never panics on a bad action: rejections come back in the outcome
/// with the submitted state unchanged.
#[instrument(skip(state, action), fields(action = %action))]
pub fn execute_action(mut state: MatchState, action: Action) -> ActionOutcome {
    match apply_action(&mut state, action) {
        Ok(result) => ActionOutcome {
            ok: true,
            state,
            error: None,
            result,
        },
        Err(error) => {
            debug!(%error, "Action rejected");
            ActionOutcome {
                ok: false,
                state,
                error: Some(error),
                result: None,
            }
        }
    }
}

/// Executes an action in its wire form.
#[instrument(skip(state, raw), fields(action_type = %raw.action_type))]
pub fn execute_raw(state: MatchState, raw: RawAction) -> ActionOutcome {
    if state.status().is_terminal() {
        return ActionOutcome {
            ok: false,
            state,
            error: Some(RuleError::GameAlreadyOver),
            result: None,
        };
    }
    match Action::try_from(raw) {
        Ok(action) => execute_action(state, action),
        Err(error) => {
            debug!(%error, "Raw action rejected");
            ActionOutcome {
                ok: false,
                state,
                error: Some(error),
                result: None,
            }
        }
    }
}

/// Per-player portion of a [`MatchSummary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideSummary {
    /// Display name.
    pub name: String,
    /// Kinds not yet placed.
    pub reserve: Vec<PieceKind>,
    /// Kinds captured and awaiting re-placement.
    pub captured: Vec<PieceKind>,
    /// Size of the reserve.
    pub reserve_count: usize,
    /// Size of the captured pool.
    pub captured_count: usize,
    /// Pieces on the board.
    pub on_board_count: usize,
}

/// Display-oriented snapshot of a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    /// Player to act.
    pub current_player: Player,
    /// Current phase.
    pub phase: Phase,
    /// Current round.
    pub round: u32,
    /// Match status.
    pub status: GameStatus,
    /// Winner, if any.
    pub winner: Option<Player>,
    /// Completed line, if any.
    pub winning_line: Option<[Position; BOARD_SIZE]>,
    /// Player 1's side.
    pub player1: SideSummary,
    /// Player 2's side.
    pub player2: SideSummary,
}

/// Summarizes a match for display.
pub fn summarize(state: &MatchState) -> MatchSummary {
    let side = |player: Player| {
        let pools = state.side(player);
        SideSummary {
            name: state.name(player).to_string(),
            reserve: pools.reserve().clone(),
            captured: pools.captured().clone(),
            reserve_count: pools.reserve().len(),
            captured_count: pools.captured().len(),
            on_board_count: state.board().count(player),
        }
    };
    MatchSummary {
        current_player: state.current_player(),
        phase: state.phase(),
        round: state.round(),
        status: state.status(),
        winner: state.winner(),
        winning_line: state.winning_line().copied(),
        player1: side(Player::Player1),
        player2: side(Player::Player2),
    }
}
