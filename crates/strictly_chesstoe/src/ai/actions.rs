//! Legal action generation and "what if" application for lookahead.

use crate::action::Action;
use crate::position::Position;
use crate::rules::{legal_destinations, validate_placement};
use crate::state::MatchState;
use crate::types::{Phase, Player};

/// Every legal action for `player`, in a fixed order.
///
/// Placements come first: each available kind (reserve, then captured)
/// over every square in row-major order. Moves follow, outside the
/// placement phase only: each piece in row-major order, then each
/// destination in row-major order.
pub fn generate_actions(state: &MatchState, player: Player) -> Vec<Action> {
    let mut actions = Vec::new();

    for kind in state.side(player).available() {
        actions.extend(
            Position::all()
                .filter(|at| validate_placement(state, player, kind, *at).is_ok())
                .map(|at| Action::Place { kind, at }),
        );
    }

    if state.phase() != Phase::Placement {
        for (from, _) in state.board().pieces_of(player) {
            actions.extend(
                legal_destinations(state, player, from)
                    .into_iter()
                    .map(|to| Action::Move { from, to }),
            );
        }
    }

    actions
}

/// Applies `action` for `player` to an independent copy of `state`.
///
/// The copy is changed through the unchecked mutators only: no turn
/// hand-over, no status update, no history entry. The input state is untouched.
pub fn simulate(state: &MatchState, action: Action, player: Player) -> MatchState {
    let mut next = state.clone();
    apply_unchecked(&mut next, action, player);
    next
}

pub(crate) fn apply_unchecked(state: &mut MatchState, action: Action, player: Player) {
    match action {
        Action::Place { kind, at } => state.place_piece(player, kind, at),
        Action::Move { from, to } => {
            state.move_piece(from, to);
        }
    }
}

/// Copy of `state` stripped of the parts lookahead never reads.
pub(crate) fn lookahead_copy(state: &MatchState) -> MatchState {
    let mut copy = state.clone();
    copy.history.clear();
    copy.player1_name.clear();
    copy.player2_name.clear();
    copy
}

/// Returns true if `action` by `player` would capture an opponent piece.
pub fn is_capture(state: &MatchState, action: &Action, player: Player) -> bool {
    match action {
        Action::Move { to, .. } => state.board().owner_at(*to) == Some(player.opponent()),
        Action::Place { .. } => false,
    }
}
