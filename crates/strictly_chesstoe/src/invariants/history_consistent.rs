//! History consistency invariant: the log matches the turn order.

use super::Invariant;
use crate::state::MatchState;
use crate::types::Player;

/// Invariant: history entries alternate players starting with Player 1,
/// each stamped with its round, and the side to move follows the last entry.
pub struct HistoryConsistentInvariant;

fn expected_actor(index: usize) -> Player {
    if index % 2 == 0 {
        Player::Player1
    } else {
        Player::Player2
    }
}

impl Invariant<MatchState> for HistoryConsistentInvariant {
    fn holds(state: &MatchState) -> bool {
        let history = state.history();

        let entries_ok = history.iter().enumerate().all(|(i, entry)| {
            entry.acting_player == expected_actor(i) && entry.round as usize == i / 2 + 1
        });
        if !entries_ok {
            return false;
        }

        // A finished match keeps the final actor as current player.
        if state.status().is_terminal() {
            history
                .last()
                .is_none_or(|entry| entry.acting_player == state.current_player())
        } else {
            state.current_player() == expected_actor(history.len())
        }
    }

    fn description() -> &'static str {
        "History alternates players by round and matches the side to move"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;
    use crate::{Action, execute_action};

    #[test]
    fn test_engine_history_holds() {
        let mut state = MatchState::default();
        for action in [
            Action::place(PieceKind::Knight, 1, 1),
            Action::place(PieceKind::Knight, 2, 2),
        ] {
            state = execute_action(state, action).state;
            assert!(HistoryConsistentInvariant::holds(&state));
        }
    }

    #[test]
    fn test_double_turn_violates() {
        let mut state = MatchState::default();
        state.record_action(Action::place(PieceKind::Rook, 0, 0));
        state.record_action(Action::place(PieceKind::Pawn, 0, 1));
        assert!(!HistoryConsistentInvariant::holds(&state));
    }
}
