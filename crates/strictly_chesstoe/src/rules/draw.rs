//! Draw detection logic for chess tic-tac-toe.

use super::movement::legal_destinations;
use super::placement::legal_placements;
use super::win::find_winning_line;
use crate::state::MatchState;
use crate::types::Player;
use tracing::instrument;

/// Returns true if `player` has at least one legal placement or move.
#[instrument(level = "trace", skip(state))]
pub fn has_legal_action(state: &MatchState, player: Player) -> bool {
    let can_place = state
        .side(player)
        .available()
        .into_iter()
        .any(|kind| !legal_placements(state, player, kind).is_empty());
    if can_place {
        return true;
    }

    state
        .board()
        .pieces_of(player)
        .any(|(pos, _)| !legal_destinations(state, player, pos).is_empty())
}

/// A draw: nobody holds a line and `to_move` has no legal action.
pub fn is_draw(state: &MatchState, to_move: Player) -> bool {
    find_winning_line(state.board()).is_none() && !has_legal_action(state, to_move)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;
    use crate::state::PlayerSide;
    use crate::types::{Phase, PieceKind};

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    /// Player 2 holds only a pawn that is blocked head-on, with empty pools.
    fn stuck_player2() -> MatchState {
        let mut state = MatchState::default();
        state.phase = Phase::Strategy;
        state.round = 4;
        state.place_piece(Player::Player1, PieceKind::Rook, pos(0, 0));
        state.place_piece(Player::Player2, PieceKind::Pawn, pos(1, 0));
        state.player2 = PlayerSide::from_pools(vec![], vec![]);
        state
    }

    #[test]
    fn test_fresh_match_has_actions() {
        let state = MatchState::default();
        assert!(has_legal_action(&state, Player::Player1));
        assert!(!is_draw(&state, Player::Player1));
    }

    #[test]
    fn test_blocked_side_without_pools_is_draw() {
        let state = stuck_player2();
        assert!(!has_legal_action(&state, Player::Player2));
        assert!(is_draw(&state, Player::Player2));
        assert!(!is_draw(&state, Player::Player1));
    }

    #[test]
    fn test_captured_pool_prevents_draw() {
        let mut state = stuck_player2();
        state.player2 = PlayerSide::from_pools(vec![], vec![PieceKind::Knight]);
        assert!(has_legal_action(&state, Player::Player2));
    }

    #[test]
    fn test_diagonal_capture_prevents_draw() {
        let mut state = stuck_player2();
        state.place_piece(Player::Player1, PieceKind::Knight, pos(0, 1));
        assert!(has_legal_action(&state, Player::Player2));
    }
}
