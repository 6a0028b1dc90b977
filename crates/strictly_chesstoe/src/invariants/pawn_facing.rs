//! Pawn facing invariant: pawns, and only pawns, carry a facing.

use super::Invariant;
use crate::position::Position;
use crate::state::MatchState;
use crate::types::PieceKind;

/// Invariant: every pawn on the board has a facing; no other piece has one.
pub struct PawnFacingInvariant;

impl Invariant<MatchState> for PawnFacingInvariant {
    fn holds(state: &MatchState) -> bool {
        Position::all()
            .filter_map(|pos| state.board().get(pos))
            .all(|piece| piece.facing.is_some() == (piece.kind == PieceKind::Pawn))
    }

    fn description() -> &'static str {
        "Every pawn has exactly one facing and no other piece has one"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Facing, Piece, Player};

    #[test]
    fn test_placed_pawn_holds() {
        let mut state = MatchState::default();
        state.place_piece(Player::Player1, PieceKind::Pawn, Position::new(0, 0));
        assert!(PawnFacingInvariant::holds(&state));
    }

    #[test]
    fn test_rook_with_facing_violates() {
        let mut state = MatchState::default();
        let mut rook = Piece::new(PieceKind::Rook, Player::Player1);
        rook.facing = Some(Facing::Ascending);
        state.board.set(Position::new(2, 2), Some(rook));
        assert!(!PawnFacingInvariant::holds(&state));
    }
}
