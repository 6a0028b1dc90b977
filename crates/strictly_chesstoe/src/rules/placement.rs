//! Placement legality.
//!
//! Placement is legal in both phases; only the square and the
//! availability of the piece matter.

use crate::error::RuleError;
use crate::position::Position;
use crate::state::MatchState;
use crate::types::{PieceKind, Player};
use tracing::instrument;

/// Precondition: the position lies on the board.
pub struct InBounds;

impl InBounds {
    /// Checks that `pos` is on the board.
    pub fn check(pos: Position) -> Result<(), RuleError> {
        if pos.in_bounds() {
            Ok(())
        } else {
            Err(RuleError::OutOfBounds(pos))
        }
    }
}

/// Precondition: the target square holds no piece.
pub struct SquareIsEmpty;

impl SquareIsEmpty {
    /// Checks that `pos` is empty.
    pub fn check(state: &MatchState, pos: Position) -> Result<(), RuleError> {
        if state.board().is_empty(pos) {
            Ok(())
        } else {
            Err(RuleError::SquareOccupied(pos))
        }
    }
}

/// Precondition: the kind is in the player's reserve or captured pool.
pub struct PieceAvailable;

impl PieceAvailable {
    /// Checks that `player` can place `kind`.
    pub fn check(state: &MatchState, player: Player, kind: PieceKind) -> Result<(), RuleError> {
        if state.side(player).has_available(kind) {
            Ok(())
        } else {
            Err(RuleError::PieceUnavailable(kind))
        }
    }
}

/// Validates a placement of `kind` at `at` by `player`.
#[instrument(level = "trace", skip(state))]
pub fn validate_placement(
    state: &MatchState,
    player: Player,
    kind: PieceKind,
    at: Position,
) -> Result<(), RuleError> {
    InBounds::check(at)?;
    SquareIsEmpty::check(state, at)?;
    PieceAvailable::check(state, player, kind)?;
    Ok(())
}

/// Every square where `player` may place `kind`, in row-major order.
pub fn legal_placements(state: &MatchState, player: Player, kind: PieceKind) -> Vec<Position> {
    Position::all()
        .filter(|pos| validate_placement(state, player, kind, *pos).is_ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PlayerSide;

    #[test]
    fn test_fresh_match_allows_any_square() {
        let state = MatchState::default();
        assert_eq!(legal_placements(&state, Player::Player1, PieceKind::Knight).len(), 16);
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let state = MatchState::default();
        assert_eq!(
            validate_placement(&state, Player::Player1, PieceKind::Rook, Position::new(4, 0)),
            Err(RuleError::OutOfBounds(Position::new(4, 0)))
        );
    }

    #[test]
    fn test_occupied_square_rejected() {
        let mut state = MatchState::default();
        state.place_piece(Player::Player2, PieceKind::Rook, Position::new(2, 2));
        assert_eq!(
            validate_placement(&state, Player::Player1, PieceKind::Rook, Position::new(2, 2)),
            Err(RuleError::SquareOccupied(Position::new(2, 2)))
        );
    }

    #[test]
    fn test_unavailable_piece_rejected() {
        let mut state = MatchState::default();
        state.place_piece(Player::Player1, PieceKind::Bishop, Position::new(0, 0));
        assert_eq!(
            validate_placement(&state, Player::Player1, PieceKind::Bishop, Position::new(1, 1)),
            Err(RuleError::PieceUnavailable(PieceKind::Bishop))
        );
    }

    #[test]
    fn test_captured_piece_can_be_replaced() {
        let mut state = MatchState::default();
        state.player1 = PlayerSide::from_pools(vec![], vec![PieceKind::Pawn]);
        assert!(
            validate_placement(&state, Player::Player1, PieceKind::Pawn, Position::new(1, 1))
                .is_ok()
        );
    }
}
