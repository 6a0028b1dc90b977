//! Conservation invariant: every piece is somewhere, exactly once.

use super::Invariant;
use crate::state::MatchState;
use crate::types::{PieceKind, Player};

/// Invariant: each player's four kinds are each in exactly one place.
///
/// For every player and kind, reserve + captured + on-board count is 1.
/// Capture moves a piece between places; nothing is created or destroyed.
pub struct PieceConservationInvariant;

impl Invariant<MatchState> for PieceConservationInvariant {
    fn holds(state: &MatchState) -> bool {
        [Player::Player1, Player::Player2].into_iter().all(|player| {
            let side = state.side(player);
            PieceKind::ALL.into_iter().all(|kind| {
                let pooled = side.reserve().iter().chain(side.captured()).filter(|k| **k == kind).count();
                let on_board = state
                    .board()
                    .pieces_of(player)
                    .filter(|(_, piece)| piece.kind == kind)
                    .count();
                pooled + on_board == 1
            })
        })
    }

    fn description() -> &'static str {
        "Each player's four piece kinds are each in exactly one of reserve, captured, or board"
    }
}
