//! Movement legality, per piece kind.

use super::placement::InBounds;
use crate::error::{MovementViolation, RuleError};
use crate::position::Position;
use crate::state::MatchState;
use crate::types::{Board, Phase, Piece, PieceKind, Player};
use tracing::instrument;

/// Validates moving `player`'s piece from `from` to `to`.
///
/// Checks, in order: phase, bounds, source ownership, destination not
/// own piece, then the piece's own movement rule.
#[instrument(level = "trace", skip(state))]
pub fn validate_move(
    state: &MatchState,
    player: Player,
    from: Position,
    to: Position,
) -> Result<(), RuleError> {
    if state.phase() == Phase::Placement {
        return Err(RuleError::WrongPhaseForMove);
    }
    InBounds::check(from)?;
    InBounds::check(to)?;

    let board = state.board();
    let piece = board.get(from).ok_or(RuleError::EmptySource(from))?;
    if piece.owner != player {
        return Err(RuleError::NotOwnPiece(from));
    }
    if board.owner_at(to) == Some(player) {
        return Err(RuleError::OwnPieceCaptureAttempt(to));
    }

    validate_piece_movement(board, piece, from, to)
}

/// Applies the movement rule of `piece` to the step `from -> to`.
///
/// Ownership and bounds are assumed checked.
pub fn validate_piece_movement(
    board: &Board,
    piece: Piece,
    from: Position,
    to: Position,
) -> Result<(), RuleError> {
    let d_row = to.row as isize - from.row as isize;
    let d_col = to.col as isize - from.col as isize;

    match piece.kind {
        PieceKind::Pawn => {
            let forward = piece.facing.unwrap_or_else(|| piece.owner.home_facing()).sign();
            if d_row != forward {
                return Err(RuleError::IllegalPieceMovement(MovementViolation::PawnInvalid));
            }
            match d_col.abs() {
                0 if board.is_empty(to) => Ok(()),
                0 => Err(RuleError::IllegalPieceMovement(
                    MovementViolation::PawnForwardBlocked,
                )),
                1 if board.owner_at(to) == Some(piece.owner.opponent()) => Ok(()),
                1 => Err(RuleError::IllegalPieceMovement(
                    MovementViolation::PawnDiagonalWithoutCapture,
                )),
                _ => Err(RuleError::IllegalPieceMovement(MovementViolation::PawnInvalid)),
            }
        }
        PieceKind::Rook => {
            if d_row != 0 && d_col != 0 {
                return Err(RuleError::IllegalPieceMovement(
                    MovementViolation::RookNotStraight,
                ));
            }
            ensure_path_clear(board, from, to)
        }
        PieceKind::Knight => {
            let (r, c) = (d_row.abs(), d_col.abs());
            if (r == 2 && c == 1) || (r == 1 && c == 2) {
                Ok(())
            } else {
                Err(RuleError::IllegalPieceMovement(
                    MovementViolation::KnightNotLShape,
                ))
            }
        }
        PieceKind::Bishop => {
            if d_row.abs() != d_col.abs() {
                return Err(RuleError::IllegalPieceMovement(
                    MovementViolation::BishopNotDiagonal,
                ));
            }
            ensure_path_clear(board, from, to)
        }
    }
}

fn ensure_path_clear(board: &Board, from: Position, to: Position) -> Result<(), RuleError> {
    if is_path_clear(board, from, to) {
        Ok(())
    } else {
        Err(RuleError::BlockedPath)
    }
}

/// Returns true if every square strictly between `from` and `to` is empty.
///
/// Walks the unit step from `from` toward `to`; meaningful only for
/// straight or diagonal pairs.
pub fn is_path_clear(board: &Board, from: Position, to: Position) -> bool {
    let step_row = (to.row as isize - from.row as isize).signum();
    let step_col = (to.col as isize - from.col as isize).signum();

    let mut current = from;
    loop {
        current = match current.offset(step_row, step_col) {
            Some(next) => next,
            None => return true,
        };
        if current == to {
            return true;
        }
        if !board.is_empty(current) {
            return false;
        }
    }
}

/// Every square `player`'s piece at `from` may move to, in row-major order.
pub fn legal_destinations(state: &MatchState, player: Player, from: Position) -> Vec<Position> {
    if state.board().owner_at(from) != Some(player) {
        return Vec::new();
    }
    Position::all()
        .filter(|to| validate_move(state, player, from, *to).is_ok())
        .collect()
}
