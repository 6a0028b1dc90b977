//! Rejection reasons for actions.
//!
//! Every variant is recoverable: a rejected action leaves the match
//! untouched and the caller re-prompts the acting player.

use crate::position::Position;
use crate::types::PieceKind;

/// Why a piece cannot make a particular move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum MovementViolation {
    /// Pawn stepped straight forward onto an occupied square.
    #[display("Pawn cannot move to occupied square")]
    PawnForwardBlocked,
    /// Pawn stepped diagonally onto a square without an opponent piece.
    #[display("Pawn can only move diagonally to capture")]
    PawnDiagonalWithoutCapture,
    /// Pawn tried anything other than one forward step.
    #[display("Invalid pawn movement")]
    PawnInvalid,
    /// Rook left its row and column.
    #[display("Rook must move in straight line")]
    RookNotStraight,
    /// Knight offset was not (2,1) or (1,2).
    #[display("Invalid knight movement")]
    KnightNotLShape,
    /// Bishop offset was not diagonal.
    #[display("Bishop must move diagonally")]
    BishopNotDiagonal,
}

/// Error that can occur when validating or applying an action.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum RuleError {
    /// A position lies off the board.
    #[display("Position {} out of bounds", _0)]
    OutOfBounds(Position),

    /// The placement target already holds a piece.
    #[display("Square {} is occupied", _0)]
    SquareOccupied(Position),

    /// The kind is in neither the reserve nor the captured pool.
    #[display("Piece {} not available", _0)]
    PieceUnavailable(PieceKind),

    /// Movement was attempted during the placement phase.
    #[display("Cannot move during placement phase")]
    WrongPhaseForMove,

    /// The move's source square is empty.
    #[display("No piece at source position {}", _0)]
    EmptySource(Position),

    /// The move's source square holds an opponent piece.
    #[display("Cannot move opponent's piece at {}", _0)]
    NotOwnPiece(Position),

    /// The destination holds one of the mover's own pieces.
    #[display("Cannot capture own piece at {}", _0)]
    OwnPieceCaptureAttempt(Position),

    /// The piece does not move that way.
    #[display("{}", _0)]
    IllegalPieceMovement(MovementViolation),

    /// A sliding piece's path crosses an occupied square.
    #[display("Path is blocked")]
    BlockedPath,

    /// The match has already ended.
    #[display("Game is already over")]
    GameAlreadyOver,

    /// A wire action carried an unrecognised tag.
    #[display("Invalid action type: {}", _0)]
    UnknownActionType(String),

    /// A wire action could not be decoded.
    #[display("Malformed action: {}", _0)]
    MalformedAction(String),
}

impl std::error::Error for RuleError {}
