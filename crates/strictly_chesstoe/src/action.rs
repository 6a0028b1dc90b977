//! First-class action types for chess tic-tac-toe.
//!
//! Actions are domain events, not side effects. They represent the
//! player's intent and are validated before anything is mutated.

use crate::error::RuleError;
use crate::position::Position;
use crate::types::{PieceKind, Player};
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Something a player does on their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Action {
    /// Put a piece from the reserve or captured pool onto an empty square.
    Place {
        /// Kind of piece to place.
        kind: PieceKind,
        /// Target square.
        at: Position,
    },
    /// Move an on-board piece, capturing whatever opponent piece is at `to`.
    Move {
        /// Source square.
        from: Position,
        /// Destination square.
        to: Position,
    },
}

impl Action {
    /// Creates a placement action.
    pub fn place(kind: PieceKind, row: usize, col: usize) -> Self {
        Action::Place {
            kind,
            at: Position::new(row, col),
        }
    }

    /// Creates a movement action.
    pub fn movement(from_row: usize, from_col: usize, to_row: usize, to_col: usize) -> Self {
        Action::Move {
            from: Position::new(from_row, from_col),
            to: Position::new(to_row, to_col),
        }
    }

    /// The square this action puts a piece on.
    pub fn destination(&self) -> Position {
        match self {
            Action::Place { at, .. } => *at,
            Action::Move { to, .. } => *to,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Place { kind, at } => write!(f, "place {} at {}", kind, at),
            Action::Move { from, to } => write!(f, "move {} -> {}", from, to),
        }
    }
}

/// Action in the loose wire shape clients submit.
///
/// ```json
/// {"type": "place", "pieceType": "rook", "row": 0, "col": 0}
/// {"type": "move", "fromRow": 0, "fromCol": 0, "toRow": 1, "toCol": 0}
/// ```
///
/// Coordinates are unsigned. A negative coordinate fails to parse and is
/// reported as [`RuleError::MalformedAction`]; a non-negative coordinate
/// past the edge parses and is rejected by the rules as
/// [`RuleError::OutOfBounds`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAction {
    /// Action tag: `"place"` or `"move"`.
    #[serde(rename = "type")]
    pub action_type: String,
    /// Piece kind for placements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub piece_type: Option<PieceKind>,
    /// Target row for placements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,
    /// Target column for placements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub col: Option<usize>,
    /// Source row for moves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_row: Option<usize>,
    /// Source column for moves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_col: Option<usize>,
    /// Destination row for moves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_row: Option<usize>,
    /// Destination column for moves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_col: Option<usize>,
}

impl RawAction {
    /// Parses a raw action from JSON text.
    #[instrument(skip(json))]
    pub fn from_json(json: &str) -> Result<Self, RuleError> {
        serde_json::from_str(json).map_err(|e| RuleError::MalformedAction(e.to_string()))
    }
}

fn field(value: Option<usize>, name: &str) -> Result<usize, RuleError> {
    value.ok_or_else(|| RuleError::MalformedAction(format!("missing field `{}`", name)))
}

impl TryFrom<RawAction> for Action {
    type Error = RuleError;

    fn try_from(raw: RawAction) -> Result<Self, Self::Error> {
        match raw.action_type.as_str() {
            "place" => {
                let kind = raw
                    .piece_type
                    .ok_or_else(|| RuleError::MalformedAction("missing field `pieceType`".into()))?;
                Ok(Action::place(kind, field(raw.row, "row")?, field(raw.col, "col")?))
            }
            "move" => Ok(Action::movement(
                field(raw.from_row, "fromRow")?,
                field(raw.from_col, "fromCol")?,
                field(raw.to_row, "toRow")?,
                field(raw.to_col, "toCol")?,
            )),
            other => Err(RuleError::UnknownActionType(other.to_string())),
        }
    }
}

impl From<Action> for RawAction {
    fn from(action: Action) -> Self {
        match action {
            Action::Place { kind, at } => RawAction {
                action_type: "place".to_string(),
                piece_type: Some(kind),
                row: Some(at.row),
                col: Some(at.col),
                ..RawAction::default()
            },
            Action::Move { from, to } => RawAction {
                action_type: "move".to_string(),
                from_row: Some(from.row),
                from_col: Some(from.col),
                to_row: Some(to.row),
                to_col: Some(to.col),
                ..RawAction::default()
            },
        }
    }
}

/// One accepted action in the match log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct HistoryEntry {
    /// The action taken.
    pub action: Action,
    /// Round in which it was taken.
    pub round: u32,
    /// Player who took it.
    pub acting_player: Player,
}
