//! Core domain types for chess tic-tac-toe.

use crate::position::{BOARD_SIZE, Position};
use serde::{Deserialize, Serialize};

/// Player in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    /// Player 1 (moves first, home edge is row 0).
    #[display("Player 1")]
    Player1,
    /// Player 2 (home edge is the last row).
    #[display("Player 2")]
    Player2,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::Player1 => Player::Player2,
            Player::Player2 => Player::Player1,
        }
    }

    /// Facing given to a freshly placed pawn of this player.
    pub fn home_facing(self) -> Facing {
        match self {
            Player::Player1 => Facing::Ascending,
            Player::Player2 => Facing::Descending,
        }
    }
}

/// The four piece kinds each player owns exactly one of.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    /// Steps forward, captures forward-diagonally, turns around at the far edge.
    #[display("pawn")]
    Pawn,
    /// Slides along a row or column.
    #[display("rook")]
    Rook,
    /// Jumps in an L-shape.
    #[display("knight")]
    Knight,
    /// Slides along a diagonal.
    #[display("bishop")]
    Bishop,
}

impl PieceKind {
    /// The starting reserve, in generation order.
    pub const ALL: [PieceKind; 4] = [
        PieceKind::Pawn,
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
    ];

    fn symbol(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Rook => 'R',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
        }
    }
}

/// Forward direction of a pawn along the row axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    /// Toward higher row indices (+1).
    Ascending,
    /// Toward lower row indices (-1).
    Descending,
}

impl Facing {
    /// Row delta of one forward step.
    pub fn sign(self) -> isize {
        match self {
            Facing::Ascending => 1,
            Facing::Descending => -1,
        }
    }

    /// The opposite facing.
    pub fn flipped(self) -> Self {
        match self {
            Facing::Ascending => Facing::Descending,
            Facing::Descending => Facing::Ascending,
        }
    }

    /// The row a pawn with this facing is heading toward.
    pub fn far_edge(self) -> usize {
        match self {
            Facing::Ascending => BOARD_SIZE - 1,
            Facing::Descending => 0,
        }
    }
}

/// A piece on the board. Its position is the cell that holds it.
///
/// `facing` is `Some` exactly when `kind` is [`PieceKind::Pawn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    /// Kind of piece.
    pub kind: PieceKind,
    /// Owning player.
    pub owner: Player,
    /// Pawn direction, tracked because it flips at the far edge.
    pub facing: Option<Facing>,
}

impl Piece {
    /// Creates a piece; pawns start facing away from their owner's home edge.
    pub fn new(kind: PieceKind, owner: Player) -> Self {
        let facing = (kind == PieceKind::Pawn).then(|| owner.home_facing());
        Self { kind, owner, facing }
    }
}

/// 4x4 board. Each cell holds at most one piece.
///
/// The board is the single owner of every live piece; a player's
/// "on-board" pieces are the filtered view returned by [`Board::pieces_of`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the piece at a position. Out-of-bounds positions read as empty.
    pub fn get(&self, pos: Position) -> Option<Piece> {
        self.cells.get(pos.row)?.get(pos.col).copied().flatten()
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos).is_none()
    }

    /// Returns the owner of the piece at `pos`, if any.
    pub fn owner_at(&self, pos: Position) -> Option<Player> {
        self.get(pos).map(|piece| piece.owner)
    }

    /// Writes a cell. Callers guarantee `pos` is in bounds.
    pub(crate) fn set(&mut self, pos: Position, piece: Option<Piece>) {
        self.cells[pos.row][pos.col] = piece;
    }

    /// Removes and returns the piece at `pos`.
    pub(crate) fn take(&mut self, pos: Position) -> Option<Piece> {
        self.cells[pos.row][pos.col].take()
    }

    /// Iterates a player's pieces in row-major order.
    pub fn pieces_of(&self, player: Player) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::all().filter_map(move |pos| {
            self.get(pos)
                .filter(|piece| piece.owner == player)
                .map(|piece| (pos, piece))
        })
    }

    /// Number of pieces a player has on the board.
    pub fn count(&self, player: Player) -> usize {
        self.pieces_of(player).count()
    }

    /// Formats the board as a human-readable grid.
    ///
    /// Player 1 pieces are uppercase, Player 2 pieces lowercase.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let symbol = match self.get(Position::new(row, col)) {
                    None => '.',
                    Some(piece) if piece.owner == Player::Player1 => piece.kind.symbol(),
                    Some(piece) => piece.kind.symbol().to_ascii_lowercase(),
                };
                result.push(symbol);
                if col < BOARD_SIZE - 1 {
                    result.push(' ');
                }
            }
            if row < BOARD_SIZE - 1 {
                result.push('\n');
            }
        }
        result
    }
}

/// Which actions a round permits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Rounds 1-3: placement only.
    #[display("placement")]
    Placement,
    /// Round 4 onward: placement or movement.
    #[display("strategy")]
    Strategy,
}

/// Current status of the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    /// Match is ongoing.
    #[display("in progress")]
    InProgress,
    /// Player 1 completed a line.
    #[display("Player 1 won")]
    Player1Won,
    /// Player 2 completed a line.
    #[display("Player 2 won")]
    Player2Won,
    /// The side to move had no legal action.
    #[display("draw")]
    Draw,
}

impl GameStatus {
    /// Status for a win by `player`.
    pub fn won_by(player: Player) -> Self {
        match player {
            Player::Player1 => GameStatus::Player1Won,
            Player::Player2 => GameStatus::Player2Won,
        }
    }

    /// Returns true once the match can accept no further actions.
    pub fn is_terminal(self) -> bool {
        self != GameStatus::InProgress
    }
}
