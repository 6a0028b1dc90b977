//! Match state and the unchecked mutators that change it.
//!
//! Mutators assume the action was already validated. Use
//! [`crate::execute_action`] for checked application.

use crate::action::{Action, HistoryEntry};
use crate::position::{BOARD_SIZE, Position};
use crate::types::{Board, Facing, GameStatus, Phase, Piece, PieceKind, Player};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// First round of the strategy phase.
pub const STRATEGY_ROUND: u32 = 4;

/// Off-board piece pools of one player.
///
/// Each of the four kinds is, at any time, in exactly one of: the
/// reserve, the captured pool, or on the board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct PlayerSide {
    /// Kinds not yet placed this match.
    reserve: Vec<PieceKind>,
    /// Kinds captured from this player, available to re-place.
    captured: Vec<PieceKind>,
}

impl PlayerSide {
    /// Creates a side holding one of each kind in reserve.
    pub fn new() -> Self {
        Self {
            reserve: PieceKind::ALL.to_vec(),
            captured: Vec::new(),
        }
    }

    /// Returns true if `kind` can be placed from either pool.
    pub fn has_available(&self, kind: PieceKind) -> bool {
        self.reserve.contains(&kind) || self.captured.contains(&kind)
    }

    /// Placeable kinds: reserve first, then captured, without duplicates.
    pub fn available(&self) -> Vec<PieceKind> {
        let mut kinds = self.reserve.clone();
        for kind in &self.captured {
            if !kinds.contains(kind) {
                kinds.push(*kind);
            }
        }
        kinds
    }

    /// Removes `kind` from the reserve if present, else from the captured pool.
    pub(crate) fn take(&mut self, kind: PieceKind) {
        if let Some(idx) = self.reserve.iter().position(|k| *k == kind) {
            self.reserve.remove(idx);
        } else if let Some(idx) = self.captured.iter().position(|k| *k == kind) {
            self.captured.remove(idx);
        }
    }

    pub(crate) fn return_captured(&mut self, kind: PieceKind) {
        self.captured.push(kind);
    }

    #[cfg(test)]
    pub(crate) fn from_pools(reserve: Vec<PieceKind>, captured: Vec<PieceKind>) -> Self {
        Self { reserve, captured }
    }
}

impl Default for PlayerSide {
    fn default() -> Self {
        Self::new()
    }
}

/// Complete match state.
///
/// Created by [`crate::create_match`] and changed only through
/// [`crate::execute_action`]; everything else treats it as an opaque value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub(crate) board: Board,
    pub(crate) current_player: Player,
    pub(crate) phase: Phase,
    pub(crate) round: u32,
    pub(crate) status: GameStatus,
    pub(crate) winner: Option<Player>,
    pub(crate) winning_line: Option<[Position; BOARD_SIZE]>,
    pub(crate) history: Vec<HistoryEntry>,
    pub(crate) player1: PlayerSide,
    pub(crate) player2: PlayerSide,
    pub(crate) player1_name: String,
    pub(crate) player2_name: String,
}

impl MatchState {
    /// Creates a fresh match: empty board, full reserves, round 1, placement phase.
    #[instrument(skip(player1_name, player2_name))]
    pub fn new(player1_name: impl Into<String>, player2_name: impl Into<String>) -> Self {
        Self {
            board: Board::new(),
            current_player: Player::Player1,
            phase: Phase::Placement,
            round: 1,
            status: GameStatus::InProgress,
            winner: None,
            winning_line: None,
            history: Vec::new(),
            player1: PlayerSide::new(),
            player2: PlayerSide::new(),
            player1_name: player1_name.into(),
            player2_name: player2_name.into(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player to act.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Returns the phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the round, starting at 1.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Returns the match status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the winner, if any.
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Returns the completed line, if the match was won.
    pub fn winning_line(&self) -> Option<&[Position; BOARD_SIZE]> {
        self.winning_line.as_ref()
    }

    /// Returns the action log.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Returns a player's off-board pools.
    pub fn side(&self, player: Player) -> &PlayerSide {
        match player {
            Player::Player1 => &self.player1,
            Player::Player2 => &self.player2,
        }
    }

    pub(crate) fn side_mut(&mut self, player: Player) -> &mut PlayerSide {
        match player {
            Player::Player1 => &mut self.player1,
            Player::Player2 => &mut self.player2,
        }
    }

    /// Returns a player's display name.
    pub fn name(&self, player: Player) -> &str {
        match player {
            Player::Player1 => &self.player1_name,
            Player::Player2 => &self.player2_name,
        }
    }

    /// Facing of each of a player's pawns, keyed by position.
    pub fn pawn_facing(&self, player: Player) -> BTreeMap<Position, Facing> {
        self.board
            .pieces_of(player)
            .filter_map(|(pos, piece)| piece.facing.map(|facing| (pos, facing)))
            .collect()
    }

    /// Puts `kind` on `at` for `player`, drawing it from the reserve first.
    pub(crate) fn place_piece(&mut self, player: Player, kind: PieceKind, at: Position) {
        self.side_mut(player).take(kind);
        self.board.set(at, Some(Piece::new(kind, player)));
    }

    /// Moves the piece at `from` to `to`, capturing any opponent piece there.
    ///
    /// A captured piece returns to its owner's captured pool. A pawn that
    /// reaches the far edge in its facing direction turns around.
    /// Returns the captured piece. Does nothing if `from` is empty.
    pub(crate) fn move_piece(&mut self, from: Position, to: Position) -> Option<Piece> {
        let mut piece = self.board.take(from)?;

        let captured = match self.board.get(to) {
            Some(target) if target.owner != piece.owner => self.board.take(to),
            _ => None,
        };
        if let Some(target) = captured {
            debug!(kind = %target.kind, owner = %target.owner, at = %to, "Piece captured");
            self.side_mut(target.owner).return_captured(target.kind);
        }

        if let Some(facing) = piece.facing
            && to.row == facing.far_edge()
        {
            piece.facing = Some(facing.flipped());
        }

        self.board.set(to, Some(piece));
        captured
    }

    /// Hands control to the opponent, advancing round and phase.
    pub(crate) fn advance_turn(&mut self) {
        self.current_player = self.current_player.opponent();
        if self.current_player == Player::Player1 {
            self.round += 1;
        }
        if self.round >= STRATEGY_ROUND && self.phase == Phase::Placement {
            debug!(round = self.round, "Entering strategy phase");
            self.phase = Phase::Strategy;
        }
    }

    /// Appends `action` to the log under the current round and player.
    pub(crate) fn record_action(&mut self, action: Action) {
        self.history
            .push(HistoryEntry::new(action, self.round, self.current_player));
    }

    pub(crate) fn finish(&mut self, status: GameStatus, line: Option<[Position; BOARD_SIZE]>) {
        self.status = status;
        self.winner = match status {
            GameStatus::Player1Won => Some(Player::Player1),
            GameStatus::Player2Won => Some(Player::Player2),
            GameStatus::InProgress | GameStatus::Draw => None,
        };
        self.winning_line = line;
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new("Player 1", "Player 2")
    }
}
