//! Win detection logic for chess tic-tac-toe.

use crate::position::{BOARD_SIZE, LINES, Position};
use crate::types::{Board, Player};
use tracing::instrument;

/// Finds the first line fully held by one player.
///
/// Lines are scanned rows first, then columns, then the main diagonal,
/// then the anti-diagonal. Only full-length lines count.
pub fn find_winning_line(board: &Board) -> Option<[Position; BOARD_SIZE]> {
    LINES.iter().copied().find(|line| {
        let Some(owner) = board.owner_at(line[0]) else {
            return false;
        };
        line[1..].iter().all(|pos| board.owner_at(*pos) == Some(owner))
    })
}

/// Checks if there is a winner on the board.
///
/// Returns the winner together with the completed line.
#[instrument(level = "trace", skip(board))]
pub fn check_winner(board: &Board) -> Option<(Player, [Position; BOARD_SIZE])> {
    let line = find_winning_line(board)?;
    let winner = board.owner_at(line[0])?;
    Some((winner, line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Piece, PieceKind};

    fn fill(board: &mut Board, player: Player, cells: &[(usize, usize)]) {
        for (kind, (row, col)) in PieceKind::ALL.iter().cycle().zip(cells) {
            board.set(Position::new(*row, *col), Some(Piece::new(*kind, player)));
        }
    }

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(check_winner(&Board::new()), None);
    }

    #[test]
    fn test_winner_column() {
        let mut board = Board::new();
        fill(&mut board, Player::Player2, &[(0, 2), (1, 2), (2, 2), (3, 2)]);
        let (winner, line) = check_winner(&board).expect("column is full");
        assert_eq!(winner, Player::Player2);
        assert_eq!(line[0], Position::new(0, 2));
        assert_eq!(line[3], Position::new(3, 2));
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let mut board = Board::new();
        fill(&mut board, Player::Player1, &[(0, 3), (1, 2), (2, 1), (3, 0)]);
        assert_eq!(check_winner(&board).map(|(p, _)| p), Some(Player::Player1));
    }

    #[test]
    fn test_three_in_a_row_is_not_a_win() {
        let mut board = Board::new();
        fill(&mut board, Player::Player1, &[(1, 0), (1, 1), (1, 2)]);
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let mut board = Board::new();
        fill(&mut board, Player::Player1, &[(2, 0), (2, 1), (2, 2)]);
        fill(&mut board, Player::Player2, &[(2, 3)]);
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_rows_reported_before_columns() {
        let mut board = Board::new();
        fill(&mut board, Player::Player1, &[(0, 0), (0, 1), (0, 2), (0, 3)]);
        fill(&mut board, Player::Player1, &[(1, 0), (2, 0), (3, 0)]);
        let line = find_winning_line(&board).expect("row is full");
        assert_eq!(line[3], Position::new(0, 3));
    }
}
