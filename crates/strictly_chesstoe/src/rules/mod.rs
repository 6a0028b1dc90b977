//! Game rules for chess tic-tac-toe.
//!
//! This module contains pure functions for judging actions and
//! positions. Rules never mutate state, so a rejected action leaves
//! the match exactly as it was.

pub mod draw;
pub mod movement;
pub mod placement;
pub mod win;

pub use draw::{has_legal_action, is_draw};
pub use movement::{is_path_clear, legal_destinations, validate_move, validate_piece_movement};
pub use placement::{legal_placements, validate_placement};
pub use win::{check_winner, find_winning_line};
