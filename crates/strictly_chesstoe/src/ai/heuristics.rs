//! Static evaluation of positions.

use super::actions::generate_actions;
use crate::config::HeuristicWeights;
use crate::position::{CENTER, LINES};
use crate::state::MatchState;
use crate::types::{Board, Player};

/// Squared occupancy of `player` over every line the opponent has not entered.
///
/// A line holding `n` of the player's pieces and none of the opponent's
/// contributes `n * n`.
pub fn line_score(board: &Board, player: Player) -> u32 {
    LINES
        .iter()
        .map(|line| {
            let mut own = 0;
            for pos in line {
                match board.owner_at(*pos) {
                    Some(owner) if owner == player => own += 1,
                    Some(_) => return 0,
                    None => {}
                }
            }
            own * own
        })
        .sum()
}

/// Number of the four central squares `player` holds.
pub fn center_control(board: &Board, player: Player) -> u32 {
    CENTER
        .iter()
        .filter(|pos| board.owner_at(**pos) == Some(player))
        .count() as u32
}

/// Leaf score of `state` from `ai`'s point of view.
pub fn evaluate(state: &MatchState, ai: Player, weights: &HeuristicWeights) -> f64 {
    let board = state.board();
    let opp = ai.opponent();
    let diff = |own: u32, theirs: u32| f64::from(own) - f64::from(theirs);

    let mut score = weights.material()
        * diff(board.count(ai) as u32, board.count(opp) as u32)
        + weights.lines() * diff(line_score(board, ai), line_score(board, opp))
        + weights.center() * diff(center_control(board, ai), center_control(board, opp));

    if *weights.mobility() != 0.0 {
        let own = generate_actions(state, ai).len() as u32;
        let theirs = generate_actions(state, opp).len() as u32;
        score += weights.mobility() * diff(own, theirs);
    }

    score
}
