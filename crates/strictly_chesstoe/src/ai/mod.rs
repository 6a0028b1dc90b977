//! Computer opponent with three difficulty tiers.
//!
//! Every tier picks from the same legal action generator:
//!
//! - **Easy** plays a uniformly random legal action.
//! - **Medium** wins if it can, blocks an immediate opposing win, captures,
//!   builds its strongest uncontested line, and otherwise plays randomly.
//! - **Hard** wins or blocks like Medium, then runs a bounded minimax
//!   search with alpha-beta pruning.
//!
//! None of the tiers touch the submitted state. The chosen action is meant
//! to be applied through [`crate::execute_action`] like any player action.

mod actions;
mod heuristics;
mod search;

pub use actions::{generate_actions, is_capture, simulate};
pub use heuristics::{center_control, evaluate, line_score};
pub use search::{SearchOutcome, Searcher, WIN_SCORE};

use crate::action::Action;
use crate::config::{BudgetPolicy, SearchConfig};
use crate::rules::check_winner;
use crate::state::MatchState;
use crate::types::Player;
use derive_getters::Getters;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Strength of the computer opponent.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Random legal actions.
    #[display("easy")]
    Easy,
    /// Win, block, capture, build lines.
    #[default]
    #[display("medium")]
    Medium,
    /// Win, block, then minimax.
    #[display("hard")]
    Hard,
}

/// Chooses actions for a computer player.
///
/// Owns its random source so Easy and Medium play can be reproduced
/// with [`AiEngine::seeded`].
#[derive(Debug, Clone, Getters)]
pub struct AiEngine {
    /// Search settings for the hard tier.
    config: SearchConfig,
    #[getter(skip)]
    rng: StdRng,
}

impl AiEngine {
    /// Creates an engine seeded from the operating system.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates an engine with a fixed seed.
    pub fn seeded(seed: u64, config: SearchConfig) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Picks an action for `ai`, or `None` when it has no legal action
    /// or the match is over.
    #[instrument(skip(self, state), fields(round = state.round()))]
    pub fn choose(
        &mut self,
        state: &MatchState,
        ai: Player,
        difficulty: Difficulty,
    ) -> Option<Action> {
        if state.status().is_terminal() {
            return None;
        }
        let choice = match difficulty {
            Difficulty::Easy => self.easy(state, ai),
            Difficulty::Medium => self.medium(state, ai),
            Difficulty::Hard => self.hard(state, ai),
        };
        debug!(?choice, "AI decided");
        choice
    }

    fn easy(&mut self, state: &MatchState, ai: Player) -> Option<Action> {
        let actions = generate_actions(state, ai);
        self.pick_random(&actions)
    }

    fn medium(&mut self, state: &MatchState, ai: Player) -> Option<Action> {
        let actions = generate_actions(state, ai);
        if actions.is_empty() {
            return None;
        }
        find_winning_action(state, ai, &actions)
            .or_else(|| find_block(state, ai, &actions))
            .or_else(|| self.fallback(state, ai, &actions))
    }

    fn hard(&mut self, state: &MatchState, ai: Player) -> Option<Action> {
        let actions = generate_actions(state, ai);
        if actions.is_empty() {
            return None;
        }
        if let Some(action) =
            find_winning_action(state, ai, &actions).or_else(|| find_block(state, ai, &actions))
        {
            return Some(action);
        }

        let outcome = Searcher::new(&self.config, ai).search(state);
        if !outcome.completed {
            warn!(
                nodes = outcome.nodes,
                policy = ?self.config.on_budget_exhausted(),
                "Search budget exhausted"
            );
            if *self.config.on_budget_exhausted() == BudgetPolicy::MediumFallback {
                return self.fallback(state, ai, &actions);
            }
        }
        match outcome.best_action {
            Some(action) => Some(action),
            None => self.fallback(state, ai, &actions),
        }
    }

    /// Medium's steps after win and block.
    fn fallback(&mut self, state: &MatchState, ai: Player, actions: &[Action]) -> Option<Action> {
        find_capture(state, ai, actions)
            .or_else(|| find_line_builder(state, ai, actions))
            .or_else(|| self.pick_random(actions))
    }

    fn pick_random(&mut self, actions: &[Action]) -> Option<Action> {
        if actions.is_empty() {
            return None;
        }
        let index = self.rng.random_range(0..actions.len());
        actions.get(index).copied()
    }
}

impl Default for AiEngine {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

/// Picks an action for `ai` with the default search configuration.
#[instrument(skip(state))]
pub fn choose_ai_action(state: &MatchState, ai: Player, difficulty: Difficulty) -> Option<Action> {
    AiEngine::default().choose(state, ai, difficulty)
}

/// First action in `actions` that wins outright for `player`.
pub fn find_winning_action(state: &MatchState, player: Player, actions: &[Action]) -> Option<Action> {
    actions.iter().copied().find(|action| {
        let next = simulate(state, *action, player);
        matches!(check_winner(next.board()), Some((winner, _)) if winner == player)
    })
}

/// An action for `ai` that denies the opponent's immediate win.
///
/// Plays the opponent's winning action itself when `ai` may legally make
/// it, otherwise the first legal action landing on the same square.
pub fn find_block(state: &MatchState, ai: Player, actions: &[Action]) -> Option<Action> {
    let opponent = ai.opponent();
    let threat = find_winning_action(state, opponent, &generate_actions(state, opponent))?;
    if actions.contains(&threat) {
        return Some(threat);
    }
    actions
        .iter()
        .copied()
        .find(|action| action.destination() == threat.destination())
}

/// First action in `actions` that captures an opposing piece.
pub fn find_capture(state: &MatchState, ai: Player, actions: &[Action]) -> Option<Action> {
    actions
        .iter()
        .copied()
        .find(|action| is_capture(state, action, ai))
}

/// The action that most raises `ai`'s uncontested line score.
///
/// Returns `None` if no action improves on the current position.
pub fn find_line_builder(state: &MatchState, ai: Player, actions: &[Action]) -> Option<Action> {
    let mut best_score = line_score(state.board(), ai);
    let mut best = None;
    for action in actions {
        let score = line_score(simulate(state, *action, ai).board(), ai);
        if score > best_score {
            best_score = score;
            best = Some(*action);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;
    use crate::types::{Phase, PieceKind};
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    fn strategy(mut state: MatchState) -> MatchState {
        state.phase = Phase::Strategy;
        state.round = 4;
        state
    }

    #[test]
    fn test_difficulty_parses_and_displays() {
        assert_eq!(Difficulty::from_str("hard"), Ok(Difficulty::Hard));
        assert_eq!(Difficulty::from_str("Easy"), Ok(Difficulty::Easy));
        assert_eq!(Difficulty::Medium.to_string(), "medium");
        assert!(Difficulty::from_str("impossible").is_err());
    }

    #[test]
    fn test_easy_is_reproducible_with_seed() {
        let state = MatchState::default();
        let mut a = AiEngine::seeded(7, SearchConfig::new());
        let mut b = AiEngine::seeded(7, SearchConfig::new());
        for _ in 0..5 {
            assert_eq!(
                a.choose(&state, Player::Player1, Difficulty::Easy),
                b.choose(&state, Player::Player1, Difficulty::Easy)
            );
        }
    }

    #[test]
    fn test_easy_choice_is_legal() {
        let state = MatchState::default();
        let mut ai = AiEngine::seeded(3, SearchConfig::new());
        let action = ai
            .choose(&state, Player::Player1, Difficulty::Easy)
            .expect("fresh match has actions");
        assert!(generate_actions(&state, Player::Player1).contains(&action));
    }

    #[test]
    fn test_no_actions_yields_none() {
        let mut state = strategy(MatchState::default());
        state.player2 = crate::state::PlayerSide::from_pools(vec![], vec![]);
        for difficulty in Difficulty::iter() {
            assert_eq!(
                AiEngine::seeded(1, SearchConfig::new()).choose(&state, Player::Player2, difficulty),
                None
            );
        }
    }

    #[test]
    fn test_medium_takes_the_win() {
        let mut state = MatchState::default();
        state.place_piece(Player::Player2, PieceKind::Rook, pos(0, 3));
        state.place_piece(Player::Player2, PieceKind::Knight, pos(1, 2));
        state.place_piece(Player::Player2, PieceKind::Bishop, pos(2, 1));
        let action = AiEngine::seeded(0, SearchConfig::new())
            .choose(&state, Player::Player2, Difficulty::Medium);
        assert_eq!(action, Some(Action::place(PieceKind::Pawn, 3, 0)));
    }

    #[test]
    fn test_medium_blocks_with_same_destination() {
        let mut state = MatchState::default();
        state.place_piece(Player::Player2, PieceKind::Pawn, pos(1, 0));
        state.place_piece(Player::Player2, PieceKind::Rook, pos(1, 1));
        state.place_piece(Player::Player2, PieceKind::Knight, pos(1, 2));
        let action = AiEngine::seeded(0, SearchConfig::new())
            .choose(&state, Player::Player1, Difficulty::Medium);
        // Player 2 threatens Bishop at (1, 3); Player 1 takes the square first.
        assert_eq!(action, Some(Action::place(PieceKind::Bishop, 1, 3)));
    }

    #[test]
    fn test_medium_prefers_capture() {
        let mut state = strategy(MatchState::default());
        state.place_piece(Player::Player1, PieceKind::Rook, pos(0, 0));
        state.place_piece(Player::Player2, PieceKind::Pawn, pos(3, 0));
        let action = AiEngine::seeded(0, SearchConfig::new())
            .choose(&state, Player::Player1, Difficulty::Medium);
        assert_eq!(action, Some(Action::movement(0, 0, 3, 0)));
    }

    #[test]
    fn test_line_builder_extends_own_line() {
        let mut state = MatchState::default();
        state.place_piece(Player::Player1, PieceKind::Rook, pos(0, 0));
        state.place_piece(Player::Player1, PieceKind::Knight, pos(0, 1));
        let actions = generate_actions(&state, Player::Player1);
        let action = find_line_builder(&state, Player::Player1, &actions).expect("improvement");
        // (0, 3) and (1, 1) both raise the score from 7 to 14; (0, 3) comes first.
        assert_eq!(action, Action::place(PieceKind::Pawn, 0, 3));
    }

    #[test]
    fn test_hard_finds_win_after_placement_rounds() {
        let mut state = strategy(MatchState::default());
        state.place_piece(Player::Player1, PieceKind::Rook, pos(0, 0));
        state.place_piece(Player::Player1, PieceKind::Knight, pos(0, 1));
        state.place_piece(Player::Player1, PieceKind::Bishop, pos(0, 2));
        state.place_piece(Player::Player2, PieceKind::Rook, pos(3, 3));
        let action = AiEngine::seeded(0, SearchConfig::new())
            .choose(&state, Player::Player1, Difficulty::Hard);
        assert_eq!(action, Some(Action::place(PieceKind::Pawn, 0, 3)));
    }

    #[test]
    fn test_hard_with_spent_budget_still_plays() {
        let state = MatchState::default();
        for policy in [BudgetPolicy::BestSoFar, BudgetPolicy::MediumFallback] {
            let config = SearchConfig::new()
                .with_time_budget_ms(0)
                .with_on_budget_exhausted(policy);
            let action = AiEngine::seeded(5, config).choose(&state, Player::Player1, Difficulty::Hard);
            let action = action.expect("fallback always yields an action");
            assert!(generate_actions(&state, Player::Player1).contains(&action));
        }
    }

    #[test]
    fn test_choose_does_not_mutate_state() {
        let mut state = MatchState::default();
        state.place_piece(Player::Player1, PieceKind::Rook, pos(1, 1));
        let before = state.clone();
        for difficulty in Difficulty::iter() {
            let _ = choose_ai_action(&state, Player::Player2, difficulty);
        }
        assert_eq!(state, before);
    }
}
