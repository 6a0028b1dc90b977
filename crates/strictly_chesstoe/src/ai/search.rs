//! Depth-bounded minimax with alpha-beta pruning.
//!
//! The search always runs on copies of the match, so it can be driven
//! from any thread and abandoned at any point. When a time budget
//! expires the search stops expanding and the best root action found
//! so far is still a legal action for the current position.

use super::actions::{generate_actions, is_capture, lookahead_copy, simulate};
use super::heuristics::evaluate;
use crate::action::Action;
use crate::config::SearchConfig;
use crate::rules::check_winner;
use crate::state::MatchState;
use crate::types::Player;
use std::time::Instant;
use tracing::{debug, instrument};

/// Score of a won position before the depth bonus.
pub const WIN_SCORE: f64 = 1000.0;

/// Result of one search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Best root action found, if any root action was examined.
    pub best_action: Option<Action>,
    /// Minimax score of `best_action`.
    pub score: f64,
    /// Positions visited.
    pub nodes: u64,
    /// False if the time budget cut the search short.
    pub completed: bool,
}

/// Minimax searcher for one decision. The maximizing side is always `ai`.
pub struct Searcher<'a> {
    config: &'a SearchConfig,
    ai: Player,
    deadline: Option<Instant>,
    nodes: u64,
    stopped: bool,
}

impl<'a> Searcher<'a> {
    /// Creates a searcher; the time budget starts now.
    pub fn new(config: &'a SearchConfig, ai: Player) -> Self {
        Self {
            config,
            ai,
            deadline: config.time_budget().map(|budget| Instant::now() + budget),
            nodes: 0,
            stopped: false,
        }
    }

    /// Searches from `state` with `ai` to act.
    #[instrument(skip(self, state), fields(ai = %self.ai, depth = *self.config.depth()))]
    pub fn search(&mut self, state: &MatchState) -> SearchOutcome {
        let root = lookahead_copy(state);
        let depth = (*self.config.depth()).max(1);

        let mut best_action = None;
        let mut best_score = f64::NEG_INFINITY;
        let mut alpha = f64::NEG_INFINITY;

        let actions = generate_actions(&root, self.ai);
        for action in candidates(&root, self.ai, actions, *self.config.root_branch_cap()) {
            if self.out_of_time() {
                break;
            }
            let child = simulate(&root, action, self.ai);
            let score = self.minimax(&child, depth - 1, alpha, f64::INFINITY, false);
            if score > best_score {
                best_score = score;
                best_action = Some(action);
            }
            alpha = alpha.max(score);
        }

        debug!(
            nodes = self.nodes,
            score = best_score,
            completed = !self.stopped,
            "Search finished"
        );
        SearchOutcome {
            best_action,
            score: best_score,
            nodes: self.nodes,
            completed: !self.stopped,
        }
    }

    fn minimax(
        &mut self,
        state: &MatchState,
        depth: u32,
        mut alpha: f64,
        mut beta: f64,
        maximizing: bool,
    ) -> f64 {
        self.nodes += 1;

        if let Some((winner, _)) = check_winner(state.board()) {
            // Faster wins and slower losses score better.
            let bonus = f64::from(depth);
            return if winner == self.ai {
                WIN_SCORE + bonus
            } else {
                -WIN_SCORE - bonus
            };
        }
        if depth == 0 {
            return evaluate(state, self.ai, self.config.weights());
        }

        let mover = if maximizing { self.ai } else { self.ai.opponent() };
        let actions = generate_actions(state, mover);
        if actions.is_empty() {
            return 0.0;
        }

        let mut best = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        let mut explored = false;

        for action in candidates(state, mover, actions, *self.config.branch_cap()) {
            if self.out_of_time() {
                break;
            }
            explored = true;
            let child = simulate(state, action, mover);
            let score = self.minimax(&child, depth - 1, alpha, beta, !maximizing);
            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }
            if beta <= alpha {
                break;
            }
        }

        if explored {
            best
        } else {
            evaluate(state, self.ai, self.config.weights())
        }
    }

    fn out_of_time(&mut self) -> bool {
        if !self.stopped
            && let Some(deadline) = self.deadline
            && Instant::now() >= deadline
        {
            self.stopped = true;
        }
        self.stopped
    }
}

/// Puts captures ahead of the other actions, keeping generation order
/// within each group, and keeps the first `cap`.
fn candidates(
    state: &MatchState,
    player: Player,
    actions: Vec<Action>,
    cap: usize,
) -> Vec<Action> {
    let (mut ordered, quiet): (Vec<Action>, Vec<Action>) = actions
        .into_iter()
        .partition(|action| is_capture(state, action, player));
    ordered.extend(quiet);
    ordered.truncate(cap);
    ordered
}
