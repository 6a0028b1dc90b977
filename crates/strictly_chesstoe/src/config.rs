//! Search configuration for the computer opponent.

use derive_getters::Getters;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::instrument;

/// What the hard opponent does when its time budget runs out mid-search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetPolicy {
    /// Return the best root action found so far.
    #[default]
    BestSoFar,
    /// Discard the partial search and play the medium policy instead.
    MediumFallback,
}

/// Weights of the leaf evaluation terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Getters, Setters)]
#[setters(prefix = "with_")]
pub struct HeuristicWeights {
    /// Own minus opponent pieces on the board.
    #[serde(default = "default_material")]
    material: f64,
    /// Own minus opponent squared line occupancy.
    #[serde(default = "default_lines")]
    lines: f64,
    /// Own minus opponent central squares held.
    #[serde(default = "default_center")]
    center: f64,
    /// Own minus opponent legal action count. Zero disables the term.
    #[serde(default = "default_mobility")]
    mobility: f64,
}

fn default_material() -> f64 {
    10.0
}

fn default_lines() -> f64 {
    5.0
}

fn default_center() -> f64 {
    3.0
}

fn default_mobility() -> f64 {
    0.5
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            material: default_material(),
            lines: default_lines(),
            center: default_center(),
            mobility: default_mobility(),
        }
    }
}

/// Bounds and policy for the hard opponent's minimax search.
///
/// The branch caps keep a single decision responsive; they trim the
/// candidate list per node and have no bearing on the rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, Setters)]
#[setters(prefix = "with_")]
pub struct SearchConfig {
    /// Plies searched below the root.
    #[serde(default = "default_depth")]
    depth: u32,
    /// Candidates examined at the root.
    #[serde(default = "default_root_branch_cap")]
    root_branch_cap: usize,
    /// Candidates examined at every interior node.
    #[serde(default = "default_branch_cap")]
    branch_cap: usize,
    /// Wall-clock budget per decision in milliseconds.
    #[serde(default)]
    #[setters(strip_option)]
    time_budget_ms: Option<u64>,
    /// Behavior once the budget is spent.
    #[serde(default)]
    on_budget_exhausted: BudgetPolicy,
    /// Leaf evaluation weights.
    #[serde(default)]
    weights: HeuristicWeights,
}

fn default_depth() -> u32 {
    2
}

fn default_root_branch_cap() -> usize {
    20
}

fn default_branch_cap() -> usize {
    15
}

impl SearchConfig {
    /// Creates the default configuration.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// The time budget as a duration.
    pub fn time_budget(&self) -> Option<Duration> {
        self.time_budget_ms.map(Duration::from_millis)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: default_depth(),
            root_branch_cap: default_root_branch_cap(),
            branch_cap: default_branch_cap(),
            time_budget_ms: None,
            on_budget_exhausted: BudgetPolicy::default(),
            weights: HeuristicWeights::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::new();
        assert_eq!(*config.depth(), 2);
        assert_eq!(*config.root_branch_cap(), 20);
        assert_eq!(*config.branch_cap(), 15);
        assert_eq!(config.time_budget(), None);
        assert_eq!(*config.weights().material(), 10.0);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: SearchConfig =
            serde_json::from_str(r#"{"depth": 3, "on_budget_exhausted": "medium_fallback"}"#)
                .expect("valid config");
        assert_eq!(*config.depth(), 3);
        assert_eq!(*config.branch_cap(), 15);
        assert_eq!(*config.on_budget_exhausted(), BudgetPolicy::MediumFallback);
    }

    #[test]
    fn test_setters_chain() {
        let config = SearchConfig::new().with_depth(3).with_time_budget_ms(250);
        assert_eq!(*config.depth(), 3);
        assert_eq!(config.time_budget(), Some(Duration::from_millis(250)));
    }
}
