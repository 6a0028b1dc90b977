//! Phase schedule invariant: placement for rounds 1-3, strategy after.

use super::Invariant;
use crate::state::{MatchState, STRATEGY_ROUND};
use crate::types::Phase;

/// Invariant: the phase is a function of the round.
pub struct PhaseScheduleInvariant;

impl Invariant<MatchState> for PhaseScheduleInvariant {
    fn holds(state: &MatchState) -> bool {
        let expected = if state.round() >= STRATEGY_ROUND {
            Phase::Strategy
        } else {
            Phase::Placement
        };
        state.round() >= 1 && state.phase() == expected
    }

    fn description() -> &'static str {
        "Phase is placement for rounds 1-3 and strategy from round 4"
    }
}
