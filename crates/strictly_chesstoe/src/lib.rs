//! Strictly Chesstoe - chess tic-tac-toe rules engine and computer opponent
//!
//! Two players each hold a pawn, rook, knight and bishop. They drop pieces
//! onto a 4×4 board for three rounds, then may also move them with chess
//! rules, capturing opposing pieces back into their owner's hand. The
//! first player to fill a row, column or diagonal wins.
//!
//! # Architecture
//!
//! - **State**: [`MatchState`] is a plain value; the engine is the only
//!   thing that advances it.
//! - **Rules**: pure validators and judges in [`rules`]. A rejected
//!   action never changes the state.
//! - **Engine**: [`execute_action`] validates, mutates, judges and hands
//!   over the turn.
//! - **AI**: [`AiEngine`] picks actions at three [`Difficulty`] tiers.
//! - **Invariants**: properties every reachable match satisfies, in
//!   [`invariants`].
//!
//! # Example
//!
//! ```
//! use strictly_chesstoe::{Action, Difficulty, Player, PieceKind, choose_ai_action, create_match, execute_action};
//!
//! let state = create_match("Ann", "Bo");
//! let outcome = execute_action(state, Action::place(PieceKind::Rook, 0, 0));
//! assert!(outcome.ok);
//!
//! let reply = choose_ai_action(&outcome.state, Player::Player2, Difficulty::Medium);
//! assert!(reply.is_some());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod ai;
mod config;
mod engine;
mod error;
mod position;
mod state;
mod types;

// Public namespaces
pub mod invariants;
pub mod rules;

// Crate-level exports - Board geometry
pub use position::{BOARD_SIZE, CENTER, LINE_COUNT, LINES, Position};

// Crate-level exports - Game types
pub use types::{Board, Facing, GameStatus, Phase, Piece, PieceKind, Player};

// Crate-level exports - Match state
pub use state::{MatchState, PlayerSide, STRATEGY_ROUND};

// Crate-level exports - Actions
pub use action::{Action, HistoryEntry, RawAction};

// Crate-level exports - Errors
pub use error::{MovementViolation, RuleError};

// Crate-level exports - Engine
pub use engine::{
    ActionOutcome, MatchSummary, SideSummary, apply_action, create_match, execute_action,
    execute_raw, restart_match, summarize,
};

// Crate-level exports - Rules
pub use rules::{
    check_winner, find_winning_line, has_legal_action, is_draw, is_path_clear,
    legal_destinations, legal_placements, validate_move, validate_placement,
};

// Crate-level exports - AI
pub use ai::{
    AiEngine, Difficulty, SearchOutcome, Searcher, WIN_SCORE, center_control, choose_ai_action,
    evaluate, find_block, find_capture, find_line_builder, find_winning_action, generate_actions,
    is_capture, line_score, simulate,
};
pub use config::{BudgetPolicy, HeuristicWeights, SearchConfig};
