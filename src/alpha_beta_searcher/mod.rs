//! Generic negamax search with alpha-beta pruning and quiescence.
//!
//! The search is independent of any particular game. A game plugs in through
//! a handful of traits: a state that can apply and undo moves, a move
//! generator, and a static evaluator.

mod move_orderer;
mod search;
mod search_result;
mod traits;
mod transposition_table;

pub use move_orderer::{
    PriorityMoveOrderer, CAPTURE_PRIORITY, CHECKMATE_PRIORITY, CHECK_PRIORITY,
};
pub use search::{
    negamax, negamax_search, with_move_applied, SearchConfig, SearchContext, SearchError,
    SearchStats, MAX_LINE_LENGTH,
};
pub use search_result::{
    is_mate_score, mated_score, Outcome, Score, SearchResult, DRAW_SCORE, MATE_PLY_HORIZON,
    MATE_VALUE,
};
pub use traits::{
    Evaluator, GameMove, GameState, MoveCollection, MoveGenerator, MoveOrderer, NoOpMoveOrderer,
};
pub use transposition_table::{fingerprint, CacheEntry, PositionCache, Window};
