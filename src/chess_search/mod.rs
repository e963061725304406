//! Chess-specific implementation of the negamax search traits.

pub mod implementation;

#[cfg(test)]
mod tests;

pub use implementation::{
    search_best_move, search_with_evaluator, ChessMoveGenerator, ChessMoveList, ChessMoveOrderer,
};
