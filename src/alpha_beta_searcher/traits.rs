//! Core traits for generic negamax search.

use std::fmt::Debug;

use super::search::SearchError;
use super::search_result::Score;

/// Represents the state of a two-player zero-sum game, owned by a rules engine.
///
/// The search never clones a state: it walks the tree by applying and undoing
/// moves on a single instance.
pub trait GameState {
    /// Returns a hash of the current position, including the side to move.
    fn position_hash(&self) -> u64;

    /// Returns the number of half-moves played since the start of the game.
    fn ply_count(&self) -> u32;

    /// Returns true if the current player is the maximizing player.
    fn is_maximizing_player(&self) -> bool;

    /// Returns true if the current player is in check.
    /// Default implementation returns false (no move is ever forcing by check).
    fn is_in_check(&self) -> bool {
        false
    }

    /// Returns true if the current player has lost (checkmate in chess).
    fn is_checkmate(&self) -> bool;

    /// Returns true if the rules declare the current position drawn.
    fn is_draw(&self) -> bool {
        false
    }

    /// Returns the number of pieces left on the board. Used to detect simplified
    /// positions. Default implementation never reports an endgame.
    fn piece_count(&self) -> u32 {
        u32::MAX
    }
}

/// Represents an action that can be applied to and undone from a game state.
pub trait GameMove: Clone + PartialEq + Debug {
    type State: GameState;
    type Error: Debug;

    /// Applies this move to the given state in search mode.
    fn apply(&self, state: &mut Self::State) -> Result<(), Self::Error>;

    /// Undoes this move on the given state. Must be the last move applied.
    fn undo(&self, state: &mut Self::State) -> Result<(), Self::Error>;

    /// Returns true if this move captures material. Queried before the move is applied.
    fn is_capture(&self, _state: &Self::State) -> bool {
        false
    }
}

/// Generates all legal moves from a given game state.
pub trait MoveGenerator<S: GameState> {
    type Move: GameMove<State = S>;
    type MoveList: MoveCollection<Self::Move>;

    /// Generates all legal moves for the current player, in native generation order.
    fn generate_moves(&self, state: &mut S) -> Self::MoveList;
}

/// Statically scores a game position.
pub trait Evaluator<S: GameState> {
    /// Evaluates the given state from the perspective of the side to move.
    fn evaluate(&self, state: &S) -> Score;
}

/// Orders moves to improve alpha-beta pruning efficiency.
pub trait MoveOrderer<S: GameState, M> {
    /// Sorts moves in-place, placing "better" moves first.
    fn order_moves(&self, moves: &mut [M], state: &mut S) -> Result<(), SearchError>;
}

/// A no-op move orderer for games without move ordering heuristics.
#[derive(Clone, Default, Debug)]
pub struct NoOpMoveOrderer;

impl<S: GameState, M> MoveOrderer<S, M> for NoOpMoveOrderer {
    #[inline(always)]
    fn order_moves(&self, _moves: &mut [M], _state: &mut S) -> Result<(), SearchError> {
        Ok(())
    }
}

/// Abstraction over move collections (Vec, SmallVec, etc.)
pub trait MoveCollection<M>: AsRef<[M]> + AsMut<[M]> {
    #[inline]
    fn is_empty(&self) -> bool {
        self.as_ref().is_empty()
    }

    #[inline]
    fn len(&self) -> usize {
        self.as_ref().len()
    }
}

impl<M> MoveCollection<M> for Vec<M> {}

impl<A: smallvec::Array> MoveCollection<A::Item> for smallvec::SmallVec<A> {}
