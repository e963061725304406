//! Chess-specific trait implementations for the negamax search.

use chess::{ChessMove, MoveGen};
use smallvec::SmallVec;
#[cfg(feature = "instrumentation")]
use tracing::instrument;

use crate::alpha_beta_searcher::{
    negamax_search, Evaluator, GameMove, GameState, MoveGenerator, PriorityMoveOrderer, Score,
    SearchContext, SearchError, SearchResult,
};
use crate::board::error::BoardError;
use crate::board::{ChessBoard, MoveMode};
use crate::evaluate::ChessEvaluator;

/// Legal moves of one position. Most positions fit inline.
pub type ChessMoveList = SmallVec<[ChessMove; 64]>;

/// Orders chess moves by the reply count they leave, with mate, check and
/// capture bonuses.
pub type ChessMoveOrderer = PriorityMoveOrderer<ChessMoveGenerator>;

impl GameState for ChessBoard {
    #[inline]
    fn position_hash(&self) -> u64 {
        ChessBoard::position_hash(self)
    }

    #[inline]
    fn ply_count(&self) -> u32 {
        ChessBoard::ply_count(self)
    }

    #[inline]
    fn is_maximizing_player(&self) -> bool {
        self.side_to_move() == chess::Color::White
    }

    #[inline]
    fn is_in_check(&self) -> bool {
        ChessBoard::is_in_check(self)
    }

    #[inline]
    fn is_checkmate(&self) -> bool {
        ChessBoard::is_checkmate(self)
    }

    #[inline]
    fn is_draw(&self) -> bool {
        ChessBoard::is_draw(self)
    }

    #[inline]
    fn piece_count(&self) -> u32 {
        ChessBoard::piece_count(self)
    }
}

impl GameMove for ChessMove {
    type State = ChessBoard;
    type Error = BoardError;

    #[inline]
    fn apply(&self, state: &mut ChessBoard) -> Result<(), BoardError> {
        state.make_move(*self, MoveMode::InSearch)
    }

    #[inline]
    fn undo(&self, state: &mut ChessBoard) -> Result<(), BoardError> {
        state.undo_move(*self, MoveMode::InSearch)
    }

    #[inline]
    fn is_capture(&self, state: &ChessBoard) -> bool {
        state.is_capture(*self)
    }
}

#[derive(Clone, Copy, Default, Debug)]
pub struct ChessMoveGenerator;

impl ChessMoveGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl MoveGenerator<ChessBoard> for ChessMoveGenerator {
    type Move = ChessMove;
    type MoveList = ChessMoveList;

    #[inline]
    fn generate_moves(&self, state: &mut ChessBoard) -> ChessMoveList {
        MoveGen::new_legal(state.board()).collect()
    }
}

impl Evaluator<ChessBoard> for ChessEvaluator {
    #[inline]
    #[cfg_attr(feature = "instrumentation", instrument(skip_all))]
    fn evaluate(&self, state: &ChessBoard) -> Score {
        self.score(state)
    }
}

/// Searches for the best chess move from the given position with the default
/// evaluator and look-ahead move ordering.
#[must_use = "search returns the best move found"]
pub fn search_best_move(
    context: &mut SearchContext<ChessMove>,
    board: &mut ChessBoard,
) -> Result<SearchResult<ChessMove>, SearchError> {
    search_with_evaluator(context, board, &ChessEvaluator::default())
}

pub fn search_with_evaluator(
    context: &mut SearchContext<ChessMove>,
    board: &mut ChessBoard,
    evaluator: &ChessEvaluator,
) -> Result<SearchResult<ChessMove>, SearchError> {
    let move_generator = ChessMoveGenerator;
    let move_orderer = ChessMoveOrderer::new(ChessMoveGenerator);

    negamax_search(context, board, &move_generator, evaluator, &move_orderer)
}
