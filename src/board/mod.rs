pub mod attacks;
pub mod error;
pub mod fen;

mod halfmove_clock;
mod position_info;
mod state_stack;

use std::fmt;
use std::str::FromStr;

use chess::{BitBoard, Board, BoardStatus, ChessMove, Color, MoveGen, Piece, Square, EMPTY};

use error::BoardError;
pub use halfmove_clock::{HalfmoveClock, FIFTY_MOVE_LIMIT};
use position_info::PositionInfo;
use state_stack::StateStack;

/// How a move is being made. Moves played in the game are checked for legality
/// and recorded; moves made while searching skip both.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveMode {
    Game,
    InSearch,
}

#[derive(Clone, Copy, Debug)]
struct Snapshot {
    board: Board,
    halfmove_clock: HalfmoveClock,
    /// The move that produced this snapshot; `None` for the loaded position.
    last_move: Option<ChessMove>,
}

/// A chess position with make/undo on top of the `chess` crate's copy-make
/// `Board`. Every applied move pushes a snapshot, so undo is a pop, and the
/// board keeps the ply counter, halfmove clock and repetition counts the rules
/// engine itself does not track.
#[derive(Clone)]
pub struct ChessBoard {
    states: StateStack<Snapshot>,
    position_info: PositionInfo,
    ply_count: u32,
    game_record: Vec<ChessMove>,
}

impl Default for ChessBoard {
    fn default() -> Self {
        Self::from_board(Board::default(), HalfmoveClock::default(), 0)
    }
}

impl FromStr for ChessBoard {
    type Err = BoardError;

    fn from_str(fen: &str) -> Result<Self, Self::Err> {
        Self::from_fen(fen)
    }
}

impl fmt::Display for ChessBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}

impl fmt::Debug for ChessBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChessBoard({})", self.to_fen())
    }
}

impl ChessBoard {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn from_fen(fen: &str) -> Result<Self, BoardError> {
        let parsed = fen::parse_fen(fen)?;
        let ply_count = parsed.ply_count();
        Ok(Self::from_board(
            parsed.board,
            parsed.halfmove_clock,
            ply_count,
        ))
    }

    fn from_board(board: Board, halfmove_clock: HalfmoveClock, ply_count: u32) -> Self {
        let initial = Snapshot {
            board,
            halfmove_clock,
            last_move: None,
        };
        Self {
            states: StateStack::new(initial),
            position_info: PositionInfo::new(Self::hash_of(&board)),
            ply_count,
            game_record: Vec::new(),
        }
    }

    pub fn to_fen(&self) -> String {
        fen::to_fen(self.board(), self.halfmove_clock(), self.ply_count)
    }

    /// The underlying `chess` crate position.
    pub fn board(&self) -> &Board {
        &self.states.peek().board
    }

    pub fn side_to_move(&self) -> Color {
        self.board().side_to_move()
    }

    pub fn ply_count(&self) -> u32 {
        self.ply_count
    }

    pub fn halfmove_clock(&self) -> HalfmoveClock {
        self.states.peek().halfmove_clock
    }

    /// Moves made in `MoveMode::Game` since the board was loaded.
    pub fn game_record(&self) -> &[ChessMove] {
        &self.game_record
    }

    /// Position hash with the side to move in the lowest bit.
    pub fn position_hash(&self) -> u64 {
        Self::hash_of(self.board())
    }

    fn hash_of(board: &Board) -> u64 {
        let black_to_move = u64::from(board.side_to_move() == Color::Black);
        (board.get_hash() & !1) | black_to_move
    }

    pub fn legal_moves(&self) -> MoveGen {
        MoveGen::new_legal(self.board())
    }

    pub fn legal_move_count(&self) -> usize {
        self.legal_moves().len()
    }

    pub fn is_legal(&self, chess_move: ChessMove) -> bool {
        self.board().legal(chess_move)
    }

    pub fn make_move(&mut self, chess_move: ChessMove, mode: MoveMode) -> Result<(), BoardError> {
        if mode == MoveMode::Game && !self.is_legal(chess_move) {
            return Err(BoardError::IllegalMove {
                chess_move: chess_move.to_string(),
            });
        }

        let current = self.states.peek();
        let resets_clock = self.is_capture(chess_move)
            || current.board.piece_on(chess_move.get_source()) == Some(Piece::Pawn);
        let next = Snapshot {
            board: current.board.make_move_new(chess_move),
            halfmove_clock: current.halfmove_clock.advance(resets_clock),
            last_move: Some(chess_move),
        };

        self.position_info.count_position(Self::hash_of(&next.board));
        self.states.push(next);
        self.ply_count += 1;
        if mode == MoveMode::Game {
            self.game_record.push(chess_move);
        }
        Ok(())
    }

    /// Takes back `chess_move`, which must be the last move made.
    pub fn undo_move(&mut self, chess_move: ChessMove, mode: MoveMode) -> Result<(), BoardError> {
        let last_move = self
            .states
            .peek()
            .last_move
            .ok_or(BoardError::NothingToUndo)?;
        if last_move != chess_move {
            return Err(BoardError::UndoMismatch {
                expected: last_move.to_string(),
                found: chess_move.to_string(),
            });
        }

        let hash = self.position_hash();
        self.states.pop().ok_or(BoardError::NothingToUndo)?;
        self.position_info.uncount_position(hash);
        self.ply_count -= 1;
        if mode == MoveMode::Game {
            self.game_record.pop();
        }
        Ok(())
    }

    /// True if the move takes a piece, including en passant. Asked before the
    /// move is made.
    pub fn is_capture(&self, chess_move: ChessMove) -> bool {
        let board = self.board();
        let source = chess_move.get_source();
        let dest = chess_move.get_dest();

        if board.color_on(dest) == Some(!board.side_to_move()) {
            return true;
        }

        board.piece_on(source) == Some(Piece::Pawn)
            && source.get_file() != dest.get_file()
            && board.piece_on(dest).is_none()
    }

    pub fn is_in_check(&self) -> bool {
        *self.board().checkers() != EMPTY
    }

    pub fn is_checkmate(&self) -> bool {
        self.board().status() == BoardStatus::Checkmate
    }

    pub fn is_stalemate(&self) -> bool {
        self.board().status() == BoardStatus::Stalemate
    }

    pub fn repetition_count(&self) -> u8 {
        self.position_info.occurrences(self.position_hash())
    }

    pub fn is_draw(&self) -> bool {
        self.is_stalemate()
            || self.halfmove_clock().reaches_fifty_move_limit()
            || self.repetition_count() >= 3
            || self.is_insufficient_material()
    }

    /// Bare kings, or kings and a single knight or bishop.
    pub fn is_insufficient_material(&self) -> bool {
        let board = self.board();
        match self.piece_count() {
            2 => true,
            3 => {
                let minors = *board.pieces(Piece::Knight) | *board.pieces(Piece::Bishop);
                minors.popcnt() == 1
            }
            _ => false,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.is_checkmate() || self.is_draw()
    }

    pub fn piece_count(&self) -> u32 {
        self.board().combined().popcnt()
    }

    pub fn is_square_attacked(&self, square: Square, by: Color) -> bool {
        attacks::is_square_attacked(self.board(), square, by)
    }

    pub fn king_adjacent_squares(&self, color: Color) -> BitBoard {
        attacks::king_adjacent_squares(self.board(), color)
    }
}

#[cfg(test)]
mod tests;
