use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("invalid FEN `{fen}`: {reason}")]
    InvalidFen { fen: String, reason: String },
    #[error("{chess_move} is not a legal move in this position")]
    IllegalMove { chess_move: String },
    #[error("cannot undo {found}, the last applied move was {expected}")]
    UndoMismatch { expected: String, found: String },
    #[error("there is no move to undo")]
    NothingToUndo,
}
