//! Move text parsing for the command line.

use std::str::FromStr;

use chess::{ChessMove, Piece, Square};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static COORDINATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new("^([a-h][1-8])([a-h][1-8])([nbrqNBRQ])?$")
        .expect("COORDINATE_RE regex should be valid")
});

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("invalid input: {input:?}")]
    InvalidInput { input: String },
}

/// Parses a move in coordinate notation, such as `e2e4` or `e7e8q`.
///
/// Only the shape is checked here. Whether the move is legal depends on the
/// position and is left to the board.
pub fn parse_move(input: &str) -> Result<ChessMove, InputError> {
    let raw = input.trim();
    let invalid = || InputError::InvalidInput {
        input: raw.to_string(),
    };

    let caps = COORDINATE_RE.captures(raw).ok_or_else(invalid)?;
    let source = Square::from_str(&caps[1]).map_err(|_| invalid())?;
    let dest = Square::from_str(&caps[2]).map_err(|_| invalid())?;
    let promotion = caps
        .get(3)
        .map(|piece| promotion_piece(piece.as_str()))
        .transpose()
        .map_err(|_| invalid())?;

    Ok(ChessMove::new(source, dest, promotion))
}

/// Parses a list of moves separated by commas or whitespace.
pub fn parse_move_list(input: &str) -> Result<Vec<ChessMove>, InputError> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(parse_move)
        .collect()
}

fn promotion_piece(letter: &str) -> Result<Piece, ()> {
    match letter.to_ascii_lowercase().as_str() {
        "n" => Ok(Piece::Knight),
        "b" => Ok(Piece::Bishop),
        "r" => Ok(Piece::Rook),
        "q" => Ok(Piece::Queen),
        _ => Err(()),
    }
}
