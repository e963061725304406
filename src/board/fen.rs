//! FEN parsing on top of the `chess` crate, which ignores the move counters.

use std::str::FromStr;

use chess::{Board, Color};

use super::error::BoardError;
use super::halfmove_clock::HalfmoveClock;

pub const STARTING_POSITION: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// A parsed FEN: placement, side, castling and en passant from the `chess`
/// crate, plus the halfmove clock and fullmove number read here.
pub struct ParsedFen {
    pub board: Board,
    pub halfmove_clock: HalfmoveClock,
    pub fullmove_number: u32,
}

impl ParsedFen {
    /// Half-moves played since the start of the game.
    pub fn ply_count(&self) -> u32 {
        let black_to_move = u32::from(self.board.side_to_move() == Color::Black);
        2 * self.fullmove_number.saturating_sub(1) + black_to_move
    }
}

pub fn parse_fen(fen: &str) -> Result<ParsedFen, BoardError> {
    let invalid = |reason: String| BoardError::InvalidFen {
        fen: fen.to_string(),
        reason,
    };

    let board = Board::from_str(fen).map_err(|err| invalid(format!("{:?}", err)))?;

    let mut counters = fen.split_whitespace().skip(4);
    let halfmove_clock = match counters.next() {
        Some(field) => field
            .parse::<u16>()
            .map_err(|_| invalid(format!("bad halfmove clock `{}`", field)))?,
        None => 0,
    };
    let fullmove_number = match counters.next() {
        Some(field) => field
            .parse::<u32>()
            .map_err(|_| invalid(format!("bad fullmove number `{}`", field)))?,
        None => 1,
    };

    Ok(ParsedFen {
        board,
        halfmove_clock: HalfmoveClock::new(halfmove_clock),
        fullmove_number: fullmove_number.max(1),
    })
}

pub fn to_fen(board: &Board, halfmove_clock: HalfmoveClock, ply_count: u32) -> String {
    let rendered = board.to_string();
    let position: Vec<&str> = rendered.split_whitespace().take(4).collect();
    format!(
        "{} {} {}",
        position.join(" "),
        halfmove_clock.value(),
        ply_count / 2 + 1
    )
}
