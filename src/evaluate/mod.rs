//! Static evaluation of chess positions.
//!
//! The score is material and piece placement from the tables, plus a king
//! safety term, seen from the side to move. A side in check gets a tiny
//! penalty so that otherwise equal lines avoid walking into check.

use chess::{Board, Color, ALL_PIECES};

use crate::alpha_beta_searcher::{GameState, Score};
use crate::board::{attacks, ChessBoard};

pub mod evaluation_tables;

use self::evaluation_tables::{table_index, PIECE_SQUARE_VALUES};

pub const KING_SAFETY_PENALTY: f64 = 0.05;
pub const CHECK_BIAS: f64 = 1e-5;

#[derive(Clone, Debug, PartialEq)]
pub struct ChessEvaluator {
    /// Subtracted for every square next to a king that the enemy attacks.
    pub king_safety_penalty: f64,
    /// Subtracted when the side to move is in check.
    pub check_bias: f64,
}

impl Default for ChessEvaluator {
    fn default() -> Self {
        Self {
            king_safety_penalty: KING_SAFETY_PENALTY,
            check_bias: CHECK_BIAS,
        }
    }
}

impl ChessEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_king_safety_penalty(mut self, penalty: f64) -> Self {
        self.king_safety_penalty = penalty;
        self
    }

    pub fn with_check_bias(mut self, bias: f64) -> Self {
        self.check_bias = bias;
        self
    }

    /// Scores the position for the side to move.
    pub fn score(&self, board: &ChessBoard) -> Score {
        let for_white = self.score_for_white(board.board());
        let signed = if GameState::is_maximizing_player(board) {
            for_white
        } else {
            -for_white
        };

        if board.is_in_check() {
            signed - self.check_bias
        } else {
            signed
        }
    }

    /// Material, placement and king safety, positive when White is better.
    pub fn score_for_white(&self, board: &Board) -> Score {
        let material = material(board, Color::White) - material(board, Color::Black);
        let king_safety =
            self.king_safety(board, Color::White) - self.king_safety(board, Color::Black);
        material + king_safety
    }

    /// Non-positive: the penalty times the number of squares around the king
    /// of `color` that the other side attacks.
    pub fn king_safety(&self, board: &Board, color: Color) -> Score {
        let attacked = attacks::king_adjacent_squares(board, color)
            .filter(|square| attacks::is_square_attacked(board, *square, !color))
            .count();
        -self.king_safety_penalty * attacked as f64
    }
}

/// Table value of every non-king piece of `color`.
pub fn material(board: &Board, color: Color) -> Score {
    let own = *board.color_combined(color);
    let mut total = 0.0;

    for piece in ALL_PIECES {
        let index = match table_index(piece) {
            Some(index) => index,
            None => continue,
        };
        let table = &PIECE_SQUARE_VALUES[index];

        for square in *board.pieces(piece) & own {
            let file = square.get_file().to_index();
            let rank = match color {
                Color::White => square.get_rank().to_index(),
                Color::Black => 7 - square.get_rank().to_index(),
            };
            total += table[file][rank];
        }
    }

    total
}
