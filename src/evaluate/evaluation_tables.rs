//! Piece/square value tables, from White's point of view.
//!
//! Indexed `[piece][file][rank]` with files and ranks counted from 0. Black
//! pieces read the table with the rank mirrored.

use chess::Piece;
use once_cell::sync::Lazy;

pub const PAWN_VALUE: f64 = 1.0;
pub const KNIGHT_VALUE: f64 = 3.0;
pub const BISHOP_VALUE: f64 = 3.3;
pub const ROOK_VALUE: f64 = 5.0;
pub const QUEEN_VALUE: f64 = 9.0;

/// Per-rank gain of a pawn walking toward promotion.
pub const PAWN_ADVANCE_BONUS: f64 = 0.005;
/// Pawn bonus on the four centre squares; it fades out over the ring around them.
pub const PAWN_CENTRE_BONUS: f64 = 0.01;
/// Flat bonus for a knight anywhere in the central 4x4 block.
pub const KNIGHT_CENTRE_BONUS: f64 = 0.02;

/// Kings are never scored by the tables.
pub const TABLE_PIECES: usize = 5;

pub type PieceSquareTable = [[[f64; 8]; 8]; TABLE_PIECES];

pub static PIECE_SQUARE_VALUES: Lazy<PieceSquareTable> = Lazy::new(build_tables);

/// Bonus for leaving the back rank, by piece.
fn developed_bonus(piece: usize) -> f64 {
    match piece {
        1 | 2 => 0.005,
        3 => 0.003,
        4 => 0.001,
        _ => 0.0,
    }
}

fn build_tables() -> PieceSquareTable {
    let base = [
        PAWN_VALUE,
        KNIGHT_VALUE,
        BISHOP_VALUE,
        ROOK_VALUE,
        QUEEN_VALUE,
    ];
    let mut tables = [[[0.0; 8]; 8]; TABLE_PIECES];

    for (piece, table) in tables.iter_mut().enumerate() {
        for file in 0..8 {
            for rank in 0..8 {
                table[file][rank] = if piece == 0 {
                    base[0] + rank as f64 * PAWN_ADVANCE_BONUS
                } else if rank != 0 {
                    base[piece] + developed_bonus(piece)
                } else {
                    base[piece]
                };
            }
        }
    }

    for file in 2..6 {
        for rank in 2..6 {
            let distance = (file as f64 - 3.5).abs() + (rank as f64 - 3.5).abs();
            tables[0][file][rank] += PAWN_CENTRE_BONUS * (3.0 - distance) / 3.0;
            tables[1][file][rank] += KNIGHT_CENTRE_BONUS;
        }
    }

    tables
}

/// Table slot for a piece kind, `None` for the king.
#[inline]
pub fn table_index(piece: Piece) -> Option<usize> {
    match piece {
        Piece::King => None,
        piece => Some(piece.to_index()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_pawn_values() {
        let pawns = &PIECE_SQUARE_VALUES[0];
        // a2: no centre bonus
        assert!((pawns[0][1] - 1.005).abs() < EPSILON);
        // e4: one of the four centre squares
        assert!((pawns[4][3] - (1.015 + 0.02 / 3.0)).abs() < EPSILON);
        // c3: corner of the central block gets nothing extra
        assert!((pawns[2][2] - 1.01).abs() < EPSILON);
        assert!(pawns[4][3] > pawns[0][3]);
        assert!(pawns[0][6] > pawns[0][1]);
    }

    #[test]
    fn test_piece_values() {
        let tables = &*PIECE_SQUARE_VALUES;
        assert_eq!(tables[1][6][0], KNIGHT_VALUE);
        assert!((tables[1][5][2] - (KNIGHT_VALUE + 0.005 + KNIGHT_CENTRE_BONUS)).abs() < EPSILON);
        assert!((tables[2][3][4] - 3.305).abs() < EPSILON);
        assert!((tables[3][0][7] - 5.003).abs() < EPSILON);
        assert!((tables[4][3][0] - QUEEN_VALUE).abs() < EPSILON);
    }

    #[test]
    fn test_table_index() {
        assert_eq!(table_index(Piece::Pawn), Some(0));
        assert_eq!(table_index(Piece::Queen), Some(4));
        assert_eq!(table_index(Piece::King), None);
    }
}
