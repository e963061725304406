//! Attack queries used by the evaluator.

use chess::{
    get_bishop_moves, get_king_moves, get_knight_moves, get_pawn_attacks, get_rook_moves, BitBoard,
    Board, Color, Piece, Square, EMPTY,
};

/// Every piece of color `by` that attacks `square`, given the current occupancy.
pub fn attackers_of(board: &Board, square: Square, by: Color) -> BitBoard {
    let ours = *board.color_combined(by);
    let occupied = *board.combined();
    let queens = *board.pieces(Piece::Queen);

    // A pawn of the other color on `square` would attack exactly the squares
    // from which our pawns attack it.
    let pawns = get_pawn_attacks(square, !by, *board.pieces(Piece::Pawn) & ours);
    let knights = get_knight_moves(square) & *board.pieces(Piece::Knight);
    let kings = get_king_moves(square) & *board.pieces(Piece::King);
    let diagonal = get_bishop_moves(square, occupied) & (*board.pieces(Piece::Bishop) | queens);
    let straight = get_rook_moves(square, occupied) & (*board.pieces(Piece::Rook) | queens);

    pawns | ((knights | kings | diagonal | straight) & ours)
}

pub fn is_square_attacked(board: &Board, square: Square, by: Color) -> bool {
    attackers_of(board, square, by) != EMPTY
}

/// The up to eight squares around the king of `color`.
pub fn king_adjacent_squares(board: &Board, color: Color) -> BitBoard {
    get_king_moves(board.king_square(color))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_attacks_by_each_piece_kind() {
        let board =
            Board::from_str("4k3/8/8/3p4/8/2N5/8/R3K2B w - - 0 1").expect("valid FEN");

        // Knight on c3 covers e4 and d5.
        assert!(is_square_attacked(&board, Square::E4, Color::White));
        assert!(is_square_attacked(&board, Square::D5, Color::White));
        // Rook on a1 sees along the rank up to the king.
        assert!(is_square_attacked(&board, Square::D1, Color::White));
        // Bishop on h1 sees the long diagonal up to d5.
        assert!(is_square_attacked(&board, Square::E4, Color::White));
        assert!(!is_square_attacked(&board, Square::C6, Color::White));
        // Black pawn on d5 attacks c4 and e4, not d4.
        assert!(is_square_attacked(&board, Square::C4, Color::Black));
        assert!(is_square_attacked(&board, Square::E4, Color::Black));
        assert!(!is_square_attacked(&board, Square::D4, Color::Black));
    }

    #[test]
    fn test_white_pawn_attacks_forward_diagonals() {
        let board = Board::from_str("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").expect("valid FEN");
        assert!(is_square_attacked(&board, Square::D3, Color::White));
        assert!(is_square_attacked(&board, Square::F3, Color::White));
        assert!(!is_square_attacked(&board, Square::E3, Color::White));
        assert!(!is_square_attacked(&board, Square::D1, Color::Black));
    }

    #[test]
    fn test_king_adjacent_squares() {
        let board = Board::default();
        assert_eq!(king_adjacent_squares(&board, Color::White).popcnt(), 5);

        let corner = Board::from_str("7k/8/8/8/8/8/8/K7 w - - 0 1").expect("valid FEN");
        assert_eq!(king_adjacent_squares(&corner, Color::White).popcnt(), 3);
        assert_eq!(king_adjacent_squares(&corner, Color::Black).popcnt(), 3);
    }
}
