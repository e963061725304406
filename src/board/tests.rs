use super::*;
use chess::Square;

fn mv(source: Square, dest: Square) -> ChessMove {
    ChessMove::new(source, dest, None)
}

fn play(board: &mut ChessBoard, moves: &[ChessMove]) {
    for chess_move in moves {
        board.make_move(*chess_move, MoveMode::Game).unwrap();
    }
}

#[test]
fn test_default_is_starting_position() {
    let board = ChessBoard::default();
    assert_eq!(board.to_fen(), fen::STARTING_POSITION);
    assert_eq!(board.ply_count(), 0);
    assert_eq!(board.piece_count(), 32);
    assert_eq!(board.legal_move_count(), 20);
    assert_eq!(board.side_to_move(), Color::White);
}

#[test]
fn test_from_fen_reads_move_counters() {
    let board: ChessBoard = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3"
        .parse()
        .unwrap();
    assert_eq!(board.ply_count(), 4);
    assert_eq!(board.halfmove_clock().value(), 2);

    let black = ChessBoard::from_fen("4k3/8/8/8/8/8/8/R3K3 b - - 7 12").unwrap();
    assert_eq!(black.ply_count(), 23);
    assert_eq!(black.halfmove_clock().value(), 7);
    assert_eq!(black.to_fen(), "4k3/8/8/8/8/8/8/R3K3 b - - 7 12");
}

#[test]
fn test_invalid_fen_is_rejected() {
    assert!(matches!(
        ChessBoard::from_fen("not a position"),
        Err(BoardError::InvalidFen { .. })
    ));
    assert!(matches!(
        ChessBoard::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - x 1"),
        Err(BoardError::InvalidFen { .. })
    ));
}

#[test]
fn test_make_and_undo_restore_position() {
    let mut board = ChessBoard::default();
    let fen_before = board.to_fen();
    let hash_before = board.position_hash();

    let e4 = mv(Square::E2, Square::E4);
    board.make_move(e4, MoveMode::InSearch).unwrap();
    assert_eq!(board.ply_count(), 1);
    assert_eq!(board.side_to_move(), Color::Black);
    assert_ne!(board.position_hash(), hash_before);
    assert!(board.game_record().is_empty());

    board.undo_move(e4, MoveMode::InSearch).unwrap();
    assert_eq!(board.to_fen(), fen_before);
    assert_eq!(board.position_hash(), hash_before);
    assert_eq!(board.ply_count(), 0);
}

#[test]
fn test_game_mode_records_and_validates() {
    let mut board = ChessBoard::default();
    let e4 = mv(Square::E2, Square::E4);
    board.make_move(e4, MoveMode::Game).unwrap();
    assert_eq!(board.game_record(), &[e4]);

    let illegal = mv(Square::E4, Square::E6);
    assert!(matches!(
        board.make_move(illegal, MoveMode::Game),
        Err(BoardError::IllegalMove { .. })
    ));
    assert_eq!(board.ply_count(), 1);

    board.undo_move(e4, MoveMode::Game).unwrap();
    assert!(board.game_record().is_empty());
}

#[test]
fn test_undo_must_match_last_move() {
    let mut board = ChessBoard::default();
    assert_eq!(
        board.undo_move(mv(Square::E2, Square::E4), MoveMode::InSearch),
        Err(BoardError::NothingToUndo)
    );

    board
        .make_move(mv(Square::E2, Square::E4), MoveMode::InSearch)
        .unwrap();
    assert!(matches!(
        board.undo_move(mv(Square::D2, Square::D4), MoveMode::InSearch),
        Err(BoardError::UndoMismatch { .. })
    ));
    assert_eq!(board.ply_count(), 1);
}

#[test]
fn test_halfmove_clock_resets_on_pawn_moves_and_captures() {
    let mut board = ChessBoard::from_fen("4k3/8/8/3p4/8/8/4P3/R3K3 w - - 10 30").unwrap();

    board
        .make_move(mv(Square::A1, Square::A2), MoveMode::Game)
        .unwrap();
    assert_eq!(board.halfmove_clock().value(), 11);

    board
        .make_move(mv(Square::E8, Square::E7), MoveMode::Game)
        .unwrap();
    board
        .make_move(mv(Square::E2, Square::E4), MoveMode::Game)
        .unwrap();
    assert_eq!(board.halfmove_clock().value(), 0);

    assert!(board.is_capture(mv(Square::D5, Square::E4)));
    board
        .make_move(mv(Square::D5, Square::E4), MoveMode::Game)
        .unwrap();
    assert_eq!(board.halfmove_clock().value(), 0);
}

#[test]
fn test_capture_detection() {
    let board = ChessBoard::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").unwrap();
    // En passant lands on an empty square.
    assert!(board.is_capture(mv(Square::E5, Square::D6)));
    assert!(!board.is_capture(mv(Square::E5, Square::E6)));
    assert!(!board.is_capture(mv(Square::E1, Square::E2)));

    let start = ChessBoard::default();
    assert!(!start.is_capture(mv(Square::G1, Square::F3)));
}

#[test]
fn test_threefold_repetition_is_a_draw() {
    let mut board = ChessBoard::default();
    let shuffle = [
        mv(Square::G1, Square::F3),
        mv(Square::G8, Square::F6),
        mv(Square::F3, Square::G1),
        mv(Square::F6, Square::G8),
    ];

    play(&mut board, &shuffle);
    assert_eq!(board.repetition_count(), 2);
    assert!(!board.is_draw());

    play(&mut board, &shuffle);
    assert_eq!(board.repetition_count(), 3);
    assert!(board.is_draw());

    board
        .undo_move(mv(Square::F6, Square::G8), MoveMode::Game)
        .unwrap();
    assert!(!board.is_draw());
}

#[test]
fn test_fifty_move_rule() {
    let mut board = ChessBoard::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 99 80").unwrap();
    assert!(!board.is_draw());

    board
        .make_move(mv(Square::A1, Square::A2), MoveMode::Game)
        .unwrap();
    assert!(board.is_draw());
}

#[test]
fn test_insufficient_material() {
    let bare = ChessBoard::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    assert!(bare.is_insufficient_material());

    let bishop = ChessBoard::from_fen("4k3/8/8/8/8/8/8/2B1K3 w - - 0 1").unwrap();
    assert!(bishop.is_draw());

    let pawn = ChessBoard::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();
    assert!(!pawn.is_insufficient_material());
}

#[test]
fn test_stalemate_and_checkmate() {
    let stalemate = ChessBoard::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(stalemate.is_stalemate());
    assert!(stalemate.is_draw());
    assert!(!stalemate.is_checkmate());
    assert!(!stalemate.is_in_check());

    let mate = ChessBoard::from_fen("k7/1Q6/1K6/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(mate.is_checkmate());
    assert!(mate.is_in_check());
    assert!(mate.is_game_over());
    assert!(!mate.is_draw());
}

#[test]
fn test_attack_queries() {
    let board = ChessBoard::default();
    assert!(board.is_square_attacked(Square::F3, Color::White));
    assert!(!board.is_square_attacked(Square::E4, Color::White));
    assert!(board.is_square_attacked(Square::F6, Color::Black));
    assert_eq!(board.king_adjacent_squares(Color::Black).popcnt(), 5);
}
