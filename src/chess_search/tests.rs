//! Chess-specific tests for the negamax search.
//!
//! Test coverage:
//! - Mate finding (mate in 1, back rank mate in 2) for both colors
//! - Opening move choice from the starting position
//! - Quiescence (winning a hanging piece at the horizon)
//! - Position cache transparency and negamax symmetry on real positions
//! - Draw scoring (fifty-move rule, stalemate)

use chess::{ChessMove, Piece, Square};

use crate::alpha_beta_searcher::{
    negamax, GameState, MoveGenerator, SearchConfig, SearchContext, SearchError, Window,
    DRAW_SCORE,
};
use crate::board::{ChessBoard, MoveMode};
use crate::evaluate::ChessEvaluator;

use super::*;

const ITALIAN: &str = "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4";
const ITALIAN_MIRRORED: &str =
    "rnbqk2r/pppp1ppp/5n2/2b1p3/4P3/2N2N2/PPPP1PPP/R1BQKB1R b KQkq - 4 4";

fn mv(source: Square, dest: Square) -> ChessMove {
    ChessMove::new(source, dest, None)
}

fn board(fen: &str) -> ChessBoard {
    ChessBoard::from_fen(fen).unwrap()
}

fn context(exploration_depth: u8, extra_capture_depth: u8) -> SearchContext<ChessMove> {
    SearchContext::new(SearchConfig::new(exploration_depth, extra_capture_depth))
}

#[test]
fn test_find_mate_in_1_white() {
    let mut board = board("1Q6/8/8/8/8/8/k1K5/8 w - - 0 1");
    let result = search_best_move(&mut context(2, 2), &mut board).unwrap();

    let valid_checkmates = [
        mv(Square::B8, Square::B2),
        mv(Square::B8, Square::A8),
        mv(Square::B8, Square::A7),
    ];
    let chess_move = result.best_move.unwrap();
    assert!(
        valid_checkmates.contains(&chess_move),
        "{} does not lead to checkmate",
        chess_move
    );
    assert!(result.is_mate() && result.score > 0.0);
}

#[test]
fn test_find_mate_in_1_black() {
    let mut board = board("1q6/8/8/8/8/8/K1k5/8 b - - 0 1");
    let result = search_best_move(&mut context(2, 2), &mut board).unwrap();

    let valid_checkmates = [
        mv(Square::B8, Square::B2),
        mv(Square::B8, Square::A8),
        mv(Square::B8, Square::A7),
    ];
    assert!(valid_checkmates.contains(&result.best_move.unwrap()));
    assert!(result.is_mate() && result.score > 0.0);
}

#[test]
fn test_unique_mate_in_1() {
    let mut board = board("k7/8/1K6/8/8/8/8/6Q1 w - - 0 1");
    let result = search_best_move(
        &mut SearchContext::new(SearchConfig::new(2, 2).with_principal_line(true)),
        &mut board,
    )
    .unwrap();

    assert_eq!(result.best_move, Some(mv(Square::G1, Square::G8)));
    assert_eq!(result.line, Some(vec![mv(Square::G1, Square::G8)]));
}

#[test]
fn test_find_back_rank_mate_in_2_white() {
    let mut board = board("1k5r/ppp5/8/8/8/8/3Q4/K2R4 w - - 0 1");
    let expected_moves = [
        mv(Square::D2, Square::D8),
        mv(Square::H8, Square::D8),
        mv(Square::D1, Square::D8),
    ];

    for (ply, expected) in expected_moves.iter().enumerate() {
        let result = search_best_move(&mut context(3, 2), &mut board).unwrap();
        let chess_move = result.best_move.unwrap();
        assert_eq!(
            *expected, chess_move,
            "move {} of the mate in 2 should be {}",
            ply, expected
        );
        board.make_move(chess_move, MoveMode::Game).unwrap();
    }

    assert!(board.is_checkmate());
}

#[test]
fn test_find_back_rank_mate_in_2_black() {
    let mut board = board("4r2k/4q3/8/8/8/8/5PPP/R5K1 b - - 0 1");
    let expected_moves = [
        mv(Square::E7, Square::E1),
        mv(Square::A1, Square::E1),
        mv(Square::E8, Square::E1),
    ];

    for expected in expected_moves {
        let result = search_best_move(&mut context(3, 2), &mut board).unwrap();
        assert_eq!(Some(expected), result.best_move);
        board.make_move(expected, MoveMode::Game).unwrap();
    }

    assert!(board.is_checkmate());
}

#[test]
fn test_opening_move_from_starting_position() {
    let mut board = ChessBoard::default();
    let mut context = context(3, 2);
    let result = search_best_move(&mut context, &mut board).unwrap();

    let chess_move = result.best_move.unwrap();
    let piece = board.board().piece_on(chess_move.get_source());
    let file = chess_move.get_source().get_file().to_index();

    let central_pawn = piece == Some(Piece::Pawn) && (2..=5).contains(&file);
    let knight = piece == Some(Piece::Knight);
    assert!(
        central_pawn || knight,
        "{} is not a central pawn or knight move",
        chess_move
    );
    assert!(!result.is_mate());
    assert!(context.evaluation_count() > 0);
    assert_eq!(board.to_fen(), ChessBoard::default().to_fen());
}

#[test]
fn test_quiescence_sees_hanging_queen() {
    let mut board = board("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1");
    let result = search_best_move(&mut context(1, 2), &mut board).unwrap();

    assert_eq!(result.best_move, Some(mv(Square::D2, Square::D5)));
    assert!(result.score > 4.0);
}

#[test]
fn test_no_moves_is_an_error() {
    let mut board = board("k7/1Q6/1K6/8/8/8/8/8 b - - 0 1");
    assert!(matches!(
        search_best_move(&mut context(2, 2), &mut board),
        Err(SearchError::NoAvailableMoves)
    ));
}

#[test]
fn test_cache_does_not_change_the_answer() {
    let mut cached_board = board(ITALIAN);
    let cached = search_best_move(&mut context(2, 2), &mut cached_board).unwrap();

    let mut uncached_board = board(ITALIAN);
    let mut uncached_context = SearchContext::new(SearchConfig::new(2, 2).with_cache(false));
    let uncached = search_best_move(&mut uncached_context, &mut uncached_board).unwrap();

    assert_eq!(cached.score, uncached.score);
    assert_eq!(cached.best_move, uncached.best_move);
    assert_eq!(uncached_context.cache().size(), 0);
}

#[test]
fn test_mirrored_position_scores_the_same() {
    let mut original = board(ITALIAN);
    let mut mirrored = board(ITALIAN_MIRRORED);

    let original_result = search_best_move(&mut context(2, 2), &mut original).unwrap();
    let mirrored_result = search_best_move(&mut context(2, 2), &mut mirrored).unwrap();

    assert!((original_result.score - mirrored_result.score).abs() < 1e-9);
}

fn search_node(fen: &str, window: Window) -> f64 {
    negamax(
        &mut context(2, 2),
        &mut board(fen),
        &ChessMoveGenerator,
        &ChessEvaluator::default(),
        &ChessMoveOrderer::new(ChessMoveGenerator),
        2,
        window,
    )
    .unwrap()
    .score()
}

#[test]
fn test_mirrored_position_agrees_inside_a_window() {
    let exact = search_node(ITALIAN, Window::FULL);

    let around = Window::new(exact - 1.0, exact + 1.0);
    assert!((search_node(ITALIAN, around) - exact).abs() < 1e-9);
    assert!((search_node(ITALIAN_MIRRORED, around) - exact).abs() < 1e-9);

    // Windows that miss the score only bound it, on the same side for both.
    let above = Window::new(exact + 1.0, exact + 2.0);
    assert!(search_node(ITALIAN, above) <= above.lower);
    assert!(search_node(ITALIAN_MIRRORED, above) <= above.lower);

    let below = Window::new(exact - 2.0, exact - 1.0);
    assert!(search_node(ITALIAN, below) >= below.upper);
    assert!(search_node(ITALIAN_MIRRORED, below) >= below.upper);
}

#[test]
fn test_child_score_is_negated_root_score() {
    let mut board = board(ITALIAN);
    let result = search_best_move(&mut context(2, 2), &mut board).unwrap();
    let best_move = result.best_move.unwrap();

    board.make_move(best_move, MoveMode::InSearch).unwrap();
    let child = negamax(
        &mut context(2, 2),
        &mut board,
        &ChessMoveGenerator,
        &ChessEvaluator::default(),
        &ChessMoveOrderer::new(ChessMoveGenerator),
        1,
        Window::FULL,
    )
    .unwrap();

    assert!(!child.is_cut_off());
    assert!((child.score() + result.score).abs() < 1e-9);
}

#[test]
fn test_drawn_position_scores_zero() {
    // Three queens up, but the fifty-move rule has already drawn the game.
    let mut fifty_moves = board("4k3/8/8/8/8/8/8/QQQ1K3 w - - 100 80");
    assert!(fifty_moves.is_draw());
    let outcome = negamax(
        &mut context(2, 2),
        &mut fifty_moves,
        &ChessMoveGenerator,
        &ChessEvaluator::default(),
        &ChessMoveOrderer::new(ChessMoveGenerator),
        2,
        Window::FULL,
    )
    .unwrap();
    assert_eq!(outcome.score(), DRAW_SCORE);

    let mut stalemate = board("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
    let outcome = negamax(
        &mut context(2, 2),
        &mut stalemate,
        &ChessMoveGenerator,
        &ChessEvaluator::default(),
        &ChessMoveOrderer::new(ChessMoveGenerator),
        2,
        Window::FULL,
    )
    .unwrap();
    assert_eq!(outcome.score(), DRAW_SCORE);
}

#[test]
fn test_root_still_moves_in_drawn_position() {
    let mut board = board("4k3/8/8/8/8/8/8/QQQ1K3 w - - 100 80");
    let result = search_best_move(&mut context(1, 0), &mut board).unwrap();
    assert!(result.best_move.is_some());
}

#[test]
fn test_chess_board_game_state() {
    let mut board = ChessBoard::default();
    assert!(board.is_maximizing_player());
    assert_eq!(GameState::piece_count(&board), 32);

    board
        .make_move(mv(Square::E2, Square::E4), MoveMode::InSearch)
        .unwrap();
    assert!(!board.is_maximizing_player());
    assert_eq!(GameState::ply_count(&board), 1);
}

#[test]
fn test_generator_matches_legal_moves() {
    let mut board = board(ITALIAN);
    let moves = ChessMoveGenerator.generate_moves(&mut board);
    assert_eq!(moves.len(), board.legal_move_count());
    assert!(moves.contains(&mv(Square::E1, Square::G1)));
}
