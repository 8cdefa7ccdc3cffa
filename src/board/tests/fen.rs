//! FEN parse/emit tests.

use super::assert_consistent;
use crate::board::{Board, Color, FenError, Piece, Square};

const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[test]
fn test_start_position_matches_default() {
    let parsed = Board::from_fen(START_FEN);
    let built = Board::new();
    assert_eq!(parsed.zobrist_hash(), built.zobrist_hash());
    assert_eq!(parsed.to_fen(), built.to_fen());
    assert_consistent(&parsed);
}

#[test]
fn test_start_position_hash_stable_and_nonzero() {
    let a = Board::from_fen(START_FEN);
    let b = Board::from_fen(START_FEN);
    assert_eq!(a.zobrist_hash(), b.zobrist_hash());
    assert_ne!(a.zobrist_hash(), 0);
}

#[test]
fn test_emit_four_fields() {
    let board = Board::new();
    assert_eq!(
        board.to_fen(),
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -"
    );
}

#[test]
fn test_round_trip_preserves_all_fields() {
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    let board = Board::from_fen(fen);
    let round = Board::from_fen(&board.to_fen());
    assert_eq!(board.zobrist_hash(), round.zobrist_hash());
    assert_eq!(board.to_fen(), round.to_fen());
    assert_eq!(board.color_to_move(), round.color_to_move());
    assert_eq!(board.ep_target(), round.ep_target());
    assert_eq!(board.material_eval_early(), round.material_eval_early());
    assert_eq!(board.material_eval_late(), round.material_eval_late());
}

#[test]
fn test_parse_en_passant_target() {
    let board = Board::from_fen("rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2");
    assert_eq!(board.ep_target(), Some(Square::new(5, 4)));
    assert!(board.to_fen().ends_with("e6"));
}

#[test]
fn test_parse_side_to_move() {
    let board = Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1");
    assert_eq!(board.color_to_move(), Color::Black);
}

#[test]
fn test_parse_partial_castling_rights() {
    let board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1");
    assert_eq!(board.castling_rights_of(Color::White), (false, true));
    assert_eq!(board.castling_rights_of(Color::Black), (true, false));
    assert!(board.to_fen().ends_with("w Kq -"));
}

#[test]
fn test_parse_no_castling_rights() {
    let board = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1");
    assert_eq!(board.castling_rights_of(Color::White), (false, false));
    assert_eq!(board.castling_rights_of(Color::Black), (false, false));
    assert!(board.to_fen().ends_with("w - -"));
}

#[test]
fn test_trailing_clock_fields_ignored() {
    let with = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 37 95");
    let without = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - -");
    assert_eq!(with.zobrist_hash(), without.zobrist_hash());
}

#[test]
fn test_parse_pieces() {
    let board = Board::from_fen("4k3/8/8/3nQ3/8/8/8/4K3 b - - 0 1");
    assert_eq!(board.at(Square::new(4, 3)), Some((Color::Black, Piece::Knight)));
    assert_eq!(board.at(Square::new(4, 4)), Some((Color::White, Piece::Queen)));
    assert!(board.is_empty(Square::new(4, 5)));
    assert_consistent(&board);
}

#[test]
fn test_error_missing_fields() {
    assert_eq!(
        Board::try_from_fen("4k3/8/8/8/8/8/8/4K3 w -").unwrap_err(),
        FenError::MissingFields
    );
    assert_eq!(Board::try_from_fen("").unwrap_err(), FenError::MissingFields);
}

#[test]
fn test_error_bad_piece_char() {
    assert_eq!(
        Board::try_from_fen("4x3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap_err(),
        FenError::BadPieceChar('x')
    );
}

#[test]
fn test_error_bad_side_to_move() {
    assert_eq!(
        Board::try_from_fen("4k3/8/8/8/8/8/8/4K3 z - - 0 1").unwrap_err(),
        FenError::BadSideToMove("z".to_string())
    );
}

#[test]
fn test_error_bad_castling_char() {
    assert_eq!(
        Board::try_from_fen("4k3/8/8/8/8/8/8/4K3 w X - 0 1").unwrap_err(),
        FenError::BadCastlingChar('X')
    );
}

#[test]
fn test_error_bad_en_passant() {
    for field in ["j9", "e", "e44"] {
        assert_eq!(
            Board::try_from_fen(&format!("4k3/8/8/8/8/8/8/4K3 w - {field} 0 1")).unwrap_err(),
            FenError::BadEnPassant(field.to_string())
        );
    }
}

#[test]
fn test_error_rank_overflow() {
    assert_eq!(
        Board::try_from_fen("ppppppppp/8/8/8/8/8/8/4K3 w - - 0 1").unwrap_err(),
        FenError::RankOverflow { rank: 8 }
    );
}

#[test]
fn test_error_extra_rank() {
    assert_eq!(
        Board::try_from_fen("4k3/8/8/8/8/8/8/8/4K3 w - - 0 1").unwrap_err(),
        FenError::ExtraRank
    );
}

#[test]
fn test_from_str_impl() {
    let board: Board = START_FEN.parse().unwrap();
    assert_eq!(board.zobrist_hash(), Board::new().zobrist_hash());
    assert!("not a fen".parse::<Board>().is_err());
}
