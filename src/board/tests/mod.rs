//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `fen.rs` - FEN parse/emit
//! - `make_unmake.rs` - Make/unmake move correctness
//! - `edge_cases.rs` - Special positions and edge cases
//! - `nnue.rs` - NNUE network, accumulator stack, coherence with refresh
//! - `proptest.rs` - Property-based tests over scripted games

mod fen;

use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::board::nnue::{NnueNetwork, HIDDEN_SIZE, INPUT_SIZE};
use crate::board::{Board, Color, Piece, RevertToken, Square};

/// Parse coordinate notation ("e2e4", "a7a8q") into move components.
pub(crate) fn parse_coord(mv: &str) -> (Square, Square, Option<Piece>) {
    let from: Square = mv[0..2].parse().expect("bad from square");
    let to: Square = mv[2..4].parse().expect("bad to square");
    let promotion = mv
        .chars()
        .nth(4)
        .map(|c| Piece::from_char(c).expect("bad promotion piece"));
    (from, to, promotion)
}

/// Apply a move given in coordinate notation.
pub(crate) fn play(board: &mut Board, mv: &str) -> RevertToken {
    let (from, to, promotion) = parse_coord(mv);
    board.make_move(from, to, promotion)
}

/// Structural invariant audit: piece boards pairwise disjoint and equal
/// to occupancy when unioned, mailbox in agreement everywhere, one king
/// per side, hash and material recomputable.
pub(crate) fn assert_consistent(board: &Board) {
    let map = &board.map;

    for color in [Color::White, Color::Black] {
        let mut union = 0u64;
        for piece_bb in &map.pieces[color.index()] {
            assert_eq!(union & piece_bb.0, 0, "piece boards overlap for {color}");
            union |= piece_bb.0;
        }
        assert_eq!(
            union,
            map.occupancy[color.index()].0,
            "occupancy out of sync for {color}"
        );
    }
    assert_eq!(
        map.occupancy[0].0 & map.occupancy[1].0,
        0,
        "colors overlap"
    );

    const PIECES: [Piece; 6] = [
        Piece::Pawn,
        Piece::Knight,
        Piece::Bishop,
        Piece::Rook,
        Piece::Queen,
        Piece::King,
    ];
    for sq in 0..64 {
        let mut expected = None;
        for color in [Color::White, Color::Black] {
            for (p_idx, piece) in PIECES.iter().enumerate() {
                if map.pieces[color.index()][p_idx].contains(Square::from_index(sq)) {
                    expected = Some((color, *piece));
                }
            }
        }
        assert_eq!(map.squares[sq], expected, "mailbox desync at index {sq}");
    }

    assert_eq!(board.pieces_of(Piece::King, Color::White).popcount(), 1);
    assert_eq!(board.pieces_of(Piece::King, Color::Black).popcount(), 1);

    assert_eq!(map.hash, map.recompute_hash(), "hash drifted");
    assert_eq!(
        (map.md_early, map.md_late),
        map.recompute_material(),
        "material drifted"
    );
}

/// A scripted pseudo-legal game: optional starting FEN plus coordinate
/// moves. The crate has no move generator, so walk tests replay these.
pub(crate) struct ScriptedGame {
    pub(crate) fen: Option<&'static str>,
    pub(crate) moves: &'static [&'static str],
}

/// Morphy's Opera game: captures, pins, a queenside castle.
pub(crate) const OPERA_GAME: ScriptedGame = ScriptedGame {
    fen: None,
    moves: &[
        "e2e4", "e7e5", "g1f3", "d7d6", "d2d4", "c8g4", "d4e5", "g4f3", "d1f3", "d6e5", "f1c4",
        "g8f6", "f3b3", "d8e7", "b1c3", "c7c6", "c1g5", "b7b5", "c3b5", "c6b5", "c4b5", "b8d7",
        "e1c1", "a8d8", "d1d7", "d8d7", "h1d1", "e7e6", "b5d7", "f6d7", "b3b8", "d7b8", "d1d8",
    ],
};

/// En-passant capture and both kingside castles.
pub(crate) const EP_AND_CASTLES: ScriptedGame = ScriptedGame {
    fen: None,
    moves: &[
        "e2e4", "a7a6", "e4e5", "d7d5", "e5d6", "c7d6", "g1f3", "g8f6", "f1e2", "f8e7", "e1g1",
        "e8g8", "d2d4", "d6d5", "f3e5", "b8c6", "e5c6", "b7c6", "b1c3", "c8e6",
    ],
};

/// Both sides promote.
pub(crate) const PROMOTION_RACE: ScriptedGame = ScriptedGame {
    fen: Some("8/P6k/8/8/8/8/p6K/8 w - - 0 1"),
    moves: &["a7a8q", "a2a1q", "a8b8", "a1b1", "b8b1", "h7g6"],
};

pub(crate) const SCRIPTED_GAMES: [&ScriptedGame; 3] =
    [&OPERA_GAME, &EP_AND_CASTLES, &PROMOTION_RACE];

pub(crate) fn game_start(game: &ScriptedGame) -> Board {
    game.fen.map_or_else(Board::new, Board::from_fen)
}

/// Deterministic pattern network for accumulator and evaluation tests.
/// Weights are small enough that no accumulator or output saturates.
pub(crate) static TEST_NET: Lazy<Arc<NnueNetwork>> = Lazy::new(|| {
    let mut feature_weights = Box::new([[0i16; HIDDEN_SIZE]; INPUT_SIZE]);
    for (i, row) in feature_weights.iter_mut().enumerate() {
        for (j, w) in row.iter_mut().enumerate() {
            *w = ((i * 31 + j * 7) % 97) as i16 - 48;
        }
    }
    let mut feature_bias = [0i16; HIDDEN_SIZE];
    for (j, b) in feature_bias.iter_mut().enumerate() {
        *b = (j % 53) as i16 - 26;
    }
    let mut output_weights = [0i16; 2 * HIDDEN_SIZE];
    for (j, w) in output_weights.iter_mut().enumerate() {
        *w = (j % 41) as i16 - 20;
    }
    Arc::new(NnueNetwork {
        feature_weights,
        feature_bias,
        output_weights,
        output_bias: 123,
    })
});
