//! Bitboard position representation.
//!
//! `BitboardMap` holds the raw position state: twelve per-piece
//! bitboards, per-color occupancy, a mailbox cache for O(1) square
//! lookup, side to move, castling rights, the en-passant target, the
//! incrementally maintained Zobrist hash, and the tapered
//! material/PSQT scalars.
//!
//! Every mutator keeps all of these in lockstep. Callers guarantee the
//! documented preconditions; they are checked only with debug
//! assertions.

use crate::zobrist::ZOBRIST;

use super::pst::{pst_square, MATERIAL_EARLY, MATERIAL_LATE, PST_EARLY, PST_LATE};
use super::types::{Bitboard, Color, Piece, Square};

#[derive(Clone, Debug)]
pub(crate) struct BitboardMap {
    // pieces[color][piece]
    pub(crate) pieces: [[Bitboard; 6]; 2],
    pub(crate) occupancy: [Bitboard; 2],
    // mailbox cache, kept in lockstep with the bitboards
    pub(crate) squares: [Option<(Color, Piece)>; 64],
    pub(crate) side_to_move: Color,
    pub(crate) ep_target: Option<Square>,
    pub(crate) castling_rights: u8, // bitmask
    pub(crate) hash: u64,           // Zobrist hash
    // white-positive tapered material + PSQT scalars
    pub(crate) md_early: i32,
    pub(crate) md_late: i32,
}

impl BitboardMap {
    pub(crate) fn empty() -> Self {
        BitboardMap {
            pieces: [[Bitboard::EMPTY; 6]; 2],
            occupancy: [Bitboard::EMPTY; 2],
            squares: [None; 64],
            side_to_move: Color::White,
            ep_target: None,
            castling_rights: 0,
            hash: 0,
            md_early: 0,
            md_late: 0,
        }
    }

    /// Piece and color on a square, `None` if empty. Constant time via
    /// the mailbox.
    #[inline]
    pub(crate) fn at(&self, sq: Square) -> Option<(Color, Piece)> {
        self.squares[sq.as_index()]
    }

    #[inline]
    pub(crate) fn is_empty(&self, sq: Square) -> bool {
        self.squares[sq.as_index()].is_none()
    }

    #[inline]
    pub(crate) fn all_occupied(&self) -> Bitboard {
        self.occupancy[0] | self.occupancy[1]
    }

    /// Place a piece on an empty square, folding the Zobrist term and
    /// the tapered PSQT deltas into the running totals.
    pub(crate) fn insert(&mut self, sq: Square, color: Color, piece: Piece) {
        debug_assert!(self.is_empty(sq), "insert onto occupied {sq}");
        let bit = 1u64 << sq.as_index();
        let c_idx = color.index();
        let p_idx = piece.index();
        self.pieces[c_idx][p_idx].0 |= bit;
        self.occupancy[c_idx].0 |= bit;
        self.squares[sq.as_index()] = Some((color, piece));

        self.hash ^= ZOBRIST.piece_square[c_idx][p_idx][sq.as_index()];

        let is_white = color == Color::White;
        let pst = pst_square(sq.as_index(), is_white);
        let early = MATERIAL_EARLY[p_idx] + PST_EARLY[p_idx][pst];
        let late = MATERIAL_LATE[p_idx] + PST_LATE[p_idx][pst];
        if is_white {
            self.md_early += early;
            self.md_late += late;
        } else {
            self.md_early -= early;
            self.md_late -= late;
        }
    }

    /// Inverse of `insert`: remove the given piece from its square.
    pub(crate) fn remove(&mut self, piece: Piece, color: Color, sq: Square) {
        debug_assert_eq!(
            self.at(sq),
            Some((color, piece)),
            "empty of absent piece at {sq}"
        );
        let bit = 1u64 << sq.as_index();
        let c_idx = color.index();
        let p_idx = piece.index();
        self.pieces[c_idx][p_idx].0 &= !bit;
        self.occupancy[c_idx].0 &= !bit;
        self.squares[sq.as_index()] = None;

        self.hash ^= ZOBRIST.piece_square[c_idx][p_idx][sq.as_index()];

        let is_white = color == Color::White;
        let pst = pst_square(sq.as_index(), is_white);
        let early = MATERIAL_EARLY[p_idx] + PST_EARLY[p_idx][pst];
        let late = MATERIAL_LATE[p_idx] + PST_LATE[p_idx][pst];
        if is_white {
            self.md_early -= early;
            self.md_late -= late;
        } else {
            self.md_early += early;
            self.md_late += late;
        }
    }

    /// Atomic capture-or-move: clear the target (when occupied), then
    /// relocate the moving piece. Hash, PSQT, occupancy and mailbox all
    /// update inside the sequence.
    pub(crate) fn move_piece(
        &mut self,
        piece: Piece,
        color: Color,
        target: Option<(Color, Piece)>,
        from: Square,
        to: Square,
    ) {
        if let Some((cap_color, cap_piece)) = target {
            self.remove(cap_piece, cap_color, to);
        }
        self.remove(piece, color, from);
        self.insert(to, color, piece);
    }

    /// Short-form move of whatever sits on `from` to the empty square
    /// `to`. Used only to slide a castled rook home during unmake.
    pub(crate) fn slide(&mut self, from: Square, to: Square) {
        let (color, piece) = self.at(from).expect("slide from empty square");
        self.remove(piece, color, from);
        self.insert(to, color, piece);
    }

    /// Fold the full Zobrist hash from scratch. The incrementally
    /// maintained `hash` must always agree with this.
    pub(crate) fn recompute_hash(&self) -> u64 {
        let mut hash: u64 = 0;

        for sq in 0..64 {
            if let Some((color, piece)) = self.squares[sq] {
                hash ^= ZOBRIST.piece_square[color.index()][piece.index()][sq];
            }
        }

        if self.side_to_move == Color::Black {
            hash ^= ZOBRIST.black_to_move;
        }

        hash ^= ZOBRIST.castling_fold(self.castling_rights);

        if let Some(ep) = self.ep_target {
            hash ^= ZOBRIST.en_passant[ep.file()];
        }

        hash
    }

    /// Recompute the tapered material/PSQT scalars from scratch.
    pub(crate) fn recompute_material(&self) -> (i32, i32) {
        let mut early = 0;
        let mut late = 0;
        for sq in 0..64 {
            if let Some((color, piece)) = self.squares[sq] {
                let p_idx = piece.index();
                let is_white = color == Color::White;
                let pst = pst_square(sq, is_white);
                let e = MATERIAL_EARLY[p_idx] + PST_EARLY[p_idx][pst];
                let l = MATERIAL_LATE[p_idx] + PST_LATE[p_idx][pst];
                if is_white {
                    early += e;
                    late += l;
                } else {
                    early -= e;
                    late -= l;
                }
            }
        }
        (early, late)
    }
}
