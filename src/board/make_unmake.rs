//! Make and unmake moves.
//!
//! `make_move` applies a pseudo-legal move and returns a `RevertToken`;
//! `undo_move` reverses exactly that move. The Zobrist hash is folded
//! incrementally inside both directions, so a make/unmake pair restores
//! the hash bit-for-bit without snapshotting it.
//!
//! The NNUE-coupled variant pushes a fresh accumulator frame and emits
//! one activate/deactivate per toggled feature; unmake restores the
//! evaluator by popping the frame, never by replaying toggles.

use crate::zobrist::ZOBRIST;

use super::nnue::Nnue;
use super::types::{castle_bit, Color, Piece, Square};
use super::{Board, RevertToken};

impl Board {
    /// Apply a pseudo-legal move.
    ///
    /// `from` must hold a piece of the side to move; `promotion` must be
    /// `None` or one of knight/bishop/rook/queen on a legal promotion
    /// move. Legality with respect to king safety is not checked.
    pub fn make_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<Piece>,
    ) -> RevertToken {
        self.make_move_inner(from, to, promotion, None)
    }

    /// `make_move`, additionally keeping the NNUE evaluator in sync.
    ///
    /// A fresh accumulator frame is pushed before any feature toggles,
    /// so the caller unwinds the evaluator with `Nnue::pop` (or
    /// `undo_move_nnue`) when taking the move back.
    pub fn make_move_nnue(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<Piece>,
        nnue: &mut Nnue,
    ) -> RevertToken {
        nnue.push();
        self.make_move_inner(from, to, promotion, Some(nnue))
    }

    fn make_move_inner(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<Piece>,
        mut nnue: Option<&mut Nnue>,
    ) -> RevertToken {
        let (color, piece) = self.map.at(from).expect("make_move 'from' empty");
        debug_assert_eq!(color, self.map.side_to_move, "moving out of turn");
        let target = self.map.at(to);

        let mut token = RevertToken {
            from,
            to,
            captured: None,
            en_passant_victim: None,
            was_promotion: false,
            rook_slide: None,
            previous_castling_rights: self.map.castling_rights,
            previous_en_passant_target: self.map.ep_target,
            previous_side_to_move: self.map.side_to_move,
        };

        // Direct capture
        if let Some((cap_color, cap_piece)) = target {
            token.captured = target;
            if let Some(n) = nnue.as_deref_mut() {
                n.deactivate(cap_piece, cap_color, to);
            }
        }

        // En-passant capture: the victim sits behind the target square
        if piece == Piece::Pawn && Some(to) == self.map.ep_target {
            let victim_color = color.opponent();
            let victim_sq = match color {
                Color::White => to.south(),
                Color::Black => to.north(),
            };
            self.map.remove(Piece::Pawn, victim_color, victim_sq);
            token.en_passant_victim = Some(victim_color);
            if let Some(n) = nnue.as_deref_mut() {
                n.deactivate(Piece::Pawn, victim_color, victim_sq);
            }
        }

        // Retire the old en-passant hash term
        if let Some(old_ep) = self.map.ep_target {
            self.map.hash ^= ZOBRIST.en_passant[old_ep.file()];
        }

        // A double pawn push arms a new en-passant target
        if piece == Piece::Pawn && from.as_index().abs_diff(to.as_index()) == 16 {
            let ep_sq = match color {
                Color::White => from.north(),
                Color::Black => from.south(),
            };
            self.map.ep_target = Some(ep_sq);
            self.map.hash ^= ZOBRIST.en_passant[ep_sq.file()];
        } else {
            self.map.ep_target = None;
        }

        // Primary mutation
        self.map.move_piece(piece, color, target, from, to);
        if let Some(n) = nnue.as_deref_mut() {
            n.deactivate(piece, color, from);
            n.activate(piece, color, to);
        }

        // Promotion swaps the arrived pawn for the chosen piece
        if let Some(promoted) = promotion {
            debug_assert!(piece == Piece::Pawn, "promotion flag on non-pawn");
            debug_assert!(
                !matches!(promoted, Piece::Pawn | Piece::King),
                "invalid promotion piece"
            );
            self.map.remove(Piece::Pawn, color, to);
            self.map.insert(to, color, promoted);
            token.was_promotion = true;
            if let Some(n) = nnue.as_deref_mut() {
                n.deactivate(Piece::Pawn, color, to);
                n.activate(promoted, color, to);
            }
        }

        // Castling rights: retire the whole key set, adjust, re-fold
        self.map.hash ^= ZOBRIST.castling_fold(self.map.castling_rights);

        if piece == Piece::Rook {
            if from.file() == 0 {
                self.map.castling_rights &= !castle_bit(color, false);
            } else if from.file() == 7 {
                self.map.castling_rights &= !castle_bit(color, true);
            }
        }

        if piece == Piece::King {
            self.map.castling_rights &= !castle_bit(color, true);
            self.map.castling_rights &= !castle_bit(color, false);

            // A two-file king move is a castle; slide the rook too
            if from.as_index().abs_diff(to.as_index()) == 2 {
                let (rook_from, rook_to) = if to > from {
                    (Square::from_index(to.as_index() + 1), Square::from_index(to.as_index() - 1))
                } else {
                    (Square::from_index(to.as_index() - 2), Square::from_index(to.as_index() + 1))
                };
                let rook = self.map.at(rook_from).expect("castling without rook");
                assert_eq!(rook, (color, Piece::Rook), "castling rook mismatch");
                self.map.move_piece(Piece::Rook, color, None, rook_from, rook_to);
                token.rook_slide = Some((rook_from, rook_to));
                if let Some(n) = nnue.as_deref_mut() {
                    n.deactivate(Piece::Rook, color, rook_from);
                    n.activate(Piece::Rook, color, rook_to);
                }
            }
        }

        // A rook captured on its original corner takes that right with it
        if let Some((_, Piece::Rook)) = target {
            match to.as_index() {
                0 => self.map.castling_rights &= !castle_bit(Color::White, false),
                7 => self.map.castling_rights &= !castle_bit(Color::White, true),
                56 => self.map.castling_rights &= !castle_bit(Color::Black, false),
                63 => self.map.castling_rights &= !castle_bit(Color::Black, true),
                _ => {}
            }
        }

        self.map.hash ^= ZOBRIST.castling_fold(self.map.castling_rights);

        // Side to move
        self.map.side_to_move = self.map.side_to_move.opponent();
        self.map.hash ^= ZOBRIST.black_to_move;

        token
    }

    /// Reverse the move recorded by `token`. Tokens must be consumed in
    /// LIFO order relative to their `make_move` calls.
    ///
    /// NNUE users additionally pop the accumulator frame pushed by
    /// `make_move_nnue`; see `undo_move_nnue`.
    pub fn undo_move(&mut self, token: &RevertToken) {
        // Castling rights back, re-folding their hash contribution
        self.map.hash ^= ZOBRIST.castling_fold(self.map.castling_rights);
        self.map.castling_rights = token.previous_castling_rights;
        self.map.hash ^= ZOBRIST.castling_fold(self.map.castling_rights);

        // En-passant target back
        if let Some(ep) = self.map.ep_target {
            self.map.hash ^= ZOBRIST.en_passant[ep.file()];
        }
        self.map.ep_target = token.previous_en_passant_target;
        if let Some(ep) = self.map.ep_target {
            self.map.hash ^= ZOBRIST.en_passant[ep.file()];
        }

        // Side to move back
        self.map.side_to_move = token.previous_side_to_move;
        self.map.hash ^= ZOBRIST.black_to_move;

        // Demote a promoted piece back to the pawn that moved
        if token.was_promotion {
            let (color, piece) = self.map.at(token.to).expect("undo: promoted piece missing");
            self.map.remove(piece, color, token.to);
            self.map.insert(token.to, color, Piece::Pawn);
        }

        // Walk the moving piece home; the origin square is vacant
        let (color, piece) = self.map.at(token.to).expect("undo: 'to' square empty");
        self.map.move_piece(piece, color, None, token.to, token.from);

        if let Some(victim_color) = token.en_passant_victim {
            let victim_sq = match victim_color {
                Color::White => token.to.north(),
                Color::Black => token.to.south(),
            };
            self.map.insert(victim_sq, victim_color, Piece::Pawn);
            return;
        }

        if let Some((cap_color, cap_piece)) = token.captured {
            self.map.insert(token.to, cap_color, cap_piece);
            return;
        }

        if let Some((rook_from, rook_to)) = token.rook_slide {
            self.map.slide(rook_to, rook_from);
        }
    }

    /// `undo_move` plus the matching accumulator pop.
    pub fn undo_move_nnue(&mut self, token: &RevertToken, nnue: &mut Nnue) {
        self.undo_move(token);
        nnue.pop();
    }
}
