use super::map::BitboardMap;
use super::types::{Bitboard, Color, Piece, Square};
use super::{castle_bit, ALL_CASTLING_RIGHTS};

/// Snapshot taken by `make_move`, sufficient to reverse exactly one move.
#[derive(Clone, Debug)]
pub struct RevertToken {
    pub(crate) from: Square,
    pub(crate) to: Square,
    /// Directly captured piece, if any. En-passant victims are recorded
    /// through `en_passant_victim` instead.
    pub(crate) captured: Option<(Color, Piece)>,
    pub(crate) en_passant_victim: Option<Color>,
    pub(crate) was_promotion: bool,
    /// Secondary rook move of a castle: (from, to).
    pub(crate) rook_slide: Option<(Square, Square)>,
    pub(crate) previous_castling_rights: u8,
    pub(crate) previous_en_passant_target: Option<Square>,
    pub(crate) previous_side_to_move: Color,
}

impl RevertToken {
    /// The move's origin square.
    #[must_use]
    pub fn from(&self) -> Square {
        self.from
    }

    /// The move's destination square.
    #[must_use]
    pub fn to(&self) -> Square {
        self.to
    }

    /// The directly captured piece, if the move was a capture.
    #[must_use]
    pub fn captured(&self) -> Option<(Color, Piece)> {
        self.captured
    }

    /// True if the move captured a pawn en passant.
    #[must_use]
    pub fn was_en_passant(&self) -> bool {
        self.en_passant_victim.is_some()
    }

    /// Color of the pawn removed by an en-passant capture.
    #[must_use]
    pub fn en_passant_victim(&self) -> Option<Color> {
        self.en_passant_victim
    }

    /// True if the move promoted a pawn.
    #[must_use]
    pub fn was_promotion(&self) -> bool {
        self.was_promotion
    }

    /// The castle's secondary rook move as (from, to), if the move was
    /// a castle.
    #[must_use]
    pub fn rook_slide(&self) -> Option<(Square, Square)> {
        self.rook_slide
    }
}

/// The position core: a mutable chess board with incremental Zobrist
/// hashing and tapered material bookkeeping.
///
/// Boards are built from FEN or cloned, and mutated in place through
/// `make_move`/`undo_move`. The board performs no legality checking
/// beyond its own invariants; move generation and king-safety are the
/// caller's responsibility.
#[derive(Clone, Debug)]
pub struct Board {
    pub(crate) map: BitboardMap,
}

impl Board {
    /// The standard starting position.
    #[must_use]
    pub fn new() -> Self {
        let mut map = BitboardMap::empty();
        let back_rank = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        for (file, piece) in back_rank.iter().enumerate() {
            map.insert(Square::new(0, file), Color::White, *piece);
            map.insert(Square::new(7, file), Color::Black, *piece);
            map.insert(Square::new(1, file), Color::White, Piece::Pawn);
            map.insert(Square::new(6, file), Color::Black, Piece::Pawn);
        }

        map.castling_rights = ALL_CASTLING_RIGHTS;
        map.side_to_move = Color::White;
        map.hash = map.recompute_hash();
        Board { map }
    }

    /// Piece and color on a square, `None` if empty.
    #[inline]
    #[must_use]
    pub fn at(&self, sq: Square) -> Option<(Color, Piece)> {
        self.map.at(sq)
    }

    /// Get just the piece type on a square (without color)
    #[must_use]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.map.at(sq).map(|(_, piece)| piece)
    }

    /// Get just the color of the piece on a square
    #[must_use]
    pub fn color_on(&self, sq: Square) -> Option<Color> {
        self.map.at(sq).map(|(color, _)| color)
    }

    /// True if the square holds no piece.
    #[inline]
    #[must_use]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.map.is_empty(sq)
    }

    /// All occupied squares.
    #[inline]
    #[must_use]
    pub fn all_occupied(&self) -> Bitboard {
        self.map.all_occupied()
    }

    /// Squares occupied by one side.
    #[inline]
    #[must_use]
    pub fn occupancy_of(&self, color: Color) -> Bitboard {
        self.map.occupancy[color.index()]
    }

    /// Squares holding a given colored piece.
    #[inline]
    #[must_use]
    pub fn pieces_of(&self, piece: Piece, color: Color) -> Bitboard {
        self.map.pieces[color.index()][piece.index()]
    }

    /// The king square of a side.
    ///
    /// # Panics
    /// Panics if the side has no king; such a position is corrupt and
    /// must never be reached by search.
    #[must_use]
    pub fn king_of(&self, color: Color) -> Square {
        self.pieces_of(Piece::King, color)
            .into_iter()
            .next()
            .expect("position has no king")
    }

    /// Castling rights of a side as (queenside, kingside).
    #[must_use]
    pub fn castling_rights_of(&self, color: Color) -> (bool, bool) {
        (
            self.map.castling_rights & castle_bit(color, false) != 0,
            self.map.castling_rights & castle_bit(color, true) != 0,
        )
    }

    /// The side to move.
    #[inline]
    #[must_use]
    pub fn color_to_move(&self) -> Color {
        self.map.side_to_move
    }

    /// The en-passant target square, if the previous half-move was a
    /// double pawn push.
    #[inline]
    #[must_use]
    pub fn ep_target(&self) -> Option<Square> {
        self.map.ep_target
    }

    /// The incrementally maintained Zobrist hash.
    #[inline]
    #[must_use]
    pub fn zobrist_hash(&self) -> u64 {
        self.map.hash
    }

    /// White-positive material + PSQT score for the early game.
    #[inline]
    #[must_use]
    pub fn material_eval_early(&self) -> i32 {
        self.map.md_early
    }

    /// White-positive material + PSQT score for the late game.
    #[inline]
    #[must_use]
    pub fn material_eval_late(&self) -> i32 {
        self.map.md_late
    }

    /// Place a piece on an empty square, keeping hash and material in
    /// lockstep. Position-editing entry point for front-ends.
    pub fn insert_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        self.map.insert(sq, color, piece);
    }

    /// Remove the given piece from its square, keeping hash and
    /// material in lockstep.
    pub fn remove_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        self.map.remove(piece, color, sq);
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}
