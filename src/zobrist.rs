//! Zobrist hashing for chess positions.
//!
//! Provides incrementally-updatable 64-bit position hashes. The key table
//! is generated once from a fixed seed and is immutable afterwards, so it
//! can be shared by reference across any number of boards.

use once_cell::sync::Lazy;
use rand::prelude::*;

pub(crate) struct ZobristKeys {
    // piece_square[color][piece_type][square_index]
    pub(crate) piece_square: [[[u64; 64]; 6]; 2],
    pub(crate) black_to_move: u64,
    // castling[right]: 0=White K, 1=White Q, 2=Black K, 3=Black Q
    // (same bit order as the castling-rights mask)
    pub(crate) castling: [u64; 4],
    // en_passant[file_index] (only the file matters for the EP target)
    pub(crate) en_passant: [u64; 8],
}

impl ZobristKeys {
    fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(0x00C0_FFEE_D00D_5EED); // fixed seed for reproducibility
        let mut piece_square = [[[0; 64]; 6]; 2];
        let mut castling = [0; 4];
        let mut en_passant = [0; 8];

        for color in &mut piece_square {
            for piece in color.iter_mut() {
                for key in piece.iter_mut() {
                    *key = rng.gen();
                }
            }
        }

        let black_to_move = rng.gen();

        for key in &mut castling {
            *key = rng.gen();
        }

        for key in &mut en_passant {
            *key = rng.gen();
        }

        ZobristKeys {
            piece_square,
            black_to_move,
            castling,
            en_passant,
        }
    }

    /// XOR-fold of the keys for every right set in a castling mask.
    #[inline]
    pub(crate) fn castling_fold(&self, rights: u8) -> u64 {
        let mut fold = 0;
        for (bit, key) in self.castling.iter().enumerate() {
            if rights & (1 << bit) != 0 {
                fold ^= key;
            }
        }
        fold
    }
}

// Initialized lazily on first use, read-only afterwards.
pub(crate) static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::new);
