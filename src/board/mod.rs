//! Chess position core.
//!
//! Bitboard board state with an incremental update protocol: make/unmake
//! with Zobrist hash maintenance, tapered material bookkeeping, FEN I/O,
//! and an efficiently-updatable neural-network evaluator whose feature
//! activations stay synchronized with every board mutation.
//!
//! Move generation, search and the UCI front-end live outside this
//! crate and drive it through [`Board`] and [`nnue::Nnue`].
//!
//! # Example
//! ```
//! use chess_core::board::{Board, Color, Piece, Square};
//!
//! let mut board = Board::new();
//! let token = board.make_move("e2".parse().unwrap(), "e4".parse().unwrap(), None);
//! assert_eq!(board.color_to_move(), Color::Black);
//! board.undo_move(&token);
//! assert_eq!(board.at(Square::new(1, 4)), Some((Color::White, Piece::Pawn)));
//! ```

mod error;
mod fen;
mod make_unmake;
mod map;
pub mod nnue;
mod pst;
mod state;
mod types;

#[cfg(test)]
mod tests;

// Public API - types users need
pub use error::{FenError, NetworkError, SquareError};
pub use state::{Board, RevertToken};
pub use types::{Bitboard, Color, Piece, Square, Squares};

pub(crate) use types::{castle_bit, ALL_CASTLING_RIGHTS};
