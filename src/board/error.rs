//! Construction-time errors.
//!
//! Everything here is recoverable and surfaced as a `Result`: malformed
//! FEN, bad square coordinates, unusable weight files. Invariant
//! violations inside the move loop are fatal and panic instead.

use std::fmt;

/// Why a FEN record was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// Fewer than the four required fields (board, side, castling, ep).
    MissingFields,
    /// A character in the board field that names no piece.
    BadPieceChar(char),
    /// A rank descriptor that spills past the h-file.
    RankOverflow { rank: usize },
    /// More than eight rank descriptors.
    ExtraRank,
    /// A side-to-move field other than `w` or `b`.
    BadSideToMove(String),
    /// A castling letter outside `KQkq`.
    BadCastlingChar(char),
    /// An en-passant field that is neither `-` nor a board square.
    BadEnPassant(String),
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::MissingFields => f.write_str(
                "FEN needs four fields: placement, side to move, castling, en passant",
            ),
            FenError::BadPieceChar(c) => write!(f, "'{c}' is not a piece letter"),
            FenError::RankOverflow { rank } => {
                write!(f, "rank {rank} describes more than eight squares")
            }
            FenError::ExtraRank => f.write_str("board field has more than eight ranks"),
            FenError::BadSideToMove(s) => {
                write!(f, "side to move must be 'w' or 'b', not '{s}'")
            }
            FenError::BadCastlingChar(c) => write!(f, "'{c}' is not a castling right"),
            FenError::BadEnPassant(s) => write!(f, "'{s}' is not an en-passant square"),
        }
    }
}

impl std::error::Error for FenError {}

/// Why a square could not be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    /// Not a two-character algebraic name like `e4`.
    NotAlgebraic(String),
    /// A rank or file coordinate past the board edge.
    OffBoard { rank: usize, file: usize },
}

impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareError::NotAlgebraic(s) => {
                write!(f, "'{s}' is not a square in algebraic notation")
            }
            SquareError::OffBoard { rank, file } => {
                write!(f, "coordinates ({rank}, {file}) fall outside the board")
            }
        }
    }
}

impl std::error::Error for SquareError {}

/// Why an NNUE weight file could not be loaded.
#[derive(Debug)]
pub enum NetworkError {
    /// Reading the weight file failed
    Io(std::io::Error),
    /// The weight file is not the expected JSON document
    Parse(serde_json::Error),
    /// A weight tensor has the wrong dimensions
    Shape {
        field: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    },
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::Io(err) => write!(f, "Failed to read weight file: {err}"),
            NetworkError::Parse(err) => write!(f, "Failed to parse weight file: {err}"),
            NetworkError::Shape {
                field,
                expected,
                found,
            } => write!(
                f,
                "Weight tensor '{field}' has shape {found:?}, expected {expected:?}"
            ),
        }
    }
}

impl std::error::Error for NetworkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NetworkError::Io(err) => Some(err),
            NetworkError::Parse(err) => Some(err),
            NetworkError::Shape { .. } => None,
        }
    }
}

impl From<std::io::Error> for NetworkError {
    fn from(err: std::io::Error) -> Self {
        NetworkError::Io(err)
    }
}

impl From<serde_json::Error> for NetworkError {
    fn from(err: serde_json::Error) -> Self {
        NetworkError::Parse(err)
    }
}
