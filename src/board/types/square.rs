//! Board squares.

use std::fmt;
use std::str::FromStr;

use crate::board::error::SquareError;

/// A board square, packed as an index 0..64.
///
/// Index = rank * 8 + file, so a1 = 0, b1 = 1, h8 = 63. Ordering
/// follows the index.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Square(u8);

impl Square {
    /// Pack a rank and file (both 0..8) into a square. Out-of-range
    /// coordinates wrap silently; use `TryFrom<(usize, usize)>` for
    /// checked construction.
    #[inline]
    #[must_use]
    pub const fn new(rank: usize, file: usize) -> Self {
        Square((rank << 3 | file) as u8)
    }

    /// Wrap a raw 0..64 index.
    #[inline]
    #[must_use]
    pub const fn from_index(idx: usize) -> Self {
        Square(idx as u8)
    }

    /// The raw 0..64 index.
    #[inline]
    #[must_use]
    pub const fn as_index(self) -> usize {
        self.0 as usize
    }

    /// Rank 0..8, counted from White's back rank.
    #[inline]
    #[must_use]
    pub const fn rank(self) -> usize {
        (self.0 >> 3) as usize
    }

    /// File 0..8, counted from the a-file.
    #[inline]
    #[must_use]
    pub const fn file(self) -> usize {
        (self.0 & 7) as usize
    }

    /// Mirror across the rank midline (a1 <-> a8).
    #[inline]
    #[must_use]
    pub const fn flip_vertical(self) -> Self {
        Square(self.0 ^ 56)
    }

    /// One rank toward rank 8.
    #[inline]
    #[must_use]
    pub(crate) const fn north(self) -> Self {
        Square(self.0 + 8)
    }

    /// One rank toward rank 1.
    #[inline]
    #[must_use]
    pub(crate) const fn south(self) -> Self {
        Square(self.0 - 8)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + (self.0 & 7)) as char;
        let rank = (b'1' + (self.0 >> 3)) as char;
        write!(f, "{file}{rank}")
    }
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let &[file, rank] = s.as_bytes() else {
            return Err(SquareError::NotAlgebraic(s.to_string()));
        };
        if !file.is_ascii_lowercase() || file > b'h' || !(b'1'..=b'8').contains(&rank) {
            return Err(SquareError::NotAlgebraic(s.to_string()));
        }
        Ok(Square((rank - b'1') * 8 + (file - b'a')))
    }
}

impl TryFrom<(usize, usize)> for Square {
    type Error = SquareError;

    fn try_from((rank, file): (usize, usize)) -> Result<Self, Self::Error> {
        if rank > 7 || file > 7 {
            return Err(SquareError::OffBoard { rank, file });
        }
        Ok(Square::new(rank, file))
    }
}
