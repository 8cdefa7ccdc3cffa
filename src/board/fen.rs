//! FEN import and export.
//!
//! The core reads and writes the four position fields (placement, side
//! to move, castling rights, en-passant target). Trailing move-clock
//! fields are tolerated on input and dropped; output never carries
//! them.

use std::str::FromStr;

use super::error::FenError;
use super::map::BitboardMap;
use super::types::{
    Color, Piece, Square, CASTLE_BLACK_K, CASTLE_BLACK_Q, CASTLE_WHITE_K, CASTLE_WHITE_Q,
};
use super::Board;

impl Board {
    /// Build a board from a FEN record.
    pub fn try_from_fen(fen: &str) -> Result<Self, FenError> {
        let mut fields = fen.split_whitespace();
        let (Some(placement), Some(side), Some(castling), Some(ep)) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(FenError::MissingFields);
        };

        let mut map = BitboardMap::empty();

        // Walk the placement field with a rank/file cursor, rank 8 first.
        let mut rank = 7usize;
        let mut file = 0usize;
        for c in placement.chars() {
            match c {
                '/' => {
                    if rank == 0 {
                        return Err(FenError::ExtraRank);
                    }
                    rank -= 1;
                    file = 0;
                }
                '1'..='8' => file += c as usize - '0' as usize,
                _ => {
                    let piece = Piece::from_char(c).ok_or(FenError::BadPieceChar(c))?;
                    if file > 7 {
                        return Err(FenError::RankOverflow { rank: rank + 1 });
                    }
                    let color = if c.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    map.insert(Square::new(rank, file), color, piece);
                    file += 1;
                }
            }
        }

        map.side_to_move = match side {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::BadSideToMove(other.to_string())),
        };

        if castling != "-" {
            for c in castling.chars() {
                map.castling_rights |= match c {
                    'K' => CASTLE_WHITE_K,
                    'Q' => CASTLE_WHITE_Q,
                    'k' => CASTLE_BLACK_K,
                    'q' => CASTLE_BLACK_Q,
                    _ => return Err(FenError::BadCastlingChar(c)),
                };
            }
        }

        if ep != "-" {
            let target = ep
                .parse::<Square>()
                .map_err(|_| FenError::BadEnPassant(ep.to_string()))?;
            map.ep_target = Some(target);
        }

        map.hash = map.recompute_hash();
        Ok(Board { map })
    }

    /// Build a board from a FEN record.
    ///
    /// # Panics
    /// Panics on malformed input; prefer `try_from_fen` where the input
    /// is untrusted.
    #[must_use]
    pub fn from_fen(fen: &str) -> Self {
        match Self::try_from_fen(fen) {
            Ok(board) => board,
            Err(err) => panic!("bad FEN: {err}"),
        }
    }

    /// Render the position as the four core FEN fields.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut out = String::with_capacity(64);

        for rank in (0..8).rev() {
            let mut run = 0u8;
            for file in 0..8 {
                if let Some((color, piece)) = self.at(Square::new(rank, file)) {
                    if run > 0 {
                        out.push((b'0' + run) as char);
                        run = 0;
                    }
                    out.push(piece.to_fen_char(color));
                } else {
                    run += 1;
                }
            }
            if run > 0 {
                out.push((b'0' + run) as char);
            }
            if rank > 0 {
                out.push('/');
            }
        }

        out.push(' ');
        out.push(match self.color_to_move() {
            Color::White => 'w',
            Color::Black => 'b',
        });

        out.push(' ');
        let letters = [
            (CASTLE_WHITE_K, 'K'),
            (CASTLE_WHITE_Q, 'Q'),
            (CASTLE_BLACK_K, 'k'),
            (CASTLE_BLACK_Q, 'q'),
        ];
        let before = out.len();
        for (bit, letter) in letters {
            if self.map.castling_rights & bit != 0 {
                out.push(letter);
            }
        }
        if out.len() == before {
            out.push('-');
        }

        out.push(' ');
        match self.ep_target() {
            Some(sq) => out.push_str(&sq.to_string()),
            None => out.push('-'),
        }

        out
    }
}

impl FromStr for Board {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::try_from_fen(s)
    }
}
