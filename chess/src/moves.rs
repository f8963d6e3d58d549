//! Moves and their application to the board

use std::fmt;

use tapchess_base::types::{Coord, Piece};

/// A move of a single piece, with the extra squares the special rules need
///
/// A plain relocation only fills `from` and `to`. A capture additionally records the
/// captured piece and where it stood: `capture_location` differs from `to` only for
/// en passant, where the captured pawn does not sit on the destination square.
/// Castling fills the secondary pair, which relocates the rook in the same move.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Move {
    from: Coord,
    to: Coord,
    secondary_from: Option<Coord>,
    secondary_to: Option<Coord>,
    captures: Option<Piece>,
    capture_location: Option<Coord>,
}

impl Move {
    /// Creates a plain relocation move
    pub const fn new(from: Coord, to: Coord) -> Move {
        Move {
            from,
            to,
            secondary_from: None,
            secondary_to: None,
            captures: None,
            capture_location: None,
        }
    }

    /// Creates a capture of the piece standing on the destination square
    pub const fn capture(from: Coord, to: Coord, captures: Piece) -> Move {
        Move {
            from,
            to,
            secondary_from: None,
            secondary_to: None,
            captures: Some(captures),
            capture_location: Some(to),
        }
    }

    /// Creates an en passant capture
    ///
    /// The move lands on `to`, the skipped square, while the captured pawn is removed
    /// from `capture_location`.
    pub const fn en_passant(from: Coord, to: Coord, captures: Piece, capture_location: Coord) -> Move {
        Move {
            from,
            to,
            secondary_from: None,
            secondary_to: None,
            captures: Some(captures),
            capture_location: Some(capture_location),
        }
    }

    /// Creates a castling move: the king travels `from` → `to`, the rook
    /// `secondary_from` → `secondary_to`
    pub const fn castling(
        from: Coord,
        to: Coord,
        secondary_from: Coord,
        secondary_to: Coord,
    ) -> Move {
        Move {
            from,
            to,
            secondary_from: Some(secondary_from),
            secondary_to: Some(secondary_to),
            captures: None,
            capture_location: None,
        }
    }

    /// Returns the source square
    #[inline]
    pub const fn from(&self) -> Coord {
        self.from
    }

    /// Returns the destination square
    #[inline]
    pub const fn to(&self) -> Coord {
        self.to
    }

    /// Returns the captured piece, if any
    #[inline]
    pub const fn captures(&self) -> Option<Piece> {
        self.captures
    }

    /// Returns the square the captured piece stood on, if any
    #[inline]
    pub const fn capture_location(&self) -> Option<Coord> {
        self.capture_location
    }

    /// Returns the rook relocation of a castling move, if any
    pub fn secondary(&self) -> Option<(Coord, Coord)> {
        self.secondary_from.zip(self.secondary_to)
    }

    /// Returns `true` iff the move captures a piece
    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.captures.is_some()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}{}", self.from, self.to)
    }
}
