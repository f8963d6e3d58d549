use crate::types::{Coord, Team, BOARD_SIZE};

use derive_more::Neg;

/// A step on the board, measured in rows and columns
#[derive(Debug, Copy, Clone, PartialEq, Eq, Neg)]
pub struct Delta {
    pub row: isize,
    pub col: isize,
}

const fn d(row: isize, col: isize) -> Delta {
    Delta { row, col }
}

/// The four orthogonal ray directions
pub const STRAIGHT: [Delta; 4] = [d(1, 0), d(-1, 0), d(0, -1), d(0, 1)];

/// The four diagonal ray directions
pub const DIAGONAL: [Delta; 4] = [d(1, 1), d(-1, -1), d(1, -1), d(-1, 1)];

/// The eight king steps, i.e. the offsets of the adjacent tiles
pub const KING_STEPS: [Delta; 8] = [
    d(1, -1),
    d(1, 0),
    d(1, 1),
    d(0, -1),
    d(0, 1),
    d(-1, -1),
    d(-1, 0),
    d(-1, 1),
];

/// The eight knight jump offsets
pub const KNIGHT_JUMPS: [Delta; 8] = [
    d(1, 2),
    d(2, 1),
    d(1, -2),
    d(2, -1),
    d(-1, 2),
    d(-2, 1),
    d(-1, -2),
    d(-2, -1),
];

/// Column of both kings in the starting position
pub const KING_COLUMN: usize = 4;

impl Coord {
    /// Offsets the coordinate by `delta`, answering `None` off the board
    #[inline]
    pub fn stepped(self, delta: Delta) -> Option<Coord> {
        self.try_shift(delta.row, delta.col)
    }
}

/// Returns the advance direction of the team's pawns
///
/// White pawns move toward decreasing rows, Black pawns mirror it.
pub const fn pawn_forward(team: Team) -> Delta {
    match team {
        Team::White => d(-1, 0),
        Team::Black => d(1, 0),
    }
}

/// Returns the two diagonal steps on which the team's pawns capture
pub const fn pawn_attack_deltas(team: Team) -> [Delta; 2] {
    match team {
        Team::White => [d(-1, 1), d(-1, -1)],
        Team::Black => [d(1, 1), d(1, -1)],
    }
}

/// Returns the row holding the team's major pieces in the starting position
pub const fn back_row(team: Team) -> usize {
    match team {
        Team::White => BOARD_SIZE - 1,
        Team::Black => 0,
    }
}

/// Returns the row holding the team's pawns in the starting position
pub const fn pawn_row(team: Team) -> usize {
    match team {
        Team::White => BOARD_SIZE - 2,
        Team::Black => 1,
    }
}

/// Returns `true` iff the two coordinates are a king step (or less) apart
pub fn are_adjacent(a: Coord, b: Coord) -> bool {
    a.row().abs_diff(b.row()) < 2 && a.col().abs_diff(b.col()) < 2
}
