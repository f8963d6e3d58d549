//! Attack detection over the tile grid
//!
//! This is the primitive every legality check funnels through, so the ray walks stop
//! at the first blocker and nothing is allocated.

use crate::board::Board;
use tapchess_base::geometry::{self, Delta, DIAGONAL, KNIGHT_JUMPS, STRAIGHT};
use tapchess_base::types::{Coord, PieceKind, Team};

/// Returns `true` iff `loc` is attacked by a piece of team `by`
///
/// A square equal to `ignoring` is treated as vacant, which lets callers ask whether a
/// square would still be safe after the piece standing on `ignoring` moves away.
pub fn is_attacked(board: &Board, loc: Coord, by: Team, ignoring: Option<Coord>) -> bool {
    knight_attack(board, loc, by)
        || ray_attack(board, loc, by, ignoring, &DIAGONAL, true)
        || ray_attack(board, loc, by, ignoring, &STRAIGHT, false)
}

fn knight_attack(board: &Board, loc: Coord, by: Team) -> bool {
    KNIGHT_JUMPS
        .iter()
        .filter_map(|&d| loc.stepped(d))
        .any(|c| board.contains(by, &[PieceKind::Knight], c))
}

fn ray_attack(
    board: &Board,
    loc: Coord,
    by: Team,
    ignoring: Option<Coord>,
    dirs: &[Delta; 4],
    diagonal: bool,
) -> bool {
    let sliders: [PieceKind; 2] = if diagonal {
        [PieceKind::Bishop, PieceKind::Queen]
    } else {
        [PieceKind::Rook, PieceKind::Queen]
    };
    for &dir in dirs {
        let near = match board.first_piece_along_ray(loc, dir, ignoring) {
            Some(c) => c,
            None => continue,
        };
        if board.contains(by, &sliders, near) {
            return true;
        }
        // A king only reaches one step along the ray, a pawn only one step along its
        // own attack diagonals; both must therefore sit adjacent to `loc`.
        if board.contains(by, &[PieceKind::King], near) && geometry::are_adjacent(near, loc) {
            return true;
        }
        if diagonal && board.contains(by, &[PieceKind::Pawn], near) && pawn_threatens(near, loc, by)
        {
            return true;
        }
    }
    false
}

fn pawn_threatens(pawn: Coord, target: Coord, team: Team) -> bool {
    geometry::pawn_attack_deltas(team)
        .iter()
        .any(|&d| pawn.stepped(d) == Some(target))
}

/// Walks from `from` in direction `dir`, checking that no visited square is attacked
/// by `by`
///
/// The walk starts at `from` itself and succeeds when `stop` matches the square about
/// to be visited, or when the ray leaves the board. It fails as soon as a visited
/// square is attacked. Castling generation uses this for the "king never crosses an
/// attacked square" rule; starting at the king's own square also rejects castling out
/// of check.
pub fn ray_safe_until<F>(board: &Board, from: Coord, dir: Delta, stop: F, by: Team) -> bool
where
    F: Fn(Coord) -> bool,
{
    let mut cur = from;
    loop {
        if stop(cur) {
            return true;
        }
        if is_attacked(board, cur, by, None) {
            return false;
        }
        match cur.stepped(dir) {
            Some(next) => cur = next,
            None => return true,
        }
    }
}
