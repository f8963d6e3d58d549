//! Pseudo-legal and legal move generation
//!
//! The per-piece enumerators produce pseudo-legal moves: consistent with the piece's
//! movement pattern and the board occupancy, but not yet checked against the "does not
//! expose the own king" rule. [`legal_moves`] applies that filter by replaying each
//! candidate on a scratch copy of the board. King moves are the exception: they filter
//! themselves during generation, since the generic filter assumes the king stays put.

use std::ops::{Deref, DerefMut};
use std::slice;

use arrayvec::ArrayVec;

use crate::attack;
use crate::board::{self, Board};
use crate::moves::Move;
use tapchess_base::geometry::{self, Delta, DIAGONAL, KNIGHT_JUMPS, STRAIGHT};
use tapchess_base::types::{Coord, Piece, PieceKind};

/// Upper bound on the number of moves a single piece can have: a centrally placed
/// queen reaches 27 squares.
const MAX_PIECE_MOVES: usize = 28;

/// List of moves of a single piece, stored inline
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct MoveList(ArrayVec<Move, MAX_PIECE_MOVES>);

impl MoveList {
    pub fn new() -> MoveList {
        MoveList(ArrayVec::new())
    }
}

impl Deref for MoveList {
    type Target = ArrayVec<Move, MAX_PIECE_MOVES>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for MoveList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Pushes either a quiet move or a capture of whatever stands on `to`
fn push_move(board: &Board, from: Coord, to: Coord, out: &mut MoveList) {
    match board.get(to) {
        Some(&target) => out.push(Move::capture(from, to, target)),
        None => out.push(Move::new(from, to)),
    }
}

/// Enumerates the pawn's pseudo-legal moves
///
/// `last_move` is the immediately preceding move of the game, which alone decides
/// en passant eligibility.
pub fn pawn_moves(
    board: &Board,
    from: Coord,
    piece: &Piece,
    last_move: Option<&Move>,
    out: &mut MoveList,
) {
    let forward = geometry::pawn_forward(piece.team());

    // The single step must come first: the double step below reuses its emptiness.
    let single = from.stepped(forward).filter(|&c| board.is_empty(c));
    if let Some(to) = single {
        out.push(Move::new(from, to));
    }
    if !piece.has_moved() {
        if let Some(to) = single.and_then(|c| c.stepped(forward)) {
            if board.is_empty(to) {
                out.push(Move::new(from, to));
            }
        }
    }

    for delta in geometry::pawn_attack_deltas(piece.team()) {
        let to = match from.stepped(delta) {
            Some(c) => c,
            None => continue,
        };
        match board.get(to) {
            Some(&target) if target.team() != piece.team() => {
                out.push(Move::capture(from, to, target));
            }
            Some(_) => {}
            None => {
                if let Some(mv) = en_passant_capture(board, from, to, last_move) {
                    out.push(mv);
                }
            }
        }
    }
}

/// Returns the en passant capture landing on `to`, if the last move allows one
fn en_passant_capture(
    board: &Board,
    from: Coord,
    to: Coord,
    last_move: Option<&Move>,
) -> Option<Move> {
    let last = last_move?;
    let target = *board.get(last.to())?;
    if target.kind() != PieceKind::Pawn {
        return None;
    }
    if last.to().col() != to.col() || last.to().row().abs_diff(last.from().row()) != 2 {
        return None;
    }
    // The capture lands on the square the double step skipped over.
    let skipped = last.to().stepped(-geometry::pawn_forward(target.team()))?;
    if skipped != to {
        return None;
    }
    Some(Move::en_passant(from, to, target, last.to()))
}

/// Slides along each direction in `dirs` until blocked, capturing an opposing blocker
fn slide(board: &Board, from: Coord, piece: &Piece, dirs: &[Delta; 4], out: &mut MoveList) {
    for &dir in dirs {
        let mut cur = from.stepped(dir);
        while let Some(to) = cur {
            match board.get(to) {
                None => {
                    out.push(Move::new(from, to));
                    cur = to.stepped(dir);
                }
                Some(&target) if target.team() != piece.team() => {
                    out.push(Move::capture(from, to, target));
                    break;
                }
                Some(_) => break,
            }
        }
    }
}

/// Enumerates the rook's pseudo-legal moves
pub fn rook_moves(board: &Board, from: Coord, piece: &Piece, out: &mut MoveList) {
    slide(board, from, piece, &STRAIGHT, out);
}

/// Enumerates the bishop's pseudo-legal moves
pub fn bishop_moves(board: &Board, from: Coord, piece: &Piece, out: &mut MoveList) {
    slide(board, from, piece, &DIAGONAL, out);
}

/// Enumerates the queen's pseudo-legal moves
pub fn queen_moves(board: &Board, from: Coord, piece: &Piece, out: &mut MoveList) {
    slide(board, from, piece, &STRAIGHT, out);
    slide(board, from, piece, &DIAGONAL, out);
}

/// Enumerates the knight's pseudo-legal moves
pub fn knight_moves(board: &Board, from: Coord, piece: &Piece, out: &mut MoveList) {
    for &jump in &KNIGHT_JUMPS {
        let to = match from.stepped(jump) {
            Some(c) => c,
            None => continue,
        };
        match board.get(to) {
            None => out.push(Move::new(from, to)),
            Some(&target) if target.team() != piece.team() => {
                out.push(Move::capture(from, to, target));
            }
            Some(_) => {}
        }
    }
}

/// Enumerates the king's moves, including castling
///
/// Unlike the other enumerators, the result is already legal: a king never steps onto
/// an attacked square, and the attack test ignores the king's own square so a slider
/// cannot hide behind it.
pub fn king_moves(board: &Board, from: Coord, piece: &Piece, out: &mut MoveList) {
    let enemy = piece.team().inv();
    for to in board::adjacent_tiles(from) {
        if board.get(to).map_or(false, |p| p.team() == piece.team()) {
            continue;
        }
        if attack::is_attacked(board, to, enemy, Some(from)) {
            continue;
        }
        push_move(board, from, to, out);
    }
    castle_moves(board, from, piece, out);
}

fn castle_moves(board: &Board, from: Coord, piece: &Piece, out: &mut MoveList) {
    if piece.has_moved() {
        return;
    }
    let enemy = piece.team().inv();
    for dir in [Delta { row: 0, col: 1 }, Delta { row: 0, col: -1 }] {
        let rook_loc = match board.first_piece_along_ray(from, dir, None) {
            Some(c) => c,
            None => continue,
        };
        if !board.contains(piece.team(), &[PieceKind::Rook], rook_loc)
            || board.get(rook_loc).map_or(true, |rook| rook.has_moved())
        {
            continue;
        }
        // The king crosses two squares; the attack scan stops three columns out, so
        // the rook's own path is not required to be safe.
        let sentinel_col = from.col() as isize + 3 * dir.col;
        if !attack::ray_safe_until(board, from, dir, |c| c.col() as isize == sentinel_col, enemy) {
            continue;
        }
        let king_to = from.stepped(dir).and_then(|c| c.stepped(dir));
        let rook_to = from.stepped(dir);
        if let (Some(king_to), Some(rook_to)) = (king_to, rook_to) {
            out.push(Move::castling(from, king_to, rook_loc, rook_to));
        }
    }
}

/// Enumerates the pseudo-legal moves of the piece standing on `from`
///
/// Returns an empty list for an empty square. King moves come out already legal; every
/// other kind still needs the self-check filter of [`legal_moves`].
pub fn piece_moves(board: &Board, from: Coord, last_move: Option<&Move>) -> MoveList {
    let mut out = MoveList::new();
    let piece = match board.get(from) {
        Some(p) => *p,
        None => return out,
    };
    match piece.kind() {
        PieceKind::Pawn => pawn_moves(board, from, &piece, last_move, &mut out),
        PieceKind::Rook => rook_moves(board, from, &piece, &mut out),
        PieceKind::Bishop => bishop_moves(board, from, &piece, &mut out),
        PieceKind::Queen => queen_moves(board, from, &piece, &mut out),
        PieceKind::Knight => knight_moves(board, from, &piece, &mut out),
        PieceKind::King => king_moves(board, from, &piece, &mut out),
    }
    out
}

/// Enumerates the legal moves of the piece standing on `from`
///
/// `king` must be the location of the moving team's king. Every candidate is replayed
/// on a scratch copy of the board and rejected if it leaves that king attacked.
pub fn legal_moves(board: &Board, from: Coord, king: Coord, last_move: Option<&Move>) -> MoveList {
    let mut list = piece_moves(board, from, last_move);
    let piece = match board.get(from) {
        Some(p) => *p,
        None => return list,
    };
    if piece.kind() == PieceKind::King {
        // Already filtered at generation time.
        return list;
    }
    let enemy = piece.team().inv();
    list.retain(|mv| {
        let mut scratch = board.clone();
        scratch.apply(*mv);
        !attack::is_attacked(&scratch, king, enemy, None)
    });
    list
}
