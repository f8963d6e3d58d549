//! Board, tiles and grid queries

use std::fmt;

use crate::moves::Move;
use tapchess_base::geometry::{self, Delta, KING_STEPS};
use tapchess_base::types::{Coord, Piece, PieceKind, Team, TileShade, BOARD_SIZE};

/// A single tile of the board
///
/// The identity of a tile (id, coordinate, shade) is fixed at board creation; only the
/// occupant and the `highlighted` move-preview flag ever change.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Tile {
    id: u8,
    coord: Coord,
    shade: TileShade,
    piece: Option<Piece>,
    highlighted: bool,
}

impl Tile {
    fn new(coord: Coord) -> Tile {
        Tile {
            id: coord.index() as u8,
            coord,
            shade: coord.shade(),
            piece: None,
            highlighted: false,
        }
    }

    /// Returns the fixed id of the tile (its row-major index)
    #[inline]
    pub fn id(&self) -> u8 {
        self.id
    }

    /// Returns the coordinate of the tile
    #[inline]
    pub fn coord(&self) -> Coord {
        self.coord
    }

    /// Returns the checkerboard shade of the tile
    #[inline]
    pub fn shade(&self) -> TileShade {
        self.shade
    }

    /// Returns the piece standing on the tile, if any
    #[inline]
    pub fn piece(&self) -> Option<&Piece> {
        self.piece.as_ref()
    }

    /// Returns `true` iff the tile is highlighted as a move preview
    #[inline]
    pub fn highlighted(&self) -> bool {
        self.highlighted
    }
}

/// Returns the up-to-8 valid king-step neighbors of `loc`
pub fn adjacent_tiles(loc: Coord) -> impl Iterator<Item = Coord> {
    KING_STEPS.iter().filter_map(move |&d| loc.stepped(d))
}

/// The 8×8 grid of tiles, sole owner of piece placement
///
/// The board itself enforces only "at most one piece per tile"; the one-king-per-team
/// invariant is maintained by the game state machine, which never lets a king be
/// captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    tiles: [Tile; BOARD_SIZE * BOARD_SIZE],
}

impl Board {
    /// Returns a board with no pieces on it
    pub fn empty() -> Board {
        Board {
            tiles: std::array::from_fn(|i| Tile::new(Coord::from_index(i))),
        }
    }

    /// Returns the tile at `loc`
    #[inline]
    pub fn tile(&self, loc: Coord) -> &Tile {
        &self.tiles[loc.index()]
    }

    /// Returns the piece standing on `loc`, if any
    #[inline]
    pub fn get(&self, loc: Coord) -> Option<&Piece> {
        self.tiles[loc.index()].piece.as_ref()
    }

    /// Puts `piece` on `loc`, replacing any previous occupant
    pub fn put(&mut self, loc: Coord, piece: Piece) {
        self.tiles[loc.index()].piece = Some(piece);
    }

    /// Removes and returns the piece standing on `loc`
    pub fn take(&mut self, loc: Coord) -> Option<Piece> {
        self.tiles[loc.index()].piece.take()
    }

    /// Returns `true` iff no piece stands on `loc`
    #[inline]
    pub fn is_empty(&self, loc: Coord) -> bool {
        self.get(loc).is_none()
    }

    /// Returns `true` iff `loc` holds a piece of the team opposing `team`
    pub fn contains_opposing(&self, loc: Coord, team: Team) -> bool {
        match self.get(loc) {
            Some(piece) => piece.team() != team,
            None => false,
        }
    }

    /// Returns `true` iff `loc` holds a piece of exactly `team` whose kind is one of
    /// `kinds`
    pub fn contains(&self, team: Team, kinds: &[PieceKind], loc: Coord) -> bool {
        match self.get(loc) {
            Some(piece) => piece.team() == team && kinds.contains(&piece.kind()),
            None => false,
        }
    }

    /// Walks from `from` in direction `dir` and returns the first occupied square,
    /// or `None` if the ray leaves the board first
    ///
    /// A square equal to `ignoring` is treated as empty, which lets attack detection
    /// pretend the moving piece has already vacated it.
    pub fn first_piece_along_ray(
        &self,
        from: Coord,
        dir: Delta,
        ignoring: Option<Coord>,
    ) -> Option<Coord> {
        let mut cur = from.stepped(dir)?;
        loop {
            if !self.is_empty(cur) && Some(cur) != ignoring {
                return Some(cur);
            }
            cur = cur.stepped(dir)?;
        }
    }

    /// Sets the move-preview highlight flag of the tile at `loc`
    pub(crate) fn set_highlight(&mut self, loc: Coord, highlighted: bool) {
        self.tiles[loc.index()].highlighted = highlighted;
    }

    /// Clears the move-preview highlight flag of every tile
    pub(crate) fn clear_highlights(&mut self) {
        for tile in &mut self.tiles {
            tile.highlighted = false;
        }
    }

    /// Applies `mv` to the board
    ///
    /// Removes the captured piece from its `capture_location`, relocates the moving
    /// piece (promoting a pawn that reaches the opposing back row to a queen), and
    /// relocates the castling rook. The move must come from the legal set for the
    /// current position.
    pub(crate) fn apply(&mut self, mv: Move) {
        if let Some(captured) = mv.capture_location() {
            self.take(captured);
        }
        let mut piece = self
            .take(mv.from())
            .expect("move source square must hold a piece");
        piece.mark_moved();
        if piece.kind() == PieceKind::Pawn && mv.to().row() == geometry::back_row(piece.team().inv())
        {
            piece.promote(PieceKind::Queen);
        }
        self.put(mv.to(), piece);
        if let Some((rook_from, rook_to)) = mv.secondary() {
            if let Some(mut rook) = self.take(rook_from) {
                rook.mark_moved();
                self.put(rook_to, rook);
            }
        }
    }

    /// Wraps the board to allow pretty-printing with the given `style`
    ///
    /// The resulting wrapper implements [`fmt::Display`], so it can be used with
    /// `write!()`, `println!()`, or `ToString::to_string`.
    ///
    /// # Example
    ///
    /// ```
    /// # use tapchess::{board::PrettyStyle, Chess};
    /// #
    /// let game = Chess::new();
    ///
    /// let res = r#"
    /// 8|rnbqkbnr
    /// 7|pppppppp
    /// 6|........
    /// 5|........
    /// 4|........
    /// 3|........
    /// 2|PPPPPPPP
    /// 1|RNBQKBNR
    /// -+--------
    ///  |abcdefgh
    /// "#;
    /// assert_eq!(
    ///     game.board().pretty(PrettyStyle::Ascii).to_string().trim_end(),
    ///     res.trim_matches('\n'),
    /// );
    /// ```
    #[inline]
    pub fn pretty(&self, style: PrettyStyle) -> Pretty<'_> {
        Pretty { board: self, style }
    }
}

/// Style for pretty-printing the board
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PrettyStyle {
    /// Plain ASCII
    Ascii,
    /// Use fancy Unicode symbols
    Utf8,
}

/// Wrapper that pretty-prints the board, created by [`Board::pretty()`]
pub struct Pretty<'a> {
    board: &'a Board,
    style: PrettyStyle,
}

impl fmt::Display for Pretty<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        let (bar, footer) = match self.style {
            PrettyStyle::Ascii => ('|', "-+--------"),
            PrettyStyle::Utf8 => ('│', "─┼────────"),
        };
        for row in 0..BOARD_SIZE {
            write!(f, "{}{}", (b'8' - row as u8) as char, bar)?;
            for col in 0..BOARD_SIZE {
                let ch = match (self.board.get(Coord::new(row, col)), self.style) {
                    (Some(piece), PrettyStyle::Ascii) => piece.as_char(),
                    (Some(piece), PrettyStyle::Utf8) => piece.as_utf8_char(),
                    (None, _) => '.',
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "{}", footer)?;
        writeln!(f, " {}abcdefgh", bar)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tapchess_base::geometry::STRAIGHT;

    fn piece(id: u32, team: Team, kind: PieceKind) -> Piece {
        Piece::new(id, team, kind)
    }

    #[test]
    fn test_empty_board() {
        let board = Board::empty();
        for (idx, c) in Coord::iter().enumerate() {
            let tile = board.tile(c);
            assert_eq!(tile.id() as usize, idx);
            assert_eq!(tile.coord(), c);
            assert_eq!(tile.shade(), c.shade());
            assert!(tile.piece().is_none());
            assert!(!tile.highlighted());
            assert!(board.is_empty(c));
        }
    }

    #[test]
    fn test_put_take() {
        let mut board = Board::empty();
        let c = Coord::new(4, 4);
        board.put(c, piece(1, Team::White, PieceKind::Rook));
        assert!(!board.is_empty(c));
        assert_eq!(board.get(c).unwrap().kind(), PieceKind::Rook);
        assert!(board.contains(Team::White, &[PieceKind::Rook, PieceKind::Queen], c));
        assert!(!board.contains(Team::Black, &[PieceKind::Rook], c));
        assert!(!board.contains(Team::White, &[PieceKind::Queen], c));
        assert!(board.contains_opposing(c, Team::Black));
        assert!(!board.contains_opposing(c, Team::White));

        let taken = board.take(c).unwrap();
        assert_eq!(taken.id(), 1);
        assert!(board.is_empty(c));
        assert!(board.take(c).is_none());
    }

    #[test]
    fn test_adjacent_tiles() {
        assert_eq!(adjacent_tiles(Coord::new(4, 4)).count(), 8);
        assert_eq!(adjacent_tiles(Coord::new(0, 0)).count(), 3);
        assert_eq!(adjacent_tiles(Coord::new(7, 4)).count(), 5);
        assert!(adjacent_tiles(Coord::new(0, 0)).all(|c| c != Coord::new(0, 0)));
    }

    #[test]
    fn test_first_piece_along_ray() {
        let mut board = Board::empty();
        let origin = Coord::new(4, 0);
        let near = Coord::new(4, 3);
        let far = Coord::new(4, 6);
        board.put(near, piece(1, Team::White, PieceKind::Bishop));
        board.put(far, piece(2, Team::Black, PieceKind::Rook));

        let right = Delta { row: 0, col: 1 };
        assert_eq!(board.first_piece_along_ray(origin, right, None), Some(near));
        // Pretending the bishop's square is vacant exposes the rook behind it.
        assert_eq!(
            board.first_piece_along_ray(origin, right, Some(near)),
            Some(far)
        );
        let up = Delta { row: -1, col: 0 };
        assert_eq!(board.first_piece_along_ray(origin, up, None), None);
        for dir in STRAIGHT {
            assert_eq!(board.first_piece_along_ray(Coord::new(0, 7), dir, None), None);
        }
    }

    #[test]
    fn test_apply_relocation() {
        let mut board = Board::empty();
        let from = Coord::new(6, 4);
        let to = Coord::new(4, 4);
        board.put(from, piece(17, Team::White, PieceKind::Pawn));
        board.apply(Move::new(from, to));
        assert!(board.is_empty(from));
        let moved = board.get(to).unwrap();
        assert_eq!(moved.id(), 17);
        assert!(moved.has_moved());
    }

    #[test]
    fn test_apply_capture() {
        let mut board = Board::empty();
        let from = Coord::new(4, 4);
        let to = Coord::new(3, 5);
        let victim = piece(9, Team::Black, PieceKind::Knight);
        board.put(from, piece(1, Team::White, PieceKind::Bishop));
        board.put(to, victim);
        board.apply(Move::capture(from, to, victim));
        assert_eq!(board.get(to).unwrap().id(), 1);
        assert!(board.is_empty(from));
    }

    #[test]
    fn test_apply_en_passant() {
        let mut board = Board::empty();
        let from = Coord::new(3, 1);
        let to = Coord::new(2, 2);
        let captured_at = Coord::new(3, 2);
        let victim = piece(10, Team::Black, PieceKind::Pawn);
        board.put(from, piece(18, Team::White, PieceKind::Pawn));
        board.put(captured_at, victim);
        board.apply(Move::en_passant(from, to, victim, captured_at));
        assert_eq!(board.get(to).unwrap().id(), 18);
        assert!(board.is_empty(from));
        assert!(board.is_empty(captured_at));
    }

    #[test]
    fn test_apply_castling() {
        let mut board = Board::empty();
        let king_from = Coord::new(7, 4);
        let king_to = Coord::new(7, 6);
        let rook_from = Coord::new(7, 7);
        let rook_to = Coord::new(7, 5);
        board.put(king_from, piece(29, Team::White, PieceKind::King));
        board.put(rook_from, piece(32, Team::White, PieceKind::Rook));
        board.apply(Move::castling(king_from, king_to, rook_from, rook_to));
        assert_eq!(board.get(king_to).unwrap().kind(), PieceKind::King);
        assert_eq!(board.get(rook_to).unwrap().kind(), PieceKind::Rook);
        assert!(board.get(rook_to).unwrap().has_moved());
        assert!(board.is_empty(king_from));
        assert!(board.is_empty(rook_from));
    }

    #[test]
    fn test_apply_promotes_pawn() {
        let mut board = Board::empty();
        let from = Coord::new(1, 3);
        let to = Coord::new(0, 3);
        board.put(from, piece(21, Team::White, PieceKind::Pawn));
        board.apply(Move::new(from, to));
        let promoted = board.get(to).unwrap();
        assert_eq!(promoted.kind(), PieceKind::Queen);
        assert_eq!(promoted.id(), 21);

        // Black mirrors it on White's back row.
        let from = Coord::new(6, 0);
        let to = Coord::new(7, 0);
        board.put(from, piece(12, Team::Black, PieceKind::Pawn));
        board.apply(Move::new(from, to));
        assert_eq!(board.get(to).unwrap().kind(), PieceKind::Queen);
    }

    #[test]
    fn test_highlights() {
        let mut board = Board::empty();
        let c = Coord::new(5, 5);
        board.set_highlight(c, true);
        assert!(board.tile(c).highlighted());
        board.clear_highlights();
        assert!(Coord::iter().all(|c| !board.tile(c).highlighted()));
    }
}
