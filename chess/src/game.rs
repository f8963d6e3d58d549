//! The game state machine and the public tap protocol

use std::fmt;

use thiserror::Error;

use crate::attack;
use crate::board::Board;
use crate::movegen::{self, MoveList};
use crate::moves::Move;
use tapchess_base::geometry::{self, KING_COLUMN};
use tapchess_base::types::{Coord, Piece, PieceKind, Team};

/// Error building a game from a custom position
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum SetupError {
    /// One of the teams has no king on the board
    #[error("no king of team {0}")]
    NoKing(Team),
    /// One of the teams has more than one king on the board
    #[error("more than one king of team {0}")]
    TooManyKings(Team),
}

/// Classification of the current position, always derived and never stored
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum State {
    /// The side to move has legal moves and its king is safe
    InProgress,
    /// The side to move is in check but can still move
    Check,
    /// The side to move is in check and has no legal move
    Checkmate,
    /// Stalemate: the side to move has no legal move but is not in check
    Draw,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match *self {
            State::InProgress => write!(f, "in progress"),
            State::Check => write!(f, "check"),
            State::Checkmate => write!(f, "checkmate"),
            State::Draw => write!(f, "draw"),
        }
    }
}

/// What a tap on a square means, given the current selection
enum Tap {
    /// Tapped the selected square again: toggle the selection off
    Deselect,
    /// Tapped a piece of the side to move: (re)select it
    Select(Coord),
    /// Tapped a possible destination of the selection: try the move
    Move(Coord, Coord),
    /// Anything else: keep the state as it is
    Ignore,
}

/// A complete two-player chess game
///
/// The only mutating entry points are [`Chess::select`], [`Chess::make_move`] and
/// [`Chess::new_game`]; everything else is a read-only query over the current
/// position. A presentation layer is expected to re-read [`Chess::board`] and
/// [`Chess::state`] after every command.
#[derive(Debug, Clone)]
pub struct Chess {
    board: Board,
    turn: u32,
    moves: Vec<Move>,
    white_king: Coord,
    black_king: Coord,
    selected: Option<Coord>,
    possible_moves: Option<MoveList>,
    piece_counter: u32,
}

impl Chess {
    /// Creates a game in the standard starting position
    pub fn new() -> Chess {
        let mut game = Chess {
            board: Board::empty(),
            turn: 1,
            moves: Vec::new(),
            white_king: Coord::new(geometry::back_row(Team::White), KING_COLUMN),
            black_king: Coord::new(geometry::back_row(Team::Black), KING_COLUMN),
            selected: None,
            possible_moves: None,
            piece_counter: 0,
        };
        game.new_game();
        game
    }

    /// Creates a game from an arbitrary board position
    ///
    /// `turn` is the 1-based ply counter (an odd value puts White to move); values
    /// below 1 are clamped to 1. The board must hold exactly one king per team.
    pub fn with_board(board: Board, turn: u32) -> Result<Chess, SetupError> {
        let white_king = Self::find_king(&board, Team::White)?;
        let black_king = Self::find_king(&board, Team::Black)?;
        let piece_counter = Coord::iter()
            .filter_map(|c| board.get(c).map(Piece::id))
            .max()
            .unwrap_or(0);
        Ok(Chess {
            board,
            turn: turn.max(1),
            moves: Vec::new(),
            white_king,
            black_king,
            selected: None,
            possible_moves: None,
            piece_counter,
        })
    }

    fn find_king(board: &Board, team: Team) -> Result<Coord, SetupError> {
        let mut found = None;
        for c in Coord::iter() {
            if board.contains(team, &[PieceKind::King], c) {
                if found.is_some() {
                    return Err(SetupError::TooManyKings(team));
                }
                found = Some(c);
            }
        }
        found.ok_or(SetupError::NoKing(team))
    }

    /// Resets the game to the standard starting position
    ///
    /// The piece-id counter restarts from zero, so the ids of a fresh game are
    /// assigned the same way every time.
    pub fn new_game(&mut self) {
        self.piece_counter = 0;
        self.turn = 1;
        self.moves.clear();
        self.selected = None;
        self.possible_moves = None;
        self.board = Board::empty();

        self.place_back_row(Team::Black);
        self.place_pawn_row(Team::Black);
        self.place_pawn_row(Team::White);
        self.place_back_row(Team::White);

        self.white_king = Coord::new(geometry::back_row(Team::White), KING_COLUMN);
        self.black_king = Coord::new(geometry::back_row(Team::Black), KING_COLUMN);
    }

    fn next_piece_id(&mut self) -> u32 {
        self.piece_counter += 1;
        self.piece_counter
    }

    fn place_back_row(&mut self, team: Team) {
        const BACK_ROW_KINDS: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        let row = geometry::back_row(team);
        for (col, &kind) in BACK_ROW_KINDS.iter().enumerate() {
            let id = self.next_piece_id();
            self.board.put(Coord::new(row, col), Piece::new(id, team, kind));
        }
    }

    fn place_pawn_row(&mut self, team: Team) {
        let row = geometry::pawn_row(team);
        for col in 0..8 {
            let id = self.next_piece_id();
            self.board
                .put(Coord::new(row, col), Piece::new(id, team, PieceKind::Pawn));
        }
    }

    /// Returns the current board
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the 1-based ply counter
    #[inline]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Returns the team to move
    pub fn whose_turn(&self) -> Team {
        if self.turn % 2 == 1 {
            Team::White
        } else {
            Team::Black
        }
    }

    /// Returns the number of completed White moves, i.e. `ceil((turn - 1) / 2)`
    pub fn white_turns(&self) -> u32 {
        self.turn / 2
    }

    /// Returns the number of completed Black moves, i.e. `(turn - 1) / 2`
    pub fn black_turns(&self) -> u32 {
        (self.turn - 1) / 2
    }

    /// Returns the move history, oldest first
    #[inline]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Returns the currently selected square, if any
    #[inline]
    pub fn selected(&self) -> Option<Coord> {
        self.selected
    }

    /// Returns the legal moves of the current selection, if a selection is active
    pub fn possible_moves(&self) -> Option<&[Move]> {
        self.possible_moves.as_ref().map(|list| list.as_slice())
    }

    /// Returns the location of the team's king
    pub fn king_location(&self, team: Team) -> Coord {
        match team {
            Team::White => self.white_king,
            Team::Black => self.black_king,
        }
    }

    /// Returns `true` iff the side to move is in check
    pub fn in_check(&self) -> bool {
        let side = self.whose_turn();
        attack::is_attacked(&self.board, self.king_location(side), side.inv(), None)
    }

    /// Classifies the current position for the side to move
    pub fn state(&self) -> State {
        match (self.in_check(), !self.can_move(self.whose_turn())) {
            (false, false) => State::InProgress,
            (true, false) => State::Check,
            (true, true) => State::Checkmate,
            (false, true) => State::Draw,
        }
    }

    /// Returns the legal moves of the piece standing on `loc`
    ///
    /// Answers an empty list for an empty square. The moves of either team can be
    /// queried, regardless of whose turn it is.
    pub fn legal_moves_at(&self, loc: Coord) -> MoveList {
        match self.board.get(loc) {
            Some(piece) => movegen::legal_moves(
                &self.board,
                loc,
                self.king_location(piece.team()),
                self.moves.last(),
            ),
            None => MoveList::new(),
        }
    }

    fn can_move(&self, team: Team) -> bool {
        // The king is the most likely piece to have an escape, so test it first.
        if !self.legal_moves_at(self.king_location(team)).is_empty() {
            return true;
        }
        Coord::iter().any(|c| {
            self.board.get(c).map_or(false, |p| p.team() == team)
                && !self.legal_moves_at(c).is_empty()
        })
    }

    /// Handles a tap on the square at (`row`, `col`)
    ///
    /// The two-phase protocol: tapping the selected square deselects it; tapping a
    /// piece of the side to move selects it and highlights its legal destinations;
    /// tapping a highlighted destination executes the move and clears the selection;
    /// any other tap (including out-of-range coordinates from a misbehaving caller)
    /// leaves the state untouched, so the user can simply tap again.
    pub fn select(&mut self, row: usize, col: usize) {
        let loc = match Coord::try_new(row, col) {
            Ok(loc) => loc,
            Err(_) => return,
        };
        match self.classify_tap(loc) {
            Tap::Deselect => self.clear_selection(),
            Tap::Select(loc) => self.set_selection(loc),
            Tap::Move(from, to) => {
                // On failure the selection stays, letting the user retry.
                self.make_move(from, to);
            }
            Tap::Ignore => {}
        }
    }

    /// Decides what a tap on `loc` means. Pure: the board is not touched.
    fn classify_tap(&self, loc: Coord) -> Tap {
        if self.selected == Some(loc) {
            return Tap::Deselect;
        }
        if self
            .board
            .get(loc)
            .map_or(false, |p| p.team() == self.whose_turn())
        {
            return Tap::Select(loc);
        }
        match self.selected {
            Some(from) => Tap::Move(from, loc),
            None => Tap::Ignore,
        }
    }

    fn set_selection(&mut self, loc: Coord) {
        self.clear_selection();
        let list = self.legal_moves_at(loc);
        self.board.set_highlight(loc, true);
        for mv in &list {
            self.board.set_highlight(mv.to(), true);
        }
        self.selected = Some(loc);
        self.possible_moves = Some(list);
    }

    fn clear_selection(&mut self) {
        self.board.clear_highlights();
        self.selected = None;
        self.possible_moves = None;
    }

    /// Executes the move `from` → `to` if it is among the selection's legal moves
    ///
    /// Moves are only known-legal once [`Chess::select`] has computed them for
    /// `from`; without a matching selection this returns `false` and mutates
    /// nothing. On success the move is applied (with its capture, promotion and rook
    /// relocation side effects), the turn advances, the move is appended to the
    /// history and the selection is cleared.
    pub fn make_move(&mut self, from: Coord, to: Coord) -> bool {
        let mv = match self.find_selected_move(from, to) {
            Some(mv) => mv,
            None => return false,
        };
        let mover = self.whose_turn();
        self.clear_selection();
        if from == self.white_king {
            self.white_king = to;
        } else if from == self.black_king {
            self.black_king = to;
        }
        self.board.apply(mv);
        self.turn += 1;
        self.moves.push(mv);
        debug_assert!(
            self.board
                .contains(mover, &[PieceKind::King], self.king_location(mover)),
            "king location cache out of sync"
        );
        true
    }

    fn find_selected_move(&self, from: Coord, to: Coord) -> Option<Move> {
        self.possible_moves
            .as_ref()?
            .iter()
            .find(|mv| mv.from() == from && mv.to() == to)
            .copied()
    }
}

impl Default for Chess {
    fn default() -> Chess {
        Chess::new()
    }
}
