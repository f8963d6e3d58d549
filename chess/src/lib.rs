//! # tapchess
//!
//! A two-player chess rules engine over an 8×8 grid of tiles. The engine keeps the
//! board state, enumerates legal moves per piece (including castling, en passant and
//! the pawn double-step), prevents moves that expose the own king, and classifies the
//! position as in progress, check, checkmate or stalemate.
//!
//! The public surface is a narrow imperative API meant to be driven by a presentation
//! layer: [`Chess::select`] implements a two-phase tap protocol that selects a piece,
//! highlights its legal destinations and executes a tapped destination, while
//! [`Chess::make_move`] applies a move of the current selection directly. There is no
//! rendering, no notation parsing and no search in here; a host re-reads
//! [`Chess::board`] and [`Chess::state`] after every command.
//!
//! # Example
//!
//! ```
//! use tapchess::{Chess, State, Team};
//!
//! let mut game = Chess::new();
//!
//! // White opens with the king's pawn: tap the pawn, then its double-step square.
//! game.select(6, 4);
//! assert!(game.possible_moves().is_some());
//! game.select(4, 4);
//!
//! assert_eq!(game.whose_turn(), Team::Black);
//! assert_eq!(game.white_turns(), 1);
//! assert_eq!(game.state(), State::InProgress);
//! ```

pub mod attack;
pub mod board;
pub mod game;
pub mod movegen;
pub mod moves;

pub use tapchess_base::geometry;
pub use tapchess_base::types;

pub use board::{Board, PrettyStyle, Tile};
pub use game::{Chess, SetupError, State};
pub use movegen::MoveList;
pub use moves::Move;
pub use types::{Coord, Piece, PieceKind, Team, TileShade};
