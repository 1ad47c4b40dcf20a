//! Game state for the kibitz engine.
//!
//! Wraps the `chess` crate's board and move generator in a [`Position`]
//! that supports strictly paired apply/undo, repetition keys and the
//! status queries the search needs.

pub mod error;
pub mod fen;
pub mod notation;
pub mod position;

pub use chess::{BitBoard, Board, ChessMove as Move, Color, EMPTY, File, Piece, Rank, Square};
pub use error::PositionError;
pub use fen::{STARTING_FEN, mirror_fen};
pub use notation::parse_move;
pub use position::{Position, placement_key};
