//! Game phase from remaining non-pawn material.

use chess::{Board, Piece};

/// Phase units of a full set of minor and major pieces:
/// 4 knights + 4 bishops + 4 rooks × 2 + 2 queens × 4.
pub const MAX_PHASE: u32 = 24;

/// At or below this phase the position is treated as an endgame.
pub const ENDGAME_PHASE: f32 = 0.3;

/// Non-pawn material in phase units (N=1, B=1, R=2, Q=4), capped at
/// [`MAX_PHASE`] so promotions cannot push it higher.
pub fn phase_units(board: &Board) -> u32 {
    let units = board.pieces(Piece::Knight).popcnt()
        + board.pieces(Piece::Bishop).popcnt()
        + board.pieces(Piece::Rook).popcnt() * 2
        + board.pieces(Piece::Queen).popcnt() * 4;
    units.min(MAX_PHASE)
}

/// Blend factor in `0.0..=1.0`: 1.0 with all pieces on, 0.0 with none.
pub fn game_phase(board: &Board) -> f32 {
    phase_units(board) as f32 / MAX_PHASE as f32
}
