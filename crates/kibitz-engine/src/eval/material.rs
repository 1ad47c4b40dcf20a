//! Material balance and bishop pair.
//!
//! Scores are from White's perspective (positive = White ahead).

use chess::{ALL_PIECES, Board, Color, Piece};

use crate::eval::weights::EvalWeights;

/// Centipawn value of each piece kind, indexed by [`Piece::to_index`].
pub const PIECE_VALUES: [i32; 6] = [
    100, // Pawn
    300, // Knight
    320, // Bishop
    500, // Rook
    900, // Queen
    0,   // King
];

/// Centipawn value of `piece`.
#[inline]
pub fn piece_value(piece: Piece) -> i32 {
    PIECE_VALUES[piece.to_index()]
}

/// Total material of `color`, king excluded.
pub fn side_material(board: &Board, color: Color) -> i32 {
    let own = *board.color_combined(color);
    ALL_PIECES
        .iter()
        .map(|&piece| (*board.pieces(piece) & own).popcnt() as i32 * piece_value(piece))
        .sum()
}

/// White material minus Black material.
pub fn material(board: &Board) -> i32 {
    side_material(board, Color::White) - side_material(board, Color::Black)
}

/// Bishop pair bonus for `color`.
pub fn bishop_pair(board: &Board, color: Color, weights: &EvalWeights) -> f32 {
    let bishops = *board.pieces(Piece::Bishop) & *board.color_combined(color);
    if bishops.popcnt() >= 2 { weights.bishop_pair } else { 0.0 }
}
