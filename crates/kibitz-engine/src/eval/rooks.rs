//! Rook placement: open files, the seventh rank, connected rooks.

use chess::{Board, Color, EMPTY, Piece, Rank, get_file};

use crate::eval::weights::EvalWeights;

/// Rook terms for `color`.
///
/// A file is open when it holds no pawn of either color. The seventh rank
/// is rank 7 for White and rank 2 for Black. Every pair of rooks on a
/// common file or rank earns the connected bonus once.
pub fn rooks(board: &Board, color: Color, weights: &EvalWeights) -> f32 {
    let rooks = *board.pieces(Piece::Rook) & *board.color_combined(color);
    let pawns = *board.pieces(Piece::Pawn);
    let seventh = match color {
        Color::White => Rank::Seventh,
        Color::Black => Rank::Second,
    };

    let mut open = 0u32;
    let mut on_seventh = 0u32;
    for sq in rooks {
        if (pawns & get_file(sq.get_file())) == EMPTY {
            open += 1;
        }
        if sq.get_rank() == seventh {
            on_seventh += 1;
        }
    }

    let squares: Vec<_> = rooks.collect();
    let mut connected = 0u32;
    for (i, a) in squares.iter().enumerate() {
        for b in &squares[i + 1..] {
            if a.get_file() == b.get_file() || a.get_rank() == b.get_rank() {
                connected += 1;
            }
        }
    }

    open as f32 * weights.rook_open_file
        + on_seventh as f32 * weights.rook_seventh
        + connected as f32 * weights.rook_connected
}
