//! Pawn structure: isolated, doubled, backward and passed pawns.

use chess::{
    BitBoard, Board, Color, EMPTY, Piece, Rank, Square, get_adjacent_files, get_file,
    get_pawn_attacks,
};

use crate::eval::weights::EvalWeights;

/// All squares on ranks strictly ahead of `rank` from `color`'s side.
pub(crate) fn ranks_ahead(color: Color, rank: Rank) -> BitBoard {
    let r = rank.to_index() as u32;
    let bits = match color {
        Color::White => u64::MAX.checked_shl(8 * (r + 1)).unwrap_or(0),
        Color::Black => (1u64 << (8 * r)) - 1,
    };
    BitBoard::new(bits)
}

/// Rank of `sq` counted from `color`'s back rank (0..=7).
#[inline]
pub(crate) fn relative_rank(color: Color, sq: Square) -> usize {
    match color {
        Color::White => sq.get_rank().to_index(),
        Color::Black => 7 - sq.get_rank().to_index(),
    }
}

/// Whether no enemy pawn stands ahead of `sq` on its own or an adjacent file.
pub(crate) fn is_passed(board: &Board, color: Color, sq: Square) -> bool {
    let enemy_pawns = *board.pieces(Piece::Pawn) & *board.color_combined(!color);
    let files = get_file(sq.get_file()) | get_adjacent_files(sq.get_file());
    (enemy_pawns & files & ranks_ahead(color, sq.get_rank())) == EMPTY
}

/// Passed pawns of `color`.
pub(crate) fn passed_pawns(board: &Board, color: Color) -> impl Iterator<Item = Square> + '_ {
    let own_pawns = *board.pieces(Piece::Pawn) & *board.color_combined(color);
    own_pawns.filter(move |&sq| is_passed(board, color, sq))
}

/// Pawn-structure score for `color`'s pawns.
///
/// Each term is counted first and weighted once, so the result does not
/// depend on the order the pawns are visited in.
pub fn pawn_structure(board: &Board, color: Color, weights: &EvalWeights) -> f32 {
    let own_pawns = *board.pieces(Piece::Pawn) & *board.color_combined(color);
    let enemy_pawns = *board.pieces(Piece::Pawn) & *board.color_combined(!color);

    let mut isolated = 0u32;
    let mut doubled = 0u32;
    let mut backward = 0u32;
    let mut passed_ranks = 0usize;

    for sq in own_pawns {
        let file = sq.get_file();
        let neighbours = own_pawns & get_adjacent_files(file);

        if neighbours == EMPTY {
            isolated += 1;
        }

        if (own_pawns & get_file(file)).popcnt() > 1 {
            doubled += 1;
        }

        // No neighbour level with or behind it, and the stop square is
        // covered by an enemy pawn.
        let supporters = neighbours & !ranks_ahead(color, sq.get_rank());
        let stop = match color {
            Color::White => sq.up(),
            Color::Black => sq.down(),
        };
        if let Some(stop) = stop {
            if supporters == EMPTY && get_pawn_attacks(stop, color, enemy_pawns) != EMPTY {
                backward += 1;
            }
        }

        if is_passed(board, color, sq) {
            passed_ranks += relative_rank(color, sq);
        }
    }

    -(isolated as f32) * weights.isolated_pawn
        - doubled as f32 * weights.doubled_pawn
        - backward as f32 * weights.backward_pawn
        + weights.passed_pawn * passed_ranks as f32 / 7.0
}
