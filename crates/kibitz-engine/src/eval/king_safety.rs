//! King safety: pawn shield, open files near the king, attackers nearby.
//!
//! Only applied outside the endgame.

use chess::{BitBoard, Board, Color, EMPTY, File, Piece, Square, get_adjacent_files, get_file};

use crate::eval::weights::EvalWeights;

/// The (up to) three squares directly in front of a king on `sq`.
fn shield_squares(sq: Square, color: Color) -> BitBoard {
    let ahead = match color {
        Color::White => sq.up(),
        Color::Black => sq.down(),
    };
    match ahead {
        Some(front) => {
            let files = get_file(front.get_file()) | get_adjacent_files(front.get_file());
            files & chess::get_rank(front.get_rank())
        }
        None => EMPTY,
    }
}

/// The 5×5 box centred on `sq`, clipped to the board.
fn king_zone(sq: Square) -> BitBoard {
    let file = sq.get_file().to_index() as i32;
    let rank = sq.get_rank().to_index() as i32;
    let mut bits = 0u64;
    for r in (rank - 2).max(0)..=(rank + 2).min(7) {
        for f in (file - 2).max(0)..=(file + 2).min(7) {
            bits |= 1u64 << (r * 8 + f);
        }
    }
    BitBoard::new(bits)
}

/// King-safety score for `color`'s king.
pub fn king_safety(board: &Board, color: Color, weights: &EvalWeights) -> f32 {
    let king = board.king_square(color);
    let own = *board.color_combined(color);
    let enemy = *board.color_combined(!color);
    let pawns = *board.pieces(Piece::Pawn);

    let shield = (shield_squares(king, color) & pawns & own).popcnt();

    let king_file = king.get_file().to_index();
    let open_files = (king_file.saturating_sub(1)..=(king_file + 1).min(7))
        .filter(|&f| (pawns & get_file(File::from_index(f))) == EMPTY)
        .count();

    let attackers = (*board.pieces(Piece::Knight)
        | *board.pieces(Piece::Bishop)
        | *board.pieces(Piece::Rook)
        | *board.pieces(Piece::Queen))
        & enemy
        & king_zone(king);

    shield as f32 * weights.pawn_shield
        - open_files as f32 * weights.king_open_file
        - attackers.popcnt() as f32 * weights.king_attack_zone
}
