//! Known wins against a bare king.
//!
//! When one side is reduced to its king and the other holds a single queen,
//! rook or pawn, the general evaluation is replaced by a large bonus that
//! drives the weak king to the edge (or pushes the pawn).

use chess::{BitBoard, Board, Color, Piece, Square};

use crate::eval::material::side_material;
use crate::eval::pawns::relative_rank;

const QUEEN_MATE_BASE: i32 = 5000;
const ROOK_MATE_BASE: i32 = 4500;
const PAWN_WIN_BASE: i32 = 800;

/// Minimum material lead for each pattern.
const QUEEN_IMBALANCE: i32 = 800;
const ROOK_IMBALANCE: i32 = 400;
const PAWN_IMBALANCE: i32 = 50;

/// Manhattan distance from `sq` to the nearest of the four centre squares.
pub(crate) fn center_distance(sq: Square) -> i32 {
    let file = sq.get_file().to_index() as i32;
    let rank = sq.get_rank().to_index() as i32;
    (3 - file).max(file - 4) + (3 - rank).max(rank - 4)
}

/// Manhattan distance between two squares.
pub(crate) fn distance(a: Square, b: Square) -> i32 {
    let df = a.get_file().to_index() as i32 - b.get_file().to_index() as i32;
    let dr = a.get_rank().to_index() as i32 - b.get_rank().to_index() as i32;
    df.abs() + dr.abs()
}

/// White-positive bonus if the position matches a bare-king pattern.
pub fn mating_pattern(board: &Board) -> Option<i32> {
    if let Some(bonus) = pattern_for(board, Color::White) {
        return Some(bonus);
    }
    pattern_for(board, Color::Black).map(|bonus| -bonus)
}

fn pattern_for(board: &Board, strong: Color) -> Option<i32> {
    let weak = !strong;
    let weak_pieces = *board.color_combined(weak);
    if weak_pieces.popcnt() != 1 {
        return None;
    }

    let strong_pieces = *board.color_combined(strong);
    if strong_pieces.popcnt() != 2 {
        return None;
    }

    let imbalance = side_material(board, strong) - side_material(board, weak);
    let strong_king = board.king_square(strong);
    let weak_king = board.king_square(weak);
    let extra = (strong_pieces & !BitBoard::from_square(strong_king)).to_square();

    let edge_drive = 100 * center_distance(weak_king) + 10 * (14 - distance(strong_king, weak_king));

    match board.piece_on(extra)? {
        Piece::Queen if imbalance > QUEEN_IMBALANCE => Some(QUEEN_MATE_BASE + edge_drive),
        Piece::Rook if imbalance > ROOK_IMBALANCE => Some(ROOK_MATE_BASE + edge_drive),
        Piece::Pawn if imbalance > PAWN_IMBALANCE => {
            let rank = relative_rank(strong, extra) as i32;
            Some(PAWN_WIN_BASE + 60 * rank)
        }
        _ => None,
    }
}
