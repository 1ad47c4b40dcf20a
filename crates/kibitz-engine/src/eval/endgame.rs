//! Extra terms once almost every piece has been traded.

use chess::{Board, Color, Piece};

use crate::eval::mating::center_distance;
use crate::eval::pawns::{passed_pawns, relative_rank};

/// Late endgame: at most this many knights, bishops, rooks and queens left.
pub const LATE_ENDGAME_PIECES: u32 = 2;

const KING_CENTRALISATION: i32 = 10;
const PASSED_PAWN_PUSH: i32 = 20;

/// Whether the board has reached the late endgame.
pub fn is_late_endgame(board: &Board) -> bool {
    let non_pawn = *board.pieces(Piece::Knight)
        | *board.pieces(Piece::Bishop)
        | *board.pieces(Piece::Rook)
        | *board.pieces(Piece::Queen);
    non_pawn.popcnt() <= LATE_ENDGAME_PIECES
}

/// White-positive king centralisation and passed-pawn pushing.
pub fn late_endgame(board: &Board) -> i32 {
    let white_king = center_distance(board.king_square(Color::White));
    let black_king = center_distance(board.king_square(Color::Black));
    let kings = KING_CENTRALISATION * (black_king - white_king);

    let push = |color: Color| -> i32 {
        passed_pawns(board, color)
            .map(|sq| PASSED_PAWN_PUSH * relative_rank(color, sq) as i32)
            .sum()
    };

    kings + push(Color::White) - push(Color::Black)
}
