//! Opening-flavoured terms: centre occupancy, undeveloped minors, castling.

use chess::{BitBoard, Board, CastleRights, Color, Piece};

/// d4, e4, d5 and e5.
const CENTER: u64 = 0x0000_0018_1800_0000;

/// Knight starting squares: b1, g1 for White and b8, g8 for Black.
const KNIGHT_HOME: [u64; 2] = [0x0000_0000_0000_0042, 0x4200_0000_0000_0000];

/// Bishop starting squares: c1, f1 for White and c8, f8 for Black.
const BISHOP_HOME: [u64; 2] = [0x0000_0000_0000_0024, 0x2400_0000_0000_0000];

/// Pieces of any kind `color` has on the four centre squares.
pub fn center_pieces(board: &Board, color: Color) -> u32 {
    (*board.color_combined(color) & BitBoard::new(CENTER)).popcnt()
}

/// Knights and bishops of `color` still on their starting squares.
pub fn undeveloped_minors(board: &Board, color: Color) -> u32 {
    let own = *board.color_combined(color);
    let side = color.to_index();
    let knights = *board.pieces(Piece::Knight) & own & BitBoard::new(KNIGHT_HOME[side]);
    let bishops = *board.pieces(Piece::Bishop) & own & BitBoard::new(BISHOP_HOME[side]);
    knights.popcnt() + bishops.popcnt()
}

/// Whether `color` may still castle on either side.
pub fn can_castle(board: &Board, color: Color) -> bool {
    board.castle_rights(color) != CastleRights::NoRights
}
