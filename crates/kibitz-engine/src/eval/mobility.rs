//! Mobility measured in legal moves.

use chess::{Board, Color, MoveGen};

/// White legal moves minus Black legal moves.
///
/// The side not to move is counted in the position after a null move. When
/// the side to move is in check there is no such position and the side not
/// to move is credited with zero moves.
pub fn mobility(board: &Board) -> i32 {
    let to_move = MoveGen::new_legal(board).len() as i32;
    let waiting = board
        .null_move()
        .map_or(0, |passed| MoveGen::new_legal(&passed).len() as i32);

    match board.side_to_move() {
        Color::White => to_move - waiting,
        Color::Black => waiting - to_move,
    }
}
