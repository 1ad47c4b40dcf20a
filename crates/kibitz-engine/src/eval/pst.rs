//! Piece-square tables.
//!
//! Tables are written from White's point of view with index 0 = a1 and
//! index 63 = h8, one row per rank starting from rank 1. Black looks up the
//! vertically mirrored square (`index ^ 56`).

use chess::{Color, Piece, Square};

use crate::eval::score::{S, Score};

/// Pawns: central pushes in the middlegame, raw advancement in the endgame.
/// Ranks 1 and 8 are never occupied.
#[rustfmt::skip]
const PAWN: [Score; 64] = [
    S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(0,0),  // 1
    S(5,0),    S(10,0),   S(10,0),   S(-20,0),  S(-20,0),  S(10,0),   S(10,0),   S(5,0),  // 2
    S(5,5),    S(-5,5),   S(-10,5),  S(0,5),    S(0,5),    S(-10,5),  S(-5,5),   S(5,5),  // 3
    S(0,10),   S(0,10),   S(0,10),   S(20,10),  S(20,10),  S(0,10),   S(0,10),   S(0,10),  // 4
    S(5,20),   S(5,20),   S(10,20),  S(25,20),  S(25,20),  S(10,20),  S(5,20),   S(5,20),  // 5
    S(10,35),  S(10,35),  S(20,35),  S(30,35),  S(30,35),  S(20,35),  S(10,35),  S(10,35),  // 6
    S(50,60),  S(50,60),  S(50,60),  S(50,60),  S(50,60),  S(50,60),  S(50,60),  S(50,60),  // 7
    S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(0,0),  // 8
];

#[rustfmt::skip]
const KNIGHT: [Score; 64] = [
    S(-50,-40),S(-40,-30),S(-30,-20),S(-30,-20),S(-30,-20),S(-30,-20),S(-40,-30),S(-50,-40),  // 1
    S(-40,-30),S(-20,-15),S(0,0),    S(5,0),    S(5,0),    S(0,0),    S(-20,-15),S(-40,-30),  // 2
    S(-30,-20),S(5,0),    S(10,10),  S(15,10),  S(15,10),  S(10,10),  S(5,0),    S(-30,-20),  // 3
    S(-30,-20),S(0,0),    S(15,10),  S(20,15),  S(20,15),  S(15,10),  S(0,0),    S(-30,-20),  // 4
    S(-30,-20),S(5,0),    S(15,10),  S(20,15),  S(20,15),  S(15,10),  S(5,0),    S(-30,-20),  // 5
    S(-30,-20),S(0,0),    S(10,10),  S(15,10),  S(15,10),  S(10,10),  S(0,0),    S(-30,-20),  // 6
    S(-40,-30),S(-20,-15),S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(-20,-15),S(-40,-30),  // 7
    S(-50,-40),S(-40,-30),S(-30,-20),S(-30,-20),S(-30,-20),S(-30,-20),S(-40,-30),S(-50,-40),  // 8
];

#[rustfmt::skip]
const BISHOP: [Score; 64] = [
    S(-20,-15),S(-10,-10),S(-10,-10),S(-10,-10),S(-10,-10),S(-10,-10),S(-10,-10),S(-20,-15),  // 1
    S(-10,-10),S(5,-5),   S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(5,-5),   S(-10,-10),  // 2
    S(-10,-10),S(10,0),   S(10,5),   S(10,5),   S(10,5),   S(10,5),   S(10,0),   S(-10,-10),  // 3
    S(-10,-10),S(0,0),    S(10,5),   S(10,10),  S(10,10),  S(10,5),   S(0,0),    S(-10,-10),  // 4
    S(-10,-10),S(5,0),    S(5,5),    S(10,10),  S(10,10),  S(5,5),    S(5,0),    S(-10,-10),  // 5
    S(-10,-10),S(0,0),    S(5,5),    S(10,5),   S(10,5),   S(5,5),    S(0,0),    S(-10,-10),  // 6
    S(-10,-10),S(0,-5),   S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(0,-5),   S(-10,-10),  // 7
    S(-20,-15),S(-10,-10),S(-10,-10),S(-10,-10),S(-10,-10),S(-10,-10),S(-10,-10),S(-20,-15),  // 8
];

/// Rooks: the seventh rank, and the centre files of the back rank.
#[rustfmt::skip]
const ROOK: [Score; 64] = [
    S(0,0),    S(0,0),    S(0,0),    S(5,0),    S(5,0),    S(0,0),    S(0,0),    S(0,0),  // 1
    S(-5,0),   S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(-5,0),  // 2
    S(-5,0),   S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(-5,0),  // 3
    S(-5,0),   S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(-5,0),  // 4
    S(-5,0),   S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(-5,0),  // 5
    S(-5,0),   S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(-5,0),  // 6
    S(5,10),   S(10,10),  S(10,10),  S(10,10),  S(10,10),  S(10,10),  S(10,10),  S(5,10),  // 7
    S(0,5),    S(0,5),    S(0,5),    S(0,5),    S(0,5),    S(0,5),    S(0,5),    S(0,5),  // 8
];

#[rustfmt::skip]
const QUEEN: [Score; 64] = [
    S(-20,-20),S(-10,-15),S(-10,-10),S(-5,-10), S(-5,-10), S(-10,-10),S(-10,-15),S(-20,-20),  // 1
    S(-10,-15),S(0,-5),   S(5,0),    S(0,0),    S(0,0),    S(0,0),    S(0,-5),   S(-10,-15),  // 2
    S(-10,-10),S(5,0),    S(5,5),    S(5,5),    S(5,5),    S(5,5),    S(0,0),    S(-10,-10),  // 3
    S(0,-10),  S(0,0),    S(5,5),    S(5,10),   S(5,10),   S(5,5),    S(0,0),    S(-5,-10),  // 4
    S(-5,-10), S(0,0),    S(5,5),    S(5,10),   S(5,10),   S(5,5),    S(0,0),    S(-5,-10),  // 5
    S(-10,-10),S(0,0),    S(5,5),    S(5,5),    S(5,5),    S(5,5),    S(0,0),    S(-10,-10),  // 6
    S(-10,-15),S(0,-5),   S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(0,-5),   S(-10,-15),  // 7
    S(-20,-20),S(-10,-15),S(-10,-10),S(-5,-10), S(-5,-10), S(-10,-10),S(-10,-15),S(-20,-20),  // 8
];

/// King: tucked behind pawns in the middlegame, centralised in the endgame.
#[rustfmt::skip]
const KING: [Score; 64] = [
    S(20,-50), S(30,-30), S(10,-30), S(0,-30),  S(0,-30),  S(10,-30), S(30,-30), S(20,-50),  // 1
    S(20,-30), S(20,-30), S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(20,-30), S(20,-30),  // 2
    S(-10,-30),S(-20,-10),S(-20,20), S(-20,30), S(-20,30), S(-20,20), S(-20,-10),S(-10,-30),  // 3
    S(-20,-30),S(-30,-10),S(-30,30), S(-40,40), S(-40,40), S(-30,30), S(-30,-10),S(-20,-30),  // 4
    S(-30,-30),S(-40,-10),S(-40,30), S(-50,40), S(-50,40), S(-40,30), S(-40,-10),S(-30,-30),  // 5
    S(-30,-30),S(-40,-10),S(-40,20), S(-50,30), S(-50,30), S(-40,20), S(-40,-10),S(-30,-30),  // 6
    S(-30,-30),S(-40,-20),S(-40,-10),S(-50,0),  S(-50,0),  S(-40,-10),S(-40,-20),S(-30,-30),  // 7
    S(-30,-50),S(-40,-40),S(-40,-30),S(-50,-20),S(-50,-20),S(-40,-30),S(-40,-40),S(-30,-50),  // 8
];

const TABLES: [&[Score; 64]; 6] = [&PAWN, &KNIGHT, &BISHOP, &ROOK, &QUEEN, &KING];

/// Middlegame/endgame bonus for `piece` of `color` standing on `sq`.
#[inline]
pub fn pst_value(piece: Piece, color: Color, sq: Square) -> Score {
    let index = match color {
        Color::White => sq.to_index(),
        Color::Black => sq.to_index() ^ 56,
    };
    TABLES[piece.to_index()][index]
}

#[cfg(test)]
mod tests {
    use chess::{ALL_PIECES, ALL_SQUARES, Color, Piece, Square};

    use super::pst_value;

    #[test]
    fn central_pawn_push_is_rewarded() {
        let e4 = pst_value(Piece::Pawn, Color::White, Square::E4);
        let e2 = pst_value(Piece::Pawn, Color::White, Square::E2);
        assert!(e4.mg() > e2.mg());
    }

    #[test]
    fn black_lookup_mirrors_white() {
        for piece in ALL_PIECES {
            for sq in ALL_SQUARES {
                let flipped = flip(sq);
                assert_eq!(
                    pst_value(piece, Color::Black, sq),
                    pst_value(piece, Color::White, flipped),
                    "{piece:?} on {sq}"
                );
            }
        }
    }

    #[test]
    fn king_prefers_shelter_early_and_centre_late() {
        let g1 = pst_value(Piece::King, Color::White, Square::G1);
        let e4 = pst_value(Piece::King, Color::White, Square::E4);
        assert!(g1.mg() > e4.mg());
        assert!(e4.eg() > g1.eg());
    }

    #[test]
    fn tables_are_left_right_symmetric_for_minor_pieces() {
        for piece in [Piece::Knight, Piece::Bishop] {
            assert_eq!(
                pst_value(piece, Color::White, Square::A1),
                pst_value(piece, Color::White, Square::H1),
            );
        }
    }

    fn flip(sq: Square) -> Square {
        ALL_SQUARES[sq.to_index() ^ 56]
    }
}
