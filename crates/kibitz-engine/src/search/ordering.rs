//! Move ordering.
//!
//! Bands, highest first: the transposition-table move, killers, quiet moves
//! with a positive history score, promotions, captures by MVV/LVA, and the
//! remaining quiet moves.

use chess::Piece;
use kibitz_core::{Move, Position};

use crate::eval::material::piece_value;
use crate::search::heuristics::HistoryTable;

const TT_MOVE: i32 = 4_000_000;
const KILLER: i32 = 3_000_000;
const HISTORY: i32 = 2_000_000;
const PROMOTION: i32 = 1_000_000;
const CAPTURE: i32 = 100_000;

/// Attacker value for MVV/LVA. The king is the least desirable capturer.
fn attacker_value(piece: Piece) -> i32 {
    match piece {
        Piece::King => 1_000,
        other => piece_value(other),
    }
}

/// `victim × 10 − attacker`, or `None` if `mv` is not a capture.
pub fn mvv_lva(pos: &Position, mv: Move) -> Option<i32> {
    let victim = pos.captured_piece(mv)?;
    let attacker = pos.board().piece_on(mv.get_source()).unwrap_or(Piece::Pawn);
    Some(piece_value(victim) * 10 - attacker_value(attacker))
}

/// Incremental move picker using selection sort.
///
/// Yields moves in descending score order; ties keep generation order.
pub struct MovePicker {
    moves: Vec<(Move, i32)>,
    cursor: usize,
}

impl MovePicker {
    /// Order every legal move for the main search.
    pub fn new(
        pos: &Position,
        tt_move: Option<Move>,
        killers: [Option<Move>; 2],
        history: &HistoryTable,
    ) -> Self {
        let moves = pos
            .legal_moves()
            .into_iter()
            .map(|mv| {
                let score = if Some(mv) == tt_move {
                    TT_MOVE
                } else if Some(mv) == killers[0] {
                    KILLER + 1
                } else if Some(mv) == killers[1] {
                    KILLER
                } else if let Some(promotion) = mv.get_promotion() {
                    PROMOTION + piece_value(promotion)
                } else if let Some(mvv) = mvv_lva(pos, mv) {
                    CAPTURE + mvv
                } else if history.score(mv) > 0 {
                    HISTORY + history.score(mv).min(PROMOTION - 1)
                } else {
                    0
                };
                (mv, score)
            })
            .collect();
        Self { moves, cursor: 0 }
    }

    /// Order the legal captures for quiescence search.
    pub fn captures(pos: &Position) -> Self {
        let moves = pos
            .captures()
            .into_iter()
            .filter_map(|mv| mvv_lva(pos, mv).map(|score| (mv, score)))
            .collect();
        Self { moves, cursor: 0 }
    }

    /// Yield the next highest-scored move.
    pub fn pick_next(&mut self) -> Option<Move> {
        if self.cursor >= self.moves.len() {
            return None;
        }

        let mut best = self.cursor;
        for i in (self.cursor + 1)..self.moves.len() {
            if self.moves[i].1 > self.moves[best].1 {
                best = i;
            }
        }

        self.moves.swap(self.cursor, best);
        let mv = self.moves[self.cursor].0;
        self.cursor += 1;
        Some(mv)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use kibitz_core::{Move, Position};

    use super::{MovePicker, mvv_lva};
    use crate::search::heuristics::HistoryTable;

    fn mv(text: &str) -> Move {
        Move::from_str(text).unwrap()
    }

    fn drain(mut picker: MovePicker) -> Vec<Move> {
        std::iter::from_fn(|| picker.pick_next()).collect()
    }

    #[test]
    fn pawn_takes_queen_beats_queen_takes_pawn() {
        // White pawn on c4 and queen on a5 can both capture: c4xd5 wins a
        // queen, Qa5xa7 wins a pawn.
        let pos = Position::from_fen("4k3/p7/8/Q2q4/2P5/8/8/4K3 w - - 0 1").unwrap();
        let pxq = mvv_lva(&pos, mv("c4d5")).unwrap();
        let qxp = mvv_lva(&pos, mv("a5a7")).unwrap();
        assert!(pxq > qxp);
        assert_eq!(mvv_lva(&pos, mv("e1e2")), None);
    }

    #[test]
    fn picker_yields_every_move_once() {
        let pos = Position::new();
        let moves = drain(MovePicker::new(&pos, None, [None; 2], &HistoryTable::new()));
        assert_eq!(moves.len(), 20);
    }

    #[test]
    fn tt_move_then_killers_then_history() {
        let pos = Position::new();
        let mut history = HistoryTable::new();
        history.update(mv("b1c3"), 2);
        let picker = MovePicker::new(
            &pos,
            Some(mv("e2e4")),
            [Some(mv("d2d4")), Some(mv("g1f3"))],
            &history,
        );
        let order = drain(picker);
        assert_eq!(&order[..4], &[mv("e2e4"), mv("d2d4"), mv("g1f3"), mv("b1c3")]);
    }

    #[test]
    fn promotions_precede_captures() {
        // e7e8 promotes; Qd1xd7 captures a pawn.
        let pos = Position::from_fen("k7/3pP3/8/8/8/8/8/3QK3 w - - 0 1").unwrap();
        let order = drain(MovePicker::new(&pos, None, [None; 2], &HistoryTable::new()));
        assert_eq!(order[0], mv("e7e8q"));
        let first_capture = order.iter().position(|&m| m == mv("d1d7")).unwrap();
        let last_promotion = order.iter().rposition(|m| m.get_promotion().is_some()).unwrap();
        assert!(last_promotion < first_capture);
    }

    #[test]
    fn history_only_lifts_quiet_moves() {
        // e4xd5 shares its from/to pair with a history entry, but as a
        // capture it stays in the capture band below the quiet Ke1d2.
        let pos = Position::from_fen("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1").unwrap();
        let mut history = HistoryTable::new();
        history.update(mv("e4d5"), 10);
        history.update(mv("e1d2"), 1);
        let order = drain(MovePicker::new(&pos, None, [None; 2], &history));
        assert_eq!(&order[..2], &[mv("e1d2"), mv("e4d5")]);
    }

    #[test]
    fn capture_picker_skips_quiet_moves() {
        let pos = Position::new();
        assert!(drain(MovePicker::captures(&pos)).is_empty());

        let pos = Position::from_fen("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(drain(MovePicker::captures(&pos)), vec![mv("e4d5")]);
    }
}
