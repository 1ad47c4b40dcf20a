//! Static evaluation.
//!
//! Scores are in centipawns from White's point of view. Terminal positions
//! and bare-king endings are recognised up front; everything else goes
//! through the weighted positional terms, blended by game phase.

pub mod development;
pub mod endgame;
pub mod king_safety;
pub mod material;
pub mod mating;
pub mod mobility;
pub mod pawns;
pub mod phase;
pub mod pst;
pub mod rooks;
pub mod score;
pub mod weights;

use chess::{Board, BoardStatus, Color};
use kibitz_core::Position;

use development::{can_castle, center_pieces, undeveloped_minors};
use endgame::{is_late_endgame, late_endgame};
use king_safety::king_safety;
use material::{bishop_pair, material};
use mating::mating_pattern;
use mobility::mobility;
use pawns::pawn_structure;
use phase::{ENDGAME_PHASE, game_phase};
use pst::pst_value;
use rooks::rooks;
use weights::EvalWeights;

/// Score of a checkmated position from the winner's side.
pub const MATE_SCORE: i32 = 100_000;

/// Weighted static evaluator.
#[derive(Debug, Clone)]
pub struct Evaluator {
    weights: EvalWeights,
    mating_patterns: bool,
}

impl Evaluator {
    pub fn new(weights: EvalWeights) -> Self {
        Self {
            weights,
            mating_patterns: true,
        }
    }

    /// Enable or disable the bare-king shortcut.
    pub fn with_mating_patterns(mut self, enabled: bool) -> Self {
        self.mating_patterns = enabled;
        self
    }

    pub fn weights(&self) -> &EvalWeights {
        &self.weights
    }

    /// White-positive value of a draw with `side` to move.
    ///
    /// The side to move is charged the contempt penalty.
    pub fn contempt_score(&self, side: Color) -> i32 {
        let contempt = self.weights.contempt.round() as i32;
        match side {
            Color::White => -contempt,
            Color::Black => contempt,
        }
    }

    /// Evaluate `pos` given the placement keys of the positions before it.
    pub fn evaluate(&self, pos: &Position, history: &[u64]) -> i32 {
        let board = pos.board();
        let side = board.side_to_move();

        match board.status() {
            BoardStatus::Checkmate => {
                return match side {
                    Color::White => -MATE_SCORE,
                    Color::Black => MATE_SCORE,
                };
            }
            BoardStatus::Stalemate => return self.contempt_score(side),
            BoardStatus::Ongoing => {}
        }

        if pos.is_draw_by_insufficient_material() {
            return self.contempt_score(side);
        }

        let key = pos.placement_key();
        if history.iter().filter(|&&k| k == key).count() >= 2 {
            return self.contempt_score(side);
        }

        if self.mating_patterns {
            if let Some(bonus) = mating_pattern(board) {
                return bonus;
            }
        }

        self.positional(board)
    }

    /// Material, piece-square and weighted terms, without terminal checks.
    fn positional(&self, board: &Board) -> i32 {
        let w = &self.weights;
        let phase = game_phase(board);
        let endgame = phase <= ENDGAME_PHASE;

        let mut score = material(board);
        for sq in *board.combined() {
            if let (Some(piece), Some(color)) = (board.piece_on(sq), board.color_on(sq)) {
                let value = pst_value(piece, color, sq).taper(phase);
                score += match color {
                    Color::White => value,
                    Color::Black => -value,
                };
            }
        }

        let side_terms = |color: Color| -> f32 {
            let castling = if can_castle(board, color) { w.castling } else { 0.0 };
            let mut terms = bishop_pair(board, color, w)
                + center_pieces(board, color) as f32 * w.center_control
                - undeveloped_minors(board, color) as f32 * w.development
                + castling
                + pawn_structure(board, color, w)
                + rooks(board, color, w);
            if !endgame {
                terms += king_safety(board, color, w);
            }
            terms
        };

        let mut weighted = side_terms(Color::White) - side_terms(Color::Black);
        if !endgame {
            weighted += w.mobility * mobility(board) as f32;
        }
        weighted += match board.side_to_move() {
            Color::White => w.tempo,
            Color::Black => -w.tempo,
        };
        score += weighted.round() as i32;

        if is_late_endgame(board) {
            score += late_endgame(board);
        }

        score
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(EvalWeights::default())
    }
}

/// Evaluate `pos` with the default weights.
pub fn evaluate(pos: &Position, history: &[u64]) -> i32 {
    Evaluator::default().evaluate(pos, history)
}
