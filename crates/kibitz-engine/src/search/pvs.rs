//! Principal variation search.

use chess::Color;
use kibitz_core::{Move, Position};

use crate::eval::{Evaluator, MATE_SCORE};
use crate::search::SearchTables;
use crate::search::ordering::MovePicker;
use crate::search::params::SearchParams;
use crate::search::quiescence::quiescence;
use crate::search::tt::Bound;

/// Score representing an unreachable upper/lower bound.
pub const INF: i32 = 1_000_000;

/// Scores beyond this magnitude are forced mates.
pub const MATE_THRESHOLD: i32 = MATE_SCORE - 1000;

/// Maximum search ply; deeper nodes are scored statically.
pub const MAX_PLY: usize = 128;

/// Search state threaded through the recursion.
pub(crate) struct SearchContext<'a> {
    pub tables: &'a mut SearchTables,
    pub evaluator: &'a Evaluator,
    pub params: &'a SearchParams,
    /// Placement keys of the positions before the current node.
    pub position_history: Vec<u64>,
    pub nodes: u64,
    /// Full-window re-searches after an aspiration failure.
    pub re_searches: u32,
    /// Depth of the current iteration, bounding check extensions.
    pub root_depth: i32,
}

impl SearchContext<'_> {
    /// Static evaluation relative to the side to move at `ply`.
    ///
    /// A checkmated side scores `-(MATE_SCORE - ply)` wherever the mate is
    /// found, so nearer mates always rank higher.
    pub fn static_eval(&self, pos: &Position, ply: usize) -> i32 {
        if pos.is_checkmate() {
            return -(MATE_SCORE - ply as i32);
        }
        let score = self.evaluator.evaluate(pos, &self.position_history);
        relative(score, pos.side_to_move())
    }

    /// Draw score relative to the side to move.
    pub fn draw_score(&self, pos: &Position) -> i32 {
        let side = pos.side_to_move();
        relative(self.evaluator.contempt_score(side), side)
    }
}

#[inline]
fn relative(white_score: i32, side: Color) -> i32 {
    match side {
        Color::White => white_score,
        Color::Black => -white_score,
    }
}

/// Search `pos` to `depth` within `(alpha, beta)`.
///
/// Returns the score for the side to move and the best move found, if any.
/// The position is restored before returning.
pub(crate) fn pvs(
    pos: &mut Position,
    mut depth: i32,
    ply: usize,
    mut alpha: i32,
    beta: i32,
    null_allowed: bool,
    ctx: &mut SearchContext<'_>,
) -> (i32, Option<Move>) {
    ctx.nodes += 1;
    let key = pos.canonical_key();
    let is_root = ply == 0;

    let mut tt_move = None;
    if let Some(entry) = ctx.tables.tt.probe(key, ply) {
        tt_move = entry.best_move;
        if entry.depth >= depth {
            let cutoff = match entry.bound {
                Bound::Exact => true,
                Bound::Lower => entry.score >= beta,
                Bound::Upper => entry.score <= alpha,
            };
            if cutoff {
                if !is_root {
                    return (entry.score, entry.best_move);
                }
                // At the root only a cutoff that names a legal move will do.
                if let Some(mv) = entry.best_move.filter(|&mv| pos.board().legal(mv)) {
                    return (entry.score, Some(mv));
                }
            }
        }
    }

    if !is_root && ctx.position_history.contains(&pos.placement_key()) {
        return (ctx.draw_score(pos), None);
    }

    if pos.is_game_over() {
        let score = ctx.static_eval(pos, ply);
        ctx.tables.tt.store(key, depth, score, Bound::Exact, None, ply);
        return (score, None);
    }

    if ply >= MAX_PLY {
        return (ctx.static_eval(pos, ply), None);
    }

    let in_check = pos.is_in_check();
    if in_check && ctx.params.check_extension && (ply as i32) < 2 * ctx.root_depth {
        depth += 1;
    }

    if depth <= 0 {
        return (quiescence(pos, alpha, beta, 0, ply, ctx), None);
    }

    let params = ctx.params;
    let side = pos.side_to_move();
    let prunable = !is_root && !in_check;
    let needs_static = prunable && depth <= 2 && (params.razoring || params.futility);
    let static_eval = if needs_static { ctx.static_eval(pos, ply) } else { 0 };

    if params.null_move && null_allowed && prunable && depth >= 3 && pos.has_non_pawn_material(side) {
        // The pass keeps the placement, so the current key is only pushed
        // onto the history after this probe.
        if pos.apply_null() {
            let reduced = depth - 1 - params.null_move_r;
            let (score, _) = pvs(pos, reduced, ply + 1, -beta, -beta + 1, false, ctx);
            pos.undo();
            if -score >= beta {
                return (beta, None);
            }
        }
    }

    if params.razoring
        && prunable
        && depth <= 2
        && static_eval + params.razor_margin_mult * depth < alpha
    {
        let score = quiescence(pos, alpha - 1, alpha, 0, ply, ctx);
        if score < alpha {
            return (score, None);
        }
    }

    let futile = params.futility
        && prunable
        && depth <= 2
        && static_eval + params.futility_margin_mult * depth <= alpha;

    let late_move_limit = params.late_move_pruning_base + (depth * depth).max(0) as usize;
    let late_move_prunable = params.late_move_pruning && prunable && depth <= 3;

    let original_alpha = alpha;
    let mut best_score = -INF;
    let mut best_move = None;
    let mut picker = MovePicker::new(
        pos,
        tt_move,
        ctx.tables.killers.get(depth),
        &ctx.tables.history,
    );

    ctx.position_history.push(pos.placement_key());
    let mut index = 0usize;
    while let Some(mv) = picker.pick_next() {
        let is_capture = pos.is_capture(mv);
        let quiet = pos.is_quiet(mv);

        if quiet && index > 0 && (futile || (late_move_prunable && index >= late_move_limit)) {
            index += 1;
            continue;
        }

        pos.apply(mv);
        let score = if index == 0 {
            -pvs(pos, depth - 1, ply + 1, -beta, -alpha, true, ctx).0
        } else {
            let reduction = if params.lmr && depth >= 3 && quiet && !in_check && !pos.is_in_check() {
                if index >= params.lmr_threshold_deep {
                    params.lmr_reduction_2
                } else if index >= params.lmr_threshold {
                    params.lmr_reduction_1
                } else {
                    0
                }
            } else {
                0
            };

            let mut score = -pvs(pos, depth - 1 - reduction, ply + 1, -alpha - 1, -alpha, true, ctx).0;
            if score > alpha && (reduction > 0 || score < beta) {
                score = -pvs(pos, depth - 1, ply + 1, -beta, -alpha, true, ctx).0;
            }
            score
        };
        pos.undo();
        index += 1;

        if score > best_score {
            best_score = score;
            best_move = Some(mv);
        }
        if score > alpha {
            alpha = score;
        }
        if alpha >= beta {
            if !is_capture {
                ctx.tables.killers.store(depth, mv);
                ctx.tables.history.update(mv, depth);
            }
            break;
        }
    }
    ctx.position_history.pop();

    let bound = if best_score <= original_alpha {
        Bound::Upper
    } else if best_score >= beta {
        Bound::Lower
    } else {
        Bound::Exact
    };
    ctx.tables.tt.store(key, depth, best_score, bound, best_move, ply);

    (best_score, best_move)
}

#[cfg(test)]
mod tests {
    use chess::BoardStatus;
    use kibitz_core::Position;

    use super::*;
    use crate::search::quiescence::quiescence;

    fn context<'a>(
        tables: &'a mut SearchTables,
        evaluator: &'a Evaluator,
        params: &'a SearchParams,
        root_depth: i32,
    ) -> SearchContext<'a> {
        SearchContext {
            tables,
            evaluator,
            params,
            position_history: Vec::new(),
            nodes: 0,
            re_searches: 0,
            root_depth,
        }
    }

    /// Plain minimax to `depth` with full-window quiescence at the leaves.
    fn minimax(pos: &mut Position, depth: i32, ply: usize, ctx: &mut SearchContext<'_>) -> i32 {
        match pos.board().status() {
            BoardStatus::Checkmate => return -(MATE_SCORE - ply as i32),
            BoardStatus::Stalemate => return ctx.static_eval(pos, ply),
            BoardStatus::Ongoing => {}
        }
        if pos.is_draw_by_insufficient_material() {
            return ctx.static_eval(pos, ply);
        }
        if depth == 0 {
            return quiescence(pos, -INF, INF, 0, ply, ctx);
        }
        let mut best = -INF;
        for mv in pos.legal_moves() {
            pos.apply(mv);
            best = best.max(-minimax(pos, depth - 1, ply + 1, ctx));
            pos.undo();
        }
        best
    }

    #[test]
    fn matches_minimax_without_forward_pruning() {
        let evaluator = Evaluator::default();
        let params = SearchParams::exhaustive();
        for fen in [
            "4k3/ppp2ppp/3n4/8/4N3/8/PPP2PPP/4K3 w - - 0 1",
            "4k3/7p/2p5/3q4/4P3/8/P7/4K3 w - - 0 1",
            "6k1/5ppp/8/8/8/8/5PPP/3R2K1 w - - 0 1",
        ] {
            let mut pos = Position::from_fen(fen).unwrap();

            let mut reference_tables = SearchTables::default();
            let mut ctx = context(&mut reference_tables, &evaluator, &params, 3);
            let expected = minimax(&mut pos, 3, 0, &mut ctx);

            let mut tables = SearchTables::default();
            let mut ctx = context(&mut tables, &evaluator, &params, 3);
            let (score, best) = pvs(&mut pos, 3, 0, -INF, INF, true, &mut ctx);

            assert_eq!(score, expected, "PVS disagrees with minimax on {fen}");
            assert!(best.is_some());
        }
    }

    #[test]
    fn second_identical_call_is_answered_from_the_table() {
        let evaluator = Evaluator::default();
        let params = SearchParams::default();
        let mut tables = SearchTables::default();
        let mut pos = Position::new();

        let mut ctx = context(&mut tables, &evaluator, &params, 3);
        let (first_score, first_move) = pvs(&mut pos, 3, 0, -INF, INF, true, &mut ctx);
        assert!(ctx.nodes > 1);

        let mut ctx = context(&mut tables, &evaluator, &params, 3);
        let (second_score, second_move) = pvs(&mut pos, 3, 0, -INF, INF, true, &mut ctx);
        assert_eq!(ctx.nodes, 1, "no children should be expanded");
        assert_eq!((second_score, second_move), (first_score, first_move));
    }

    #[test]
    fn shorter_mate_scores_higher() {
        let evaluator = Evaluator::default();
        let params = SearchParams::default();
        let mut tables = SearchTables::default();
        // Back-rank mate in one: Rd8#.
        let mut pos = Position::from_fen("6k1/5ppp/8/8/8/8/5PPP/3R2K1 w - - 0 1").unwrap();
        let mut ctx = context(&mut tables, &evaluator, &params, 2);
        let (score, best) = pvs(&mut pos, 2, 0, -INF, INF, true, &mut ctx);
        assert_eq!(best.map(|m| m.to_string()).as_deref(), Some("d1d8"));
        assert_eq!(score, MATE_SCORE - 1);
    }

    #[test]
    fn horizon_mate_matches_searched_mate() {
        let evaluator = Evaluator::default();
        let params = SearchParams::default();
        let fen = "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4";

        // Qxf7# from a node two plies below the root, seen once through
        // quiescence and once through a full ply of search.
        let mut scores = Vec::new();
        for depth in [0, 1] {
            let mut tables = SearchTables::default();
            let mut ctx = context(&mut tables, &evaluator, &params, 2);
            let mut pos = Position::from_fen(fen).unwrap();
            scores.push(pvs(&mut pos, depth, 2, -INF, INF, true, &mut ctx).0);
        }
        assert_eq!(scores, vec![MATE_SCORE - 3, MATE_SCORE - 3]);
    }

    #[test]
    fn depth_one_wins_the_queen_through_quiescence() {
        let evaluator = Evaluator::default();
        let params = SearchParams::default();
        let mut tables = SearchTables::default();
        // exd5 wins the queen; cxd5 only recovers a pawn.
        let mut pos = Position::from_fen("4k3/7p/2p5/3q4/4P3/8/P7/4K3 w - - 0 1").unwrap();
        let mut ctx = context(&mut tables, &evaluator, &params, 1);
        let stand_pat = ctx.static_eval(&pos, 0);
        let (score, best) = pvs(&mut pos, 1, 0, -INF, INF, true, &mut ctx);
        assert_eq!(best.map(|m| m.to_string()).as_deref(), Some("e4d5"));
        assert!(score >= stand_pat + 500, "static {stand_pat}, searched {score}");
    }

    #[test]
    fn repetition_returns_contempt_draw() {
        let evaluator = Evaluator::default();
        let params = SearchParams::default();
        let mut tables = SearchTables::default();
        let mut pos = Position::new();
        for text in ["g1f3", "g8f6", "f3g1"] {
            pos.apply(text.parse().unwrap());
        }
        // Black to move; f6g8 would restore the initial placement.
        let mut ctx = context(&mut tables, &evaluator, &params, 1);
        ctx.position_history = pos.history_keys();
        ctx.position_history.push(pos.placement_key());
        pos.apply("f6g8".parse().unwrap());
        let (score, best) = pvs(&mut pos, 2, 1, -INF, INF, true, &mut ctx);
        assert_eq!(best, None);
        assert_eq!(score, -(evaluator.weights().contempt as i32));
    }

    #[test]
    fn position_is_restored_after_search() {
        let evaluator = Evaluator::default();
        let params = SearchParams::default();
        let mut tables = SearchTables::default();
        let mut pos = Position::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .unwrap();
        let before = pos.clone();
        let mut ctx = context(&mut tables, &evaluator, &params, 3);
        pvs(&mut pos, 3, 0, -INF, INF, true, &mut ctx);
        assert_eq!(pos, before);
        assert!(ctx.position_history.is_empty());
    }
}
