//! Capture-only search at the horizon.

use kibitz_core::Position;

use crate::search::ordering::MovePicker;
use crate::search::pvs::{MAX_PLY, SearchContext};

/// Resolve captures below a leaf so the static score is not taken in the
/// middle of an exchange.
///
/// `qply` counts plies since the main search handed over and is capped by
/// `quiescence_max_ply`; `ply` is the distance from the root. Fail-hard:
/// the result is clamped to `[alpha, beta]`.
pub(crate) fn quiescence(
    pos: &mut Position,
    mut alpha: i32,
    beta: i32,
    qply: i32,
    ply: usize,
    ctx: &mut SearchContext<'_>,
) -> i32 {
    ctx.nodes += 1;

    let stand_pat = ctx.static_eval(pos, ply);
    if qply >= ctx.params.quiescence_max_ply || ply >= MAX_PLY || pos.is_checkmate() {
        return stand_pat;
    }

    if stand_pat >= beta {
        return beta;
    }
    if ctx.params.delta_pruning && stand_pat < alpha - ctx.params.delta_margin {
        return alpha;
    }
    if stand_pat > alpha {
        alpha = stand_pat;
    }

    let mut picker = MovePicker::captures(pos);
    while let Some(mv) = picker.pick_next() {
        pos.apply(mv);
        let score = -quiescence(pos, -beta, -alpha, qply + 1, ply + 1, ctx);
        pos.undo();

        if score >= beta {
            return beta;
        }
        if score > alpha {
            alpha = score;
        }
    }

    alpha
}
