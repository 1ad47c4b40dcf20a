//! Search algorithms and move ordering.

pub mod heuristics;
pub mod ordering;
pub mod params;
pub mod pvs;
pub mod quiescence;
pub mod tt;

use kibitz_core::{Move, Position};
use tracing::{debug, info};

use crate::book::OpeningBook;
use crate::eval::Evaluator;
use heuristics::{HistoryTable, KillerTable};
use params::SearchParams;
use pvs::{INF, MATE_THRESHOLD, SearchContext, pvs};
use tt::TranspositionTable;

/// Tables that persist across searches of one game.
#[derive(Debug, Default)]
pub struct SearchTables {
    pub tt: TranspositionTable,
    pub killers: KillerTable,
    pub history: HistoryTable,
}

impl SearchTables {
    /// Clear the transposition and killer tables once they outgrow the
    /// bounds in `params`. The history table is kept.
    pub fn enforce_limits(&mut self, params: &SearchParams) {
        if self.tt.clear_if_over(params.tt_max_entries) {
            debug!(max = params.tt_max_entries, "transposition table cleared");
        }
        if self.killers.occupied() > params.killer_max_entries {
            self.killers.clear();
            debug!(max = params.killer_max_entries, "killer table cleared");
        }
    }

    pub fn clear(&mut self) {
        self.tt.clear();
        self.killers.clear();
        self.history.clear();
    }
}

/// Result of a completed search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Best move, or `None` if the side to move has no legal move.
    pub best_move: Option<Move>,
    /// Score in centipawns for the side to move.
    pub score: i32,
    /// Last completed depth. Zero for book moves and terminal positions.
    pub depth: i32,
    pub nodes: u64,
    /// Full-window re-searches after aspiration failures.
    pub re_searches: u32,
    pub from_book: bool,
}

/// Run PVS at `depth` inside `prev_score ± window`, widening to the full
/// window once if the result falls outside.
pub(crate) fn aspiration_search(
    pos: &mut Position,
    depth: i32,
    prev_score: i32,
    window: i32,
    ctx: &mut SearchContext<'_>,
) -> (i32, Option<Move>) {
    let alpha = prev_score.saturating_sub(window).max(-INF);
    let beta = prev_score.saturating_add(window).min(INF);

    let (score, best) = pvs(pos, depth, 0, alpha, beta, true, ctx);
    if score > alpha && score < beta {
        return (score, best);
    }

    ctx.re_searches += 1;
    debug!(depth, score, alpha, beta, "aspiration failed, re-searching");
    pvs(pos, depth, 0, -INF, INF, true, ctx)
}

/// Iterative-deepening searcher.
///
/// Owns its evaluator, parameters, and tables. The tables carry over from
/// one call to the next until [`reset`](Self::reset).
#[derive(Debug)]
pub struct Searcher {
    evaluator: Evaluator,
    params: SearchParams,
    tables: SearchTables,
    book: Option<OpeningBook>,
}

impl Searcher {
    /// Create a searcher that consults the standard opening book.
    pub fn new(evaluator: Evaluator, params: SearchParams) -> Self {
        Self {
            evaluator,
            params,
            tables: SearchTables::default(),
            book: Some(OpeningBook::standard()),
        }
    }

    pub fn without_book(mut self) -> Self {
        self.book = None;
        self
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    pub fn tables(&self) -> &SearchTables {
        &self.tables
    }

    /// Forget everything learned in previous searches.
    pub fn reset(&mut self) {
        self.tables.clear();
    }

    /// Best move for the side to move, or `None` if there is none.
    pub fn choose_move(&mut self, pos: &mut Position, max_depth: i32) -> Option<Move> {
        self.search(pos, max_depth).best_move
    }

    /// Search `pos` to `max_depth` plies.
    ///
    /// `pos` is only borrowed mutably for apply/undo and is returned in the
    /// state it was passed in.
    pub fn search(&mut self, pos: &mut Position, max_depth: i32) -> SearchResult {
        if let Some(mv) = self.book_move(pos) {
            info!(mv = %mv, "book move");
            return SearchResult {
                best_move: Some(mv),
                score: 0,
                depth: 0,
                nodes: 0,
                re_searches: 0,
                from_book: true,
            };
        }

        self.tables.enforce_limits(&self.params);

        let mut ctx = SearchContext {
            tables: &mut self.tables,
            evaluator: &self.evaluator,
            params: &self.params,
            position_history: pos.history_keys(),
            nodes: 0,
            re_searches: 0,
            root_depth: 0,
        };

        let legal = pos.legal_moves();
        if legal.is_empty() {
            let score = ctx.static_eval(pos, 0);
            return SearchResult {
                best_move: None,
                score,
                depth: 0,
                nodes: 0,
                re_searches: 0,
                from_book: false,
            };
        }

        let mut best_move = None;
        let mut best_score = -INF;
        let mut completed_depth = 0;

        for depth in 1..=max_depth.max(1) {
            ctx.root_depth = depth;
            let (score, mv) = if depth == 1 {
                pvs(pos, depth, 0, -INF, INF, true, &mut ctx)
            } else {
                aspiration_search(pos, depth, best_score, self.params.aspiration_window, &mut ctx)
            };

            if mv.is_some() {
                best_move = mv;
            }
            best_score = score;
            completed_depth = depth;

            info!(
                depth,
                score,
                nodes = ctx.nodes,
                best = %best_move.map(|m| m.to_string()).unwrap_or_default(),
                "iteration complete"
            );

            if score.abs() >= MATE_THRESHOLD {
                break;
            }
        }

        SearchResult {
            best_move: best_move.or_else(|| legal.first().copied()),
            score: best_score,
            depth: completed_depth,
            nodes: ctx.nodes,
            re_searches: ctx.re_searches,
            from_book: false,
        }
    }

    fn book_move(&self, pos: &Position) -> Option<Move> {
        self.book
            .as_ref()?
            .probe(pos.canonical_key())
            .filter(|&mv| pos.board().legal(mv))
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(Evaluator::default(), SearchParams::default())
    }
}

#[cfg(test)]
mod tests {
    use kibitz_core::{Color, Position};

    use super::*;
    use crate::eval::MATE_SCORE;

    fn searcher() -> Searcher {
        Searcher::default().without_book()
    }

    #[test]
    fn depth_1_returns_legal_move() {
        let mut pos = Position::new();
        let result = searcher().search(&mut pos, 1);
        let mv = result.best_move.expect("a move from the start position");
        assert!(pos.board().legal(mv));
        assert_eq!(result.depth, 1);
        assert!(!result.from_book);
    }

    #[test]
    fn far_off_window_triggers_one_re_search() {
        let evaluator = Evaluator::default();
        let params = SearchParams::default();
        let mut tables = SearchTables::default();
        let mut ctx = SearchContext {
            tables: &mut tables,
            evaluator: &evaluator,
            params: &params,
            position_history: Vec::new(),
            nodes: 0,
            re_searches: 0,
            root_depth: 2,
        };
        let mut pos = Position::new();
        let (score, best) = aspiration_search(&mut pos, 2, 5_000, 50, &mut ctx);
        assert_eq!(ctx.re_searches, 1);
        assert!(score.abs() < 1_000, "full-window score {score}");
        assert!(best.is_some());
    }

    #[test]
    fn window_around_true_score_needs_no_re_search() {
        let evaluator = Evaluator::default();
        let params = SearchParams::exhaustive();
        let mut tables = SearchTables::default();
        let mut pos = Position::new();

        let mut ctx = SearchContext {
            tables: &mut tables,
            evaluator: &evaluator,
            params: &params,
            position_history: Vec::new(),
            nodes: 0,
            re_searches: 0,
            root_depth: 2,
        };
        let (exact, _) = pvs(&mut pos, 2, 0, -INF, INF, true, &mut ctx);
        ctx.tables.clear();
        let (score, _) = aspiration_search(&mut pos, 2, exact, 50, &mut ctx);
        assert_eq!(ctx.re_searches, 0);
        assert_eq!(score, exact);
    }

    #[test]
    fn depth_1_result_includes_the_recapture() {
        let mut pos = Position::from_fen("4k3/7p/2p5/3q4/4P3/8/P7/4K3 w - - 0 1").unwrap();
        let static_score = crate::eval::evaluate(&pos, &[]);
        let result = searcher().search(&mut pos, 1);
        assert_eq!(result.best_move.map(|m| m.to_string()).as_deref(), Some("e4d5"));
        // Queen for a pawn nets about 800 over the static score.
        assert!(
            result.score >= static_score + 500,
            "static {static_score}, searched {}",
            result.score
        );
    }

    #[test]
    fn finds_mate_in_one_and_stops_early() {
        let mut pos = Position::from_fen("6k1/5ppp/8/8/8/8/5PPP/3R2K1 w - - 0 1").unwrap();
        let result = searcher().search(&mut pos, 6);
        assert_eq!(result.best_move.map(|m| m.to_string()).as_deref(), Some("d1d8"));
        assert_eq!(result.score, MATE_SCORE - 1);
        assert!(result.depth < 6, "search should stop once mate is found");
    }

    #[test]
    fn no_legal_moves_returns_none() {
        // Stalemate: black king on a8, white queen on b6.
        let mut pos = Position::from_fen("k7/8/1Q6/8/8/8/8/4K3 b - - 0 1").unwrap();
        let mut s = searcher();
        let result = s.search(&mut pos, 3);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, -s.evaluator().contempt_score(Color::Black));

        // Checkmated side gets the losing sentinel.
        let mut pos = Position::from_fen(
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
        )
        .unwrap();
        let result = s.search(&mut pos, 3);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, -MATE_SCORE);
    }

    #[test]
    fn book_move_is_returned_verbatim() {
        let mut pos = Position::new();
        let result = Searcher::default().search(&mut pos, 3);
        assert!(result.from_book);
        assert_eq!(result.best_move.map(|m| m.to_string()).as_deref(), Some("e2e4"));
        assert_eq!(result.nodes, 0);
    }

    #[test]
    fn tables_persist_until_reset() {
        let mut s = searcher();
        let mut pos = Position::new();
        s.search(&mut pos, 2);
        assert!(!s.tables().tt.is_empty());
        s.reset();
        assert!(s.tables().tt.is_empty());
        assert_eq!(s.tables().killers.occupied(), 0);
    }

    #[test]
    fn oversized_tables_are_cleared_before_search() {
        let params = SearchParams {
            tt_max_entries: 0,
            ..SearchParams::default()
        };
        let mut tables = SearchTables::default();
        tables.tt.store(1, 1, 0, tt::Bound::Exact, None, 0);
        tables.enforce_limits(&params);
        assert!(tables.tt.is_empty());
    }
}
