//! Transposition table keyed by the canonical position hash.
//!
//! Stores are unconditional: a newer result for a key always replaces the
//! old one. The driver clears the whole table once it grows past its size
//! bound.

use std::collections::HashMap;

use kibitz_core::Move;

use crate::search::pvs::MATE_THRESHOLD;

/// How a stored score relates to the true value of the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// The score is exact.
    Exact,
    /// The search failed high: the true score is at least this.
    Lower,
    /// The search failed low: the true score is at most this.
    Upper,
}

/// One cached search result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtEntry {
    /// Remaining depth the result was searched to.
    pub depth: i32,
    /// Score relative to the side to move, with mate distance counted from
    /// the probing node.
    pub score: i32,
    pub bound: Bound,
    pub best_move: Option<Move>,
}

/// Adjust a mate score from root-relative to node-relative before storing.
///
/// Mate scores encode distance from the root. The table stores them
/// relative to the node so they stay correct when reached at another ply.
pub fn score_to_tt(score: i32, ply: usize) -> i32 {
    let ply = ply as i32;
    if score > MATE_THRESHOLD {
        score + ply
    } else if score < -MATE_THRESHOLD {
        score - ply
    } else {
        score
    }
}

/// Reverse [`score_to_tt`] for a node at `ply`.
pub fn score_from_tt(score: i32, ply: usize) -> i32 {
    let ply = ply as i32;
    if score > MATE_THRESHOLD {
        score - ply
    } else if score < -MATE_THRESHOLD {
        score + ply
    } else {
        score
    }
}

#[derive(Debug, Default)]
pub struct TranspositionTable {
    entries: HashMap<u64, TtEntry>,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Look up `key`, returning the entry with its score adjusted to `ply`.
    pub fn probe(&self, key: u64, ply: usize) -> Option<TtEntry> {
        self.entries.get(&key).map(|entry| TtEntry {
            score: score_from_tt(entry.score, ply),
            ..*entry
        })
    }

    /// Store a result for `key`, replacing any previous entry.
    pub fn store(
        &mut self,
        key: u64,
        depth: i32,
        score: i32,
        bound: Bound,
        best_move: Option<Move>,
        ply: usize,
    ) {
        self.entries.insert(
            key,
            TtEntry {
                depth,
                score: score_to_tt(score, ply),
                bound,
                best_move,
            },
        );
    }

    /// Clear the table if it holds more than `max_entries` entries.
    ///
    /// Returns `true` if the table was cleared.
    pub fn clear_if_over(&mut self, max_entries: usize) -> bool {
        if self.entries.len() > max_entries {
            self.entries.clear();
            true
        } else {
            false
        }
    }
}
