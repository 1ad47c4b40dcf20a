//! Killer moves and the history heuristic for quiet move ordering.

use kibitz_core::Move;

use crate::search::pvs::MAX_PLY;

/// Up to two quiet moves per remaining depth that caused a beta cutoff.
#[derive(Debug, Clone)]
pub struct KillerTable {
    slots: Vec<[Option<Move>; 2]>,
}

impl KillerTable {
    pub fn new() -> Self {
        Self {
            slots: vec![[None; 2]; MAX_PLY],
        }
    }

    /// Record `mv` as the newest killer at `depth`.
    ///
    /// The previous newest killer moves to the second slot unless it is
    /// `mv` itself.
    pub fn store(&mut self, depth: i32, mv: Move) {
        let Some(slot) = usize::try_from(depth).ok().and_then(|d| self.slots.get_mut(d)) else {
            return;
        };
        if slot[0] != Some(mv) {
            slot[1] = slot[0];
            slot[0] = Some(mv);
        }
    }

    /// Killers at `depth`, newest first.
    pub fn get(&self, depth: i32) -> [Option<Move>; 2] {
        usize::try_from(depth)
            .ok()
            .and_then(|d| self.slots.get(d))
            .copied()
            .unwrap_or([None; 2])
    }

    /// Number of occupied slots across all depths.
    pub fn occupied(&self) -> usize {
        self.slots.iter().flatten().filter(|m| m.is_some()).count()
    }

    pub fn clear(&mut self) {
        self.slots.fill([None; 2]);
    }
}

impl Default for KillerTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Cutoff counts per (origin, destination) square pair.
///
/// Scores saturate at `i32::MAX` and are never decayed.
#[derive(Debug, Clone)]
pub struct HistoryTable {
    table: Box<[[i32; 64]; 64]>,
}

impl HistoryTable {
    pub fn new() -> Self {
        Self {
            table: Box::new([[0; 64]; 64]),
        }
    }

    /// Reward a quiet move that caused a cutoff at `depth`.
    pub fn update(&mut self, mv: Move, depth: i32) {
        let bonus = depth.saturating_mul(depth);
        let entry = &mut self.table[mv.get_source().to_index()][mv.get_dest().to_index()];
        *entry = entry.saturating_add(bonus);
    }

    pub fn score(&self, mv: Move) -> i32 {
        self.table[mv.get_source().to_index()][mv.get_dest().to_index()]
    }

    pub fn clear(&mut self) {
        self.table.iter_mut().for_each(|row| row.fill(0));
    }
}

impl Default for HistoryTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use kibitz_core::Move;

    use super::*;

    fn mv(text: &str) -> Move {
        Move::from_str(text).unwrap()
    }

    #[test]
    fn killers_are_newest_first() {
        let mut kt = KillerTable::new();
        kt.store(4, mv("e2e4"));
        kt.store(4, mv("d2d4"));
        assert_eq!(kt.get(4), [Some(mv("d2d4")), Some(mv("e2e4"))]);

        // A third killer evicts the oldest.
        kt.store(4, mv("c2c4"));
        assert_eq!(kt.get(4), [Some(mv("c2c4")), Some(mv("d2d4"))]);
        assert!(!kt.get(4).contains(&Some(mv("e2e4"))));
    }

    #[test]
    fn repeated_killer_does_not_shift() {
        let mut kt = KillerTable::new();
        kt.store(2, mv("e2e4"));
        kt.store(2, mv("d2d4"));
        kt.store(2, mv("d2d4"));
        assert_eq!(kt.get(2)[1], Some(mv("e2e4")));
        assert_eq!(kt.occupied(), 2);
    }

    #[test]
    fn killers_are_per_depth_and_clearable() {
        let mut kt = KillerTable::new();
        kt.store(3, mv("g1f3"));
        assert_eq!(kt.get(2), [None; 2]);
        kt.store(-1, mv("g1f3"));
        kt.store(10_000, mv("g1f3"));
        assert_eq!(kt.occupied(), 1);
        kt.clear();
        assert_eq!(kt.occupied(), 0);
    }

    #[test]
    fn history_adds_depth_squared() {
        let mut ht = HistoryTable::new();
        ht.update(mv("g1f3"), 3);
        ht.update(mv("g1f3"), 2);
        assert_eq!(ht.score(mv("g1f3")), 13);
        assert_eq!(ht.score(mv("b1c3")), 0);
    }

    #[test]
    fn history_saturates() {
        let mut ht = HistoryTable::new();
        for _ in 0..10 {
            ht.update(mv("a2a3"), 40_000);
        }
        assert_eq!(ht.score(mv("a2a3")), i32::MAX);
        ht.clear();
        assert_eq!(ht.score(mv("a2a3")), 0);
    }
}
