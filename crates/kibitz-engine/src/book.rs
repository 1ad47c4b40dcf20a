//! A small built-in opening book.

use std::collections::HashMap;

use kibitz_core::{Move, Position, parse_move};
use tracing::warn;

/// Book lines in UCI notation, each played from the initial position.
///
/// Every prefix of a line maps to the move that follows it. When two lines
/// share a prefix the earlier line decides.
const STANDARD_LINES: &[&str] = &[
    "e2e4 e7e5 g1f3 b8c6 f1b5 a7a6 b5a4 g8f6 e1g1",
    "e2e4 e7e5 g1f3 b8c6 f1c4 f8c5 c2c3 g8f6",
    "e2e4 e7e5 g1f3 g8f6 f3e5 d7d6 e5f3",
    "e2e4 c7c5 g1f3 d7d6 d2d4 c5d4 f3d4 g8f6 b1c3",
    "e2e4 c7c5 g1f3 b8c6 d2d4 c5d4 f3d4",
    "e2e4 e7e6 d2d4 d7d5 b1c3 g8f6",
    "e2e4 c7c6 d2d4 d7d5 b1c3 d5e4 c3e4",
    "e2e4 d7d5 e4d5 d8d5 b1c3",
    "d2d4 d7d5 c2c4 e7e6 b1c3 g8f6 c1g5",
    "d2d4 d7d5 c2c4 c7c6 g1f3 g8f6",
    "d2d4 g8f6 c2c4 e7e6 b1c3 f8b4",
    "d2d4 g8f6 c2c4 g7g6 b1c3 f8g7 e2e4",
    "c2c4 e7e5 b1c3 g8f6 g1f3",
    "g1f3 d7d5 d2d4 g8f6 c2c4",
];

/// Canonical key → move lookup consulted before searching.
#[derive(Debug, Clone, Default)]
pub struct OpeningBook {
    moves: HashMap<u64, Move>,
}

impl OpeningBook {
    /// An empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in repertoire.
    pub fn standard() -> Self {
        let mut book = Self::new();
        for line in STANDARD_LINES {
            book.add_line(line);
        }
        book
    }

    /// Add a whitespace-separated line of moves played from the initial
    /// position. Keys already in the book keep their move.
    ///
    /// A line with an illegal or unreadable move is kept up to that move.
    pub fn add_line(&mut self, line: &str) {
        let mut pos = Position::new();
        for text in line.split_whitespace() {
            let mv = match parse_move(&pos, text) {
                Ok(mv) => mv,
                Err(e) => {
                    warn!(line, error = %e, "truncating opening line");
                    return;
                }
            };
            self.moves.entry(pos.canonical_key()).or_insert(mv);
            pos.apply(mv);
        }
    }

    pub fn probe(&self, key: u64) -> Option<Move> {
        self.moves.get(&key).copied()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}
