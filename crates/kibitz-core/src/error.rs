//! Error types for position construction and move input.

/// Errors raised at the boundary where text or unchecked moves enter a
/// [`Position`](crate::Position).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    /// The FEN string could not be parsed into a board.
    #[error("invalid FEN: \"{fen}\"")]
    InvalidFen {
        /// The FEN string that failed to parse.
        fen: String,
    },

    /// The move text is neither valid UCI nor valid SAN for the position.
    #[error("unrecognised move: \"{text}\"")]
    UnparsableMove {
        /// The move text as supplied.
        text: String,
    },

    /// The move is well formed but not legal in the current position.
    #[error("illegal move {uci} in position {fen}")]
    IllegalMove {
        /// The move in UCI notation.
        uci: String,
        /// FEN of the position the move was tried against.
        fen: String,
    },
}
