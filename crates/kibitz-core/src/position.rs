//! Mutable game state with strictly paired apply/undo.
//!
//! A [`Position`] keeps the root board of the game plus every board reached
//! since, so undoing a move restores the exact prior state. The `chess`
//! crate supplies the board representation and legal move generation.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use chess::{
    BitBoard, Board, BoardStatus, ChessMove, Color, EMPTY, MoveGen, Piece, Square,
    get_bishop_moves, get_king_moves, get_knight_moves, get_pawn_attacks, get_rook_moves,
};

use crate::error::PositionError;
use crate::fen::mirror_fen;

/// Light squares (b1, d1, ..., a2, c2, ...).
const LIGHT_SQUARES: u64 = 0x55AA_55AA_55AA_55AA;

/// Halfmove clock and fullmove number, which `chess::Board` does not keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Clock {
    halfmove: u32,
    fullmove: u32,
}

impl Clock {
    const START: Clock = Clock {
        halfmove: 0,
        fullmove: 1,
    };

    /// The clock after `mover` plays; `irreversible` resets the halfmove count.
    fn after(self, mover: Color, irreversible: bool) -> Clock {
        Clock {
            halfmove: if irreversible { 0 } else { self.halfmove + 1 },
            fullmove: match mover {
                Color::White => self.fullmove,
                Color::Black => self.fullmove + 1,
            },
        }
    }
}

/// A game in progress: the root board and the stack of moves applied to it.
///
/// `moves[i]` leads from `boards[i]` to `boards[i + 1]`; `None` marks a null
/// move. The current board is always the last entry of `boards`, and
/// `clocks` runs parallel to `boards`.
#[derive(Clone, PartialEq, Eq)]
pub struct Position {
    boards: Vec<Board>,
    moves: Vec<Option<ChessMove>>,
    clocks: Vec<Clock>,
}

impl Position {
    /// The standard starting position.
    pub fn new() -> Position {
        Position::from_board(Board::default())
    }

    /// Start a game from an arbitrary board.
    pub fn from_board(board: Board) -> Position {
        Position {
            boards: vec![board],
            moves: Vec::new(),
            clocks: vec![Clock::START],
        }
    }

    /// Parse a FEN string into a fresh position with no move history.
    ///
    /// Missing move counters default to `0 1`.
    pub fn from_fen(fen: &str) -> Result<Position, PositionError> {
        let invalid = || {
            tracing::debug!(fen, "rejected FEN");
            PositionError::InvalidFen { fen: fen.to_string() }
        };

        let board = Board::from_str(fen).map_err(|_| invalid())?;
        let mut counters = fen.split_whitespace().skip(4);
        let mut counter = |default: u32| match counters.next() {
            Some(text) => text.parse::<u32>().map_err(|_| invalid()),
            None => Ok(default),
        };
        let clock = Clock {
            halfmove: counter(Clock::START.halfmove)?,
            fullmove: counter(Clock::START.fullmove)?,
        };

        let mut pos = Position::from_board(board);
        pos.clocks[0] = clock;
        Ok(pos)
    }

    /// The current board.
    #[inline]
    pub fn board(&self) -> &Board {
        // `boards` is never empty: it is created with the root and `undo`
        // refuses to pop it.
        &self.boards[self.boards.len() - 1]
    }

    /// The board the game started from.
    pub fn root(&self) -> &Board {
        &self.boards[0]
    }

    /// Number of moves (including null moves) applied since the root.
    pub fn ply(&self) -> usize {
        self.moves.len()
    }

    /// Moves applied since the root, oldest first. `None` is a null move.
    pub fn move_stack(&self) -> &[Option<ChessMove>] {
        &self.moves
    }

    /// Current position in FEN, with the en passant target square and the
    /// move counters of the game so far.
    pub fn fen(&self) -> String {
        let board = self.board();
        // Placement, side to move and castling come from the board's own
        // rendering. Its en passant field names the pawn, not the target.
        let rendered = board.to_string();
        let head = rendered.split_whitespace().take(3).collect::<Vec<_>>().join(" ");

        let en_passant = board
            .en_passant()
            .and_then(|pawn| match board.side_to_move() {
                Color::White => pawn.up(),
                Color::Black => pawn.down(),
            })
            .map_or_else(|| "-".to_string(), |target| target.to_string());

        let clock = self.clock();
        format!("{head} {en_passant} {} {}", clock.halfmove, clock.fullmove)
    }

    fn clock(&self) -> Clock {
        self.clocks[self.clocks.len() - 1]
    }

    // ── Mutation ────────────────────────────────────────────────────────────

    /// Apply a move that is known to be legal (e.g. taken from
    /// [`legal_moves`](Self::legal_moves)).
    pub fn apply(&mut self, mv: ChessMove) {
        debug_assert!(self.board().legal(mv), "apply called with illegal move {mv}");
        let board = self.board();
        let irreversible =
            board.piece_on(mv.get_source()) == Some(Piece::Pawn) || self.is_capture(mv);
        let clock = self.clock().after(board.side_to_move(), irreversible);
        let next = board.make_move_new(mv);
        self.boards.push(next);
        self.moves.push(Some(mv));
        self.clocks.push(clock);
    }

    /// Apply a move after checking that it is legal.
    pub fn try_apply(&mut self, mv: ChessMove) -> Result<(), PositionError> {
        if !self.board().legal(mv) {
            return Err(PositionError::IllegalMove {
                uci: mv.to_string(),
                fen: self.fen(),
            });
        }
        self.apply(mv);
        Ok(())
    }

    /// Pass the turn to the opponent.
    ///
    /// Returns `false` and leaves the position untouched when the side to
    /// move is in check, since passing would leave the king en prise.
    pub fn apply_null(&mut self) -> bool {
        match self.board().null_move() {
            Some(next) => {
                let clock = self.clock().after(self.side_to_move(), false);
                self.boards.push(next);
                self.moves.push(None);
                self.clocks.push(clock);
                true
            }
            None => false,
        }
    }

    /// Take back the most recent move (or null move).
    ///
    /// Returns `false` when already at the root.
    pub fn undo(&mut self) -> bool {
        if self.moves.is_empty() {
            return false;
        }
        self.moves.pop();
        self.boards.pop();
        self.clocks.pop();
        true
    }

    // ── Move queries ────────────────────────────────────────────────────────

    /// All legal moves in the current position.
    pub fn legal_moves(&self) -> Vec<ChessMove> {
        MoveGen::new_legal(self.board()).collect()
    }

    /// Number of legal moves in the current position.
    pub fn legal_move_count(&self) -> usize {
        MoveGen::new_legal(self.board()).len()
    }

    /// Legal captures, en passant included.
    pub fn captures(&self) -> Vec<ChessMove> {
        MoveGen::new_legal(self.board())
            .filter(|&mv| self.is_capture(mv))
            .collect()
    }

    /// Whether `mv` captures a piece (including en passant).
    pub fn is_capture(&self, mv: ChessMove) -> bool {
        self.captured_piece(mv).is_some()
    }

    /// The kind of piece `mv` would capture, if any.
    pub fn captured_piece(&self, mv: ChessMove) -> Option<Piece> {
        let board = self.board();
        if let Some(victim) = board.piece_on(mv.get_dest()) {
            return Some(victim);
        }
        // A pawn changing file onto an empty square is an en passant capture.
        let source = mv.get_source();
        let is_pawn = board.piece_on(source) == Some(Piece::Pawn);
        (is_pawn && source.get_file() != mv.get_dest().get_file()).then_some(Piece::Pawn)
    }

    /// Whether `mv` neither captures nor promotes.
    pub fn is_quiet(&self, mv: ChessMove) -> bool {
        mv.get_promotion().is_none() && !self.is_capture(mv)
    }

    // ── Status ──────────────────────────────────────────────────────────────

    /// The side to move.
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.board().side_to_move()
    }

    /// Whether the side to move is in check.
    pub fn is_in_check(&self) -> bool {
        *self.board().checkers() != EMPTY
    }

    /// Whether the side to move has been checkmated.
    pub fn is_checkmate(&self) -> bool {
        self.board().status() == BoardStatus::Checkmate
    }

    /// Whether the side to move has no legal move and is not in check.
    pub fn is_stalemate(&self) -> bool {
        self.board().status() == BoardStatus::Stalemate
    }

    /// Whether neither side can possibly deliver mate.
    ///
    /// True for bare kings, a single minor piece, or any number of bishops
    /// all standing on squares of one color.
    pub fn is_draw_by_insufficient_material(&self) -> bool {
        let board = self.board();
        let heavy_or_pawns = *board.pieces(Piece::Pawn)
            | *board.pieces(Piece::Rook)
            | *board.pieces(Piece::Queen);
        if heavy_or_pawns != EMPTY {
            return false;
        }

        let knights = *board.pieces(Piece::Knight);
        let bishops = *board.pieces(Piece::Bishop);
        let minors = knights.popcnt() + bishops.popcnt();
        if minors <= 1 {
            return true;
        }
        if knights != EMPTY {
            return false;
        }

        let light = BitBoard::new(LIGHT_SQUARES);
        (bishops & light) == EMPTY || (bishops & !light) == EMPTY
    }

    /// Whether the game has ended by mate, stalemate, or dead material.
    pub fn is_game_over(&self) -> bool {
        self.board().status() != BoardStatus::Ongoing || self.is_draw_by_insufficient_material()
    }

    // ── Placement ───────────────────────────────────────────────────────────

    /// The piece and its color on `sq`, if any.
    pub fn piece_at(&self, sq: Square) -> Option<(Piece, Color)> {
        let board = self.board();
        board.piece_on(sq).zip(board.color_on(sq))
    }

    /// Bitboard of `color`'s pieces of the given kind.
    #[inline]
    pub fn pieces(&self, kind: Piece, color: Color) -> BitBoard {
        *self.board().pieces(kind) & *self.board().color_combined(color)
    }

    /// The square of `color`'s king.
    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.board().king_square(color)
    }

    /// Whether `color` retains any castling right.
    pub fn has_castling_rights(&self, color: Color) -> bool {
        self.board().castle_rights(color) != chess::CastleRights::NoRights
    }

    /// Whether `color` has a knight, bishop, rook or queen.
    pub fn has_non_pawn_material(&self, color: Color) -> bool {
        let board = self.board();
        let kings_and_pawns = *board.pieces(Piece::King) | *board.pieces(Piece::Pawn);
        (*board.color_combined(color) & !kings_and_pawns) != EMPTY
    }

    /// Pieces of `color` that attack `sq` in the current position.
    pub fn attackers(&self, color: Color, sq: Square) -> BitBoard {
        let board = self.board();
        let occupied = *board.combined();
        let own = *board.color_combined(color);

        let rook_like = *board.pieces(Piece::Rook) | *board.pieces(Piece::Queen);
        let bishop_like = *board.pieces(Piece::Bishop) | *board.pieces(Piece::Queen);

        // A pawn of the opposite color on `sq` would attack exactly the
        // squares from which `color`'s pawns attack `sq`.
        let pawns = get_pawn_attacks(sq, !color, *board.pieces(Piece::Pawn) & own);
        let knights = get_knight_moves(sq) & *board.pieces(Piece::Knight);
        let kings = get_king_moves(sq) & *board.pieces(Piece::King);
        let sliders = (get_rook_moves(sq, occupied) & rook_like)
            | (get_bishop_moves(sq, occupied) & bishop_like);

        pawns | ((knights | kings | sliders) & own)
    }

    // ── Keys ────────────────────────────────────────────────────────────────

    /// Full-state key (placement, side to move, castling, en passant).
    #[inline]
    pub fn canonical_key(&self) -> u64 {
        self.board().get_hash()
    }

    /// Key of the piece placement alone, used for repetition detection.
    pub fn placement_key(&self) -> u64 {
        placement_key(self.board())
    }

    /// Placement keys of every position preceding the current one, oldest
    /// first, rebuilt by replaying the move stack from the root.
    pub fn history_keys(&self) -> Vec<u64> {
        let mut keys = Vec::with_capacity(self.moves.len());
        let mut board = *self.root();
        for mv in &self.moves {
            keys.push(placement_key(&board));
            board = match mv {
                Some(mv) => board.make_move_new(*mv),
                None => match board.null_move() {
                    Some(next) => next,
                    None => break,
                },
            };
        }
        keys
    }

    /// The current position with colors swapped and the board flipped.
    ///
    /// The result has no move history.
    pub fn mirrored(&self) -> Result<Position, PositionError> {
        Position::from_fen(&mirror_fen(&self.fen())?)
    }
}

/// Hash the piece placement of `board` (piece kinds and colors only).
pub fn placement_key(board: &Board) -> u64 {
    let mut hasher = DefaultHasher::new();
    for piece in chess::ALL_PIECES {
        board.pieces(piece).0.hash(&mut hasher);
    }
    board.color_combined(Color::White).0.hash(&mut hasher);
    board.color_combined(Color::Black).0.hash(&mut hasher);
    hasher.finish()
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for Position {
    type Err = PositionError;

    fn from_str(fen: &str) -> Result<Position, PositionError> {
        Position::from_fen(fen)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Position")
            .field("fen", &self.fen())
            .field("ply", &self.ply())
            .finish()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fen())
    }
}
