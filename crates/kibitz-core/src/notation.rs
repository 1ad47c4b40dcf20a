//! Move text input: UCI coordinates first, SAN as a fallback.

use std::str::FromStr;

use chess::ChessMove;

use crate::error::PositionError;
use crate::position::Position;

/// Parse `text` as a legal move in `pos`.
///
/// Accepts UCI coordinate notation (`e2e4`, `e7e8q`) and standard algebraic
/// notation (`Nf3`, `exd5`, `O-O`). The move must be legal in the current
/// position.
pub fn parse_move(pos: &Position, text: &str) -> Result<ChessMove, PositionError> {
    let text = text.trim();
    let mv = ChessMove::from_str(text)
        .ok()
        .filter(|&mv| pos.board().legal(mv))
        .or_else(|| ChessMove::from_san(pos.board(), text).ok())
        .ok_or_else(|| PositionError::UnparsableMove { text: text.to_string() })?;

    if !pos.board().legal(mv) {
        return Err(PositionError::IllegalMove {
            uci: mv.to_string(),
            fen: pos.fen(),
        });
    }
    Ok(mv)
}

#[cfg(test)]
mod tests {
    use super::parse_move;
    use crate::error::PositionError;
    use crate::position::Position;

    #[test]
    fn parses_uci() {
        let pos = Position::new();
        assert_eq!(parse_move(&pos, "e2e4").unwrap().to_string(), "e2e4");
    }

    #[test]
    fn parses_san() {
        let pos = Position::new();
        assert_eq!(parse_move(&pos, "Nf3").unwrap().to_string(), "g1f3");
    }

    #[test]
    fn parses_promotion() {
        let pos = Position::from_fen("8/4P3/8/8/8/8/k7/4K3 w - - 0 1").unwrap();
        assert_eq!(parse_move(&pos, "e7e8q").unwrap().to_string(), "e7e8q");
    }

    #[test]
    fn rejects_garbage() {
        let pos = Position::new();
        assert!(matches!(
            parse_move(&pos, "hello"),
            Err(PositionError::UnparsableMove { .. })
        ));
    }

    #[test]
    fn rejects_illegal_coordinates() {
        let pos = Position::new();
        assert!(parse_move(&pos, "e2e5").is_err());
    }
}
