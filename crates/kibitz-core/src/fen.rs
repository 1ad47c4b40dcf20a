//! FEN helpers: the starting position and color mirroring.

use crate::error::PositionError;

/// The FEN string for the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Mirror a FEN string vertically and swap the colors of every piece.
///
/// Ranks are reversed, piece letters change case, the side to move flips,
/// castling rights change hands and the en passant rank moves from 3 to 6
/// (or back). Move counters are copied unchanged.
pub fn mirror_fen(fen: &str) -> Result<String, PositionError> {
    let invalid = || PositionError::InvalidFen { fen: fen.to_string() };

    let fields: Vec<&str> = fen.split_whitespace().collect();
    if fields.len() < 4 {
        return Err(invalid());
    }

    let placement = fields[0]
        .split('/')
        .rev()
        .map(swap_case)
        .collect::<Vec<_>>()
        .join("/");

    let side = match fields[1] {
        "w" => "b",
        "b" => "w",
        _ => return Err(invalid()),
    };

    let castling = if fields[2] == "-" {
        "-".to_string()
    } else {
        let swapped = swap_case(fields[2]);
        let mut white: Vec<char> = swapped.chars().filter(char::is_ascii_uppercase).collect();
        let mut black: Vec<char> = swapped.chars().filter(char::is_ascii_lowercase).collect();
        // Canonical order is KQkq: K sorts before Q, k before q.
        white.sort_unstable();
        black.sort_unstable();
        white.into_iter().chain(black).collect()
    };

    let en_passant = match fields[3] {
        "-" => "-".to_string(),
        ep => {
            let mut chars = ep.chars();
            let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
                return Err(invalid());
            };
            let rank = match rank {
                '3' => '6',
                '6' => '3',
                _ => return Err(invalid()),
            };
            format!("{file}{rank}")
        }
    };

    let halfmove = fields.get(4).copied().unwrap_or("0");
    let fullmove = fields.get(5).copied().unwrap_or("1");

    Ok(format!("{placement} {side} {castling} {en_passant} {halfmove} {fullmove}"))
}

fn swap_case(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_ascii_uppercase() {
                c.to_ascii_lowercase()
            } else {
                c.to_ascii_uppercase()
            }
        })
        .collect()
}
