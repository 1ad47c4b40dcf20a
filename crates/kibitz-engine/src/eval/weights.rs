//! Tunable evaluation coefficients.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config;
use crate::error::ConfigError;

/// Default file name for tuned evaluation weights.
pub const WEIGHTS_FILE: &str = "tuned_weights.json";

/// Scalar coefficients for the positional evaluation terms.
///
/// Every field is optional in the JSON form; missing keys keep their
/// default and unknown keys are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalWeights {
    pub bishop_pair: f32,
    /// Per legal move of difference between the two sides.
    pub mobility: f32,
    /// Per piece on d4, e4, d5 or e5.
    pub center_control: f32,
    /// Penalty per knight or bishop still on its starting square.
    pub development: f32,
    /// Bonus while any castling right remains.
    pub castling: f32,
    pub isolated_pawn: f32,
    pub doubled_pawn: f32,
    pub backward_pawn: f32,
    /// Multiplied by `relative_rank / 7` of the pawn.
    pub passed_pawn: f32,
    pub rook_open_file: f32,
    #[serde(rename = "rook_7th")]
    pub rook_seventh: f32,
    pub rook_connected: f32,
    pub pawn_shield: f32,
    pub king_open_file: f32,
    pub king_attack_zone: f32,
    pub tempo: f32,
    /// Draw penalty charged to the side to move.
    pub contempt: f32,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            bishop_pair: 30.0,
            mobility: 3.0,
            center_control: 10.0,
            development: 15.0,
            castling: 15.0,
            isolated_pawn: 12.0,
            doubled_pawn: 10.0,
            backward_pawn: 8.0,
            passed_pawn: 20.0,
            rook_open_file: 15.0,
            rook_seventh: 20.0,
            rook_connected: 10.0,
            pawn_shield: 10.0,
            king_open_file: 20.0,
            king_attack_zone: 8.0,
            tempo: 10.0,
            contempt: 20.0,
        }
    }
}

impl EvalWeights {
    /// Load weights from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        config::from_json_file(path.as_ref())
    }

    /// Load weights from a JSON file, or use the defaults if it is missing
    /// or malformed.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        config::load_or_default(path.as_ref())
    }
}
