//! Tunable search constants and heuristic switches.

use std::path::Path;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::config;
use crate::error::ConfigError;

/// Default file name for tuned search parameters.
pub const SEARCH_PARAMS_FILE: &str = "tuned_search_params.json";

/// Search constants.
///
/// Integer fields also accept JSON floats, which are rounded; tuners tend
/// to write `3.0` rather than `3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Extra depth reduction for the null-move search.
    #[serde(deserialize_with = "rounded")]
    pub null_move_r: i32,
    #[serde(deserialize_with = "rounded")]
    pub razor_margin_mult: i32,
    #[serde(deserialize_with = "rounded")]
    pub futility_margin_mult: i32,
    /// Move index from which late moves are reduced by `lmr_reduction_1`.
    #[serde(deserialize_with = "rounded")]
    pub lmr_threshold: usize,
    /// Move index from which late moves are reduced by `lmr_reduction_2`.
    #[serde(deserialize_with = "rounded")]
    pub lmr_threshold_deep: usize,
    #[serde(deserialize_with = "rounded")]
    pub lmr_reduction_1: i32,
    #[serde(deserialize_with = "rounded")]
    pub lmr_reduction_2: i32,
    /// Half-width of the aspiration window around the previous score.
    #[serde(deserialize_with = "rounded")]
    pub aspiration_window: i32,
    /// Quiet moves at index `late_move_pruning_base + depth²` or later are
    /// skipped at depth 3 and below.
    #[serde(deserialize_with = "rounded")]
    pub late_move_pruning_base: usize,
    #[serde(deserialize_with = "rounded")]
    pub quiescence_max_ply: i32,
    #[serde(deserialize_with = "rounded")]
    pub delta_margin: i32,
    /// Transposition table entries allowed before it is cleared.
    #[serde(deserialize_with = "rounded")]
    pub tt_max_entries: usize,
    /// Occupied killer slots allowed before the killer table is cleared.
    #[serde(deserialize_with = "rounded")]
    pub killer_max_entries: usize,

    pub null_move: bool,
    pub razoring: bool,
    pub futility: bool,
    pub lmr: bool,
    pub late_move_pruning: bool,
    pub delta_pruning: bool,
    pub check_extension: bool,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            null_move_r: 3,
            razor_margin_mult: 300,
            futility_margin_mult: 150,
            lmr_threshold: 4,
            lmr_threshold_deep: 8,
            lmr_reduction_1: 1,
            lmr_reduction_2: 2,
            aspiration_window: 50,
            late_move_pruning_base: 3,
            quiescence_max_ply: 6,
            delta_margin: 900,
            tt_max_entries: 1_000_000,
            killer_max_entries: 64,
            null_move: true,
            razoring: true,
            futility: true,
            lmr: true,
            late_move_pruning: true,
            delta_pruning: true,
            check_extension: true,
        }
    }
}

impl SearchParams {
    /// Defaults with every forward-pruning heuristic and the check
    /// extension turned off. The search then visits the full tree to the
    /// requested depth.
    pub fn exhaustive() -> Self {
        Self {
            null_move: false,
            razoring: false,
            futility: false,
            lmr: false,
            late_move_pruning: false,
            delta_pruning: false,
            check_extension: false,
            ..Self::default()
        }
    }

    /// Load parameters from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        config::from_json_file(path.as_ref())
    }

    /// Load parameters from a JSON file, or use the defaults if it is
    /// missing or malformed.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        config::load_or_default(path.as_ref())
    }
}

fn rounded<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
{
    let value = f64::deserialize(deserializer)?;
    T::try_from(value.round() as i64)
        .map_err(|_| D::Error::custom(format!("{value} is out of range")))
}
