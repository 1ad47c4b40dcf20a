//! Search and evaluation for kibitz.

pub mod book;
mod config;
pub mod error;
pub mod eval;
pub mod search;

pub use book::OpeningBook;
pub use error::ConfigError;
pub use eval::weights::{EvalWeights, WEIGHTS_FILE};
pub use eval::{Evaluator, MATE_SCORE, evaluate};
pub use search::params::{SEARCH_PARAMS_FILE, SearchParams};
pub use search::pvs::{INF, MATE_THRESHOLD};
pub use search::{SearchResult, SearchTables, Searcher};
