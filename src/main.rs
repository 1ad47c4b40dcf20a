use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::info;

use kibitz_core::{Position, STARTING_FEN, parse_move};
use kibitz_engine::{
    EvalWeights, Evaluator, SEARCH_PARAMS_FILE, SearchParams, Searcher, WEIGHTS_FILE,
};

const USAGE: &str = "usage: kibitz [--depth N] [--fen FEN] [--weights FILE] \
                     [--search-params FILE] [--no-book] [MOVE ...]";

const DEFAULT_DEPTH: i32 = 4;

#[derive(Debug, PartialEq)]
struct Options {
    depth: i32,
    fen: String,
    weights: PathBuf,
    search_params: PathBuf,
    book: bool,
    moves: Vec<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            fen: STARTING_FEN.to_string(),
            weights: PathBuf::from(WEIGHTS_FILE),
            search_params: PathBuf::from(SEARCH_PARAMS_FILE),
            book: true,
            moves: Vec::new(),
        }
    }
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Options> {
    let mut opts = Options::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        let mut value = |flag: &str| {
            args.next()
                .with_context(|| format!("{flag} needs a value\n{USAGE}"))
        };
        match arg.as_str() {
            "--depth" => {
                let text = value("--depth")?;
                opts.depth = text
                    .parse()
                    .with_context(|| format!("invalid depth {text:?}"))?;
                if opts.depth < 1 {
                    bail!("depth must be at least 1, got {}", opts.depth);
                }
            }
            "--fen" => opts.fen = value("--fen")?,
            "--weights" => opts.weights = value("--weights")?.into(),
            "--search-params" => opts.search_params = value("--search-params")?.into(),
            "--no-book" => opts.book = false,
            flag if flag.starts_with("--") => bail!("unknown flag {flag}\n{USAGE}"),
            _ => opts.moves.push(arg),
        }
    }

    Ok(opts)
}

fn setup_position(opts: &Options) -> Result<Position> {
    let mut pos = Position::from_fen(&opts.fen).context("cannot set up position")?;
    for text in &opts.moves {
        let mv = parse_move(&pos, text).with_context(|| format!("cannot play {text}"))?;
        pos.apply(mv);
    }
    Ok(pos)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let opts = parse_args(std::env::args().skip(1))?;
    let mut pos = setup_position(&opts)?;

    let weights = EvalWeights::load_or_default(&opts.weights);
    let params = SearchParams::load_or_default(&opts.search_params);
    let mut searcher = Searcher::new(Evaluator::new(weights), params);
    if !opts.book {
        searcher = searcher.without_book();
    }

    info!(fen = %pos.fen(), depth = opts.depth, "kibitz searching");
    match searcher.choose_move(&mut pos, opts.depth) {
        Some(mv) => println!("bestmove {mv}"),
        None => println!("bestmove (none)"),
    }
    Ok(())
}
