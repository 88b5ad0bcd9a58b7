mod engine;
mod grid;
mod input;
mod placement;
mod render;
mod session;
mod settings;
mod snake;
mod store;
mod term;

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use rand::{rngs::StdRng, SeedableRng};
use simplelog::{Config, WriteLogger};

use crate::session::Session;
use crate::settings::{Settings, DEFAULT_DELAY_MS, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::store::{HighScoreStore, DEFAULT_HIGH_SCORE_FILE};
use crate::term::TermManager;

pub type TermInt = u16;
pub type Coords = (u16, u16);

const DEFAULT_LOG_FILE: &str = "snake.log";

/// Snake in the terminal, with obstacles, bonus food and a saved high score.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Grid width, border included
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: TermInt,

    /// Grid height, border included
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: TermInt,

    /// Starting tick interval in milliseconds
    #[arg(long, default_value_t = DEFAULT_DELAY_MS)]
    delay: u64,

    /// Wrap around the edges instead of dying on the border
    #[arg(long)]
    wrap: bool,

    /// File the high score is kept in
    #[arg(long, default_value = DEFAULT_HIGH_SCORE_FILE)]
    high_score_file: PathBuf,

    /// File log output goes to
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    /// Seed for reproducible boards
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // The terminal belongs to the game, so logs go to a file
    init_logging(&args.log_file);

    let settings = Settings::new(args.width, args.height, args.delay, !args.wrap)
        .context("Invalid game settings")?;
    info!("Starting snake with {:?}", settings);

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let store = HighScoreStore::new(&args.high_score_file);
    info!("High scores are kept in {}", store.path().display());

    let mut session = Session::new(TermManager::new(), settings, store, rng);
    session.run().context("Terminal I/O failed")?;

    info!("Exiting");
    Ok(())
}

fn init_logging(path: &Path) {
    let file = match File::create(path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Logging disabled, cannot create {}: {}", path.display(), e);
            return;
        }
    };

    if let Err(e) = WriteLogger::init(LevelFilter::Info, Config::default(), file) {
        eprintln!("Logging disabled: {}", e);
    }
}
