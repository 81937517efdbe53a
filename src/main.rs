mod app;

use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use candysnek::{ConfigError, Difficulty, GameConfig};

#[derive(Parser)]
#[command(name = "candysnek", version, about)]
struct Args {
    /// TOML file with game settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// easy, medium, hard (or 1, 2, 3).
    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// Seed for candy and spawn placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs here; filtered by RUST_LOG.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        match File::create(path) {
            Ok(file) => tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::from_default_env())
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init(),
            Err(e) => {
                eprintln!("cannot open log file {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        }
    }

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match app::run(config, args.seed) {
        Ok(high_score) => {
            println!("Thanks for playing! High score: {high_score}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(args: &Args) -> Result<GameConfig, ConfigError> {
    let mut config = GameConfig::load(args.config.as_deref())?;
    if let Some(difficulty) = args.difficulty {
        config.difficulty = difficulty;
    }
    config.validate()?;
    Ok(config)
}
