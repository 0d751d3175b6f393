//! Play a maze on the terminal

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::Parser;
use maze_game::GameState;

mod terminal;

use terminal::Outcome;

/// Find the way out of a randomly generated maze
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Maze width, odd
    #[arg(long, default_value_t = 21)]
    width: usize,

    /// Maze height, odd
    #[arg(long, default_value_t = 21)]
    height: usize,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Write log output to this file. Logging is off without it, because
    /// the game owns the terminal.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&Path>) -> anyhow::Result<()> {
    let default_filter = if log_file.is_some() { "warn" } else { "off" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("Cannot create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

/// Generate a maze and play it until the player wins or quits
fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let mut game = GameState::generate(args.width, args.height, args.seed)?;
    match terminal::play(&mut game)? {
        Outcome::Won => println!("Congratulations! You reached the finish!"),
        Outcome::Quit => println!("Game over."),
    }
    Ok(())
}
