//! CLI for maze generation

use anyhow::Context;
use clap::Parser;
use maze_game::{maze_generator::MazeGenerator, CellKind};

/// Print a randomly generated perfect maze
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Generated field height
    #[arg(long, default_value_t = 21)]
    height: usize,

    /// Generated field width
    #[arg(long, default_value_t = 21)]
    width: usize,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Mark the path from start to goal
    #[arg(long)]
    solve: bool,
}

/// Generate maze, print output
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let mut gen = MazeGenerator::new(args.seed);
    let mut maze = gen.generate_maze(args.width, args.height)?;

    if args.solve {
        let path = maze
            .solve()?
            .context("Generated maze has no path to the goal")?;
        for point in path {
            if maze.grid.cell_kind(point)? == CellKind::Open {
                maze.grid.set_cell_kind(point, CellKind::PathMarker)?;
            }
        }
    }
    println!("{}", maze);
    Ok(())
}
