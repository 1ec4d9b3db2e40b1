//! Solve a text maze and print the minimum cost and the number of cells on
//! any minimum-cost path.
//!
//! Run: cargo run --bin turnpath -- [--turn-penalty N] [--facing DIR] MAZE_FILE
//!
//! Set `RUST_LOG=debug` to see graph and relaxation statistics.

use std::path::PathBuf;

use clap::Parser;
use turnpath_core::{Direction, GridModel};
use turnpath_paths::{Maze, SolverConfig, TURN_PENALTY};

#[derive(Parser, Debug)]
#[command(name = "turnpath")]
#[command(about = "Minimum-cost paths through a maze where every turn costs extra")]
struct Args {
    /// Maze file: `#` wall, `.` open, `S` start, `E` end
    path: PathBuf,

    /// Extra cost charged for each 90° turn
    #[arg(long, default_value_t = TURN_PENALTY)]
    turn_penalty: u64,

    /// Facing at the start cell (north, east, south, west)
    #[arg(long, default_value_t = Direction::East, value_parser = clap::value_parser!(Direction))]
    facing: Direction,

    /// Give up after this many relaxation sweeps
    #[arg(long)]
    max_sweeps: Option<usize>,
}

impl Args {
    fn config(&self) -> SolverConfig {
        SolverConfig {
            turn_penalty: self.turn_penalty,
            start_facing: self.facing,
            max_sweeps: self.max_sweeps,
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(&args.path)
        .map_err(|e| format!("{}: {e}", args.path.display()))?;
    let grid: GridModel = text.parse()?;
    log::info!(
        "loaded {} maze with {} open cells",
        grid.bounds().size(),
        grid.open_count()
    );

    let maze = Maze::new(&grid, args.config())?;
    let cells = maze.cells_on_any_minimum_path()?;
    println!("{}", maze.minimum_cost());
    println!("{}", cells.len());
    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
