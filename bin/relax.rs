//! Jacobi grid relaxation CLI
//!
//! Reads a plain-text grid, relaxes it to convergence across a fixed set
//! of worker threads, and prints the converged grid with ten digits after
//! the decimal point, followed by a completion marker.

use clap::Parser;
use relaxsim::{
    domain::relaxation::{solve, RelaxationParams},
    utilities::{read_grid, write_grid},
};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

/// Command-line arguments for the relaxation solver
#[derive(Parser, Debug)]
#[command(name = "relax")]
#[command(about = "Parallel Jacobi relaxation over a 2-D grid", long_about = None)]
struct Args {
    /// Input grid file (row-major, whitespace-separated values)
    input: PathBuf,

    /// Number of grid rows
    #[arg(long, default_value_t = 1024)]
    rows: usize,

    /// Number of grid columns
    #[arg(long, default_value_t = 1024)]
    cols: usize,

    /// Number of worker threads
    #[arg(long, default_value_t = 4)]
    workers: usize,

    /// Convergence threshold for the per-band maximum change
    #[arg(long, default_value_t = 1e-5)]
    threshold: f64,

    /// Safety cap on the number of relaxation rounds
    #[arg(long, default_value_t = 100_000)]
    max_iterations: usize,

    /// Write the converged grid to this file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn run(args: Args) -> relaxsim::Result<()> {
    let grid = read_grid(&args.input, args.rows, args.cols)?;

    let params = RelaxationParams {
        workers: args.workers,
        threshold: args.threshold,
        max_iterations: args.max_iterations,
    };
    let result = solve(grid, &params)?;

    if !result.converged {
        log::warn!(
            "stopped after {} iterations without full convergence (max delta {:.3e})",
            result.iterations,
            result.max_delta
        );
    }

    match &args.output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            write_grid(&mut writer, &result.grid)?;
            writer.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            write_grid(&mut writer, &result.grid)?;
            writer.flush()?;
        }
    }

    println!(
        "DONE: {} iterations with {} workers",
        result.iterations, args.workers
    );
    Ok(())
}
